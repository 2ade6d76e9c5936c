use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod convert;

pub use config::Config;

/// Convert OpenStreetMap XML to line-delimited JSON
#[derive(Parser)]
#[command(name = "convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input OSM XML file path (reads standard input when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    convert::run(cli.input, config)
}
