//! # osm2json converter
//!
//! Converts an OpenStreetMap XML file to line-delimited JSON on standard
//! output.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a file
//! convert map.osm > map.jsonl
//!
//! # Convert standard input
//! bzcat planet.osm.bz2 | convert > planet.jsonl
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
