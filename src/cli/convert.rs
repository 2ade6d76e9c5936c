use anyhow::{Context, Result};
use log::info;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use osm2json::converter::OsmConverter;

use super::Config;

/// Convert an OSM XML file (or standard input) to line-delimited JSON on stdout
pub fn run(input: Option<PathBuf>, config: Config) -> Result<()> {
    let conversion = config.conversion.into_conversion_config();
    info!("Input buffer size: {}", conversion.input_buffer_size);
    if conversion.flush_each_record {
        info!("Flushing after every record");
    }

    let converter = OsmConverter::with_config(conversion);
    let stdout = io::stdout().lock();

    let stats = match &input {
        Some(path) => converter
            .convert(Some(path.as_path()), BufWriter::new(stdout))
            .with_context(|| format!("Conversion of {} failed", path.display()))?,
        None => converter
            .convert(None, BufWriter::new(stdout))
            .context("Conversion of standard input failed")?,
    };

    info!("  Elements read: {}", stats.elements);
    info!("  Attributes converted: {}", stats.attributes);

    Ok(())
}
