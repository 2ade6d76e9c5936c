//! TOML configuration file support.
//!
//! None of these settings change the records written to stdout:
//!
//! ```toml
//! # osm2json.toml
//! [conversion]
//! input_buffer_size = 262144
//! flush_each_record = true
//! progress_interval = 50000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use osm2json::converter::ConversionConfig as LibConversionConfig;

/// Root configuration structure for osm2json.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration for the conversion.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    /// Input buffer size in bytes.
    pub input_buffer_size: Option<usize>,

    /// Flush stdout after every record.
    pub flush_each_record: Option<bool>,

    /// Records between debug progress messages (0 disables them).
    pub progress_interval: Option<usize>,
}

impl ConversionConfig {
    /// Fill unset keys with the library defaults.
    pub fn into_conversion_config(self) -> LibConversionConfig {
        let defaults = LibConversionConfig::default();
        LibConversionConfig {
            input_buffer_size: self.input_buffer_size.unwrap_or(defaults.input_buffer_size),
            flush_each_record: self.flush_each_record.unwrap_or(defaults.flush_each_record),
            progress_interval: self.progress_interval.unwrap_or(defaults.progress_interval),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
