//! OSM XML to line-delimited JSON converter
//!
//! This module ties the pipeline together: input source, streaming parser,
//! record handler and emitter. Conversion is a single sequential pass.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::ConvertError;
use crate::osm::{LineEmitter, OsmStreamer, RecordHandler, RecordSink};
use crate::reader::{InputSource, DEFAULT_INPUT_BUFFER_SIZE};

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Input buffer size in bytes, used when reading from a file
    pub input_buffer_size: usize,

    /// Flush the output after every record instead of once at the end
    pub flush_each_record: bool,

    /// Records between debug progress messages (0 disables them)
    pub progress_interval: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_buffer_size: DEFAULT_INPUT_BUFFER_SIZE,
            flush_each_record: false,
            progress_interval: 100_000,
        }
    }
}

/// Statistics from a conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Records written (top-level elements)
    pub records: usize,
    /// Element starts read, root included
    pub elements: usize,
    /// Attributes serialized
    pub attributes: usize,
    /// Record count per top-level tag name
    pub records_by_name: BTreeMap<String, usize>,
}

impl ConversionStats {
    /// One-line summary such as `node: 3, way: 1`
    pub fn summary(&self) -> String {
        self.records_by_name
            .iter()
            .map(|(name, count)| format!("{}: {}", name, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Converter from OSM XML to line-delimited JSON
pub struct OsmConverter {
    config: ConversionConfig,
}

impl OsmConverter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// Create a new converter with custom configuration
    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert the file at `input` (standard input when `None`) into `output`
    pub fn convert<W: Write>(
        &self,
        input: Option<&Path>,
        output: W,
    ) -> Result<ConversionStats, ConvertError> {
        match input {
            Some(path) => info!("Converting {}", path.display()),
            None => info!("Converting standard input"),
        }

        let source = InputSource::open(input, self.config.input_buffer_size)?;
        let mut emitter =
            LineEmitter::new(output).with_flush_each_record(self.config.flush_each_record);
        self.convert_reader(source, &mut emitter)
    }

    /// Convert an XML stream, handing each record to `sink`
    ///
    /// The sink is finished on both success and failure so that records
    /// produced before an error reach their destination.
    pub fn convert_reader<R: BufRead, S: RecordSink>(
        &self,
        reader: R,
        sink: &mut S,
    ) -> Result<ConversionStats, ConvertError> {
        self.convert_with_handler(reader, RecordHandler::new(), sink)
    }

    /// Like [`convert_reader`](Self::convert_reader) with a preconfigured handler
    pub fn convert_with_handler<R: BufRead, S: RecordSink>(
        &self,
        reader: R,
        handler: RecordHandler,
        sink: &mut S,
    ) -> Result<ConversionStats, ConvertError> {
        let mut streamer = OsmStreamer::with_handler(reader, handler);
        let result = self.pump(&mut streamer, sink);
        let finished = sink.finish();

        let mut stats = result?;
        finished?;

        stats.elements = streamer.elements_seen();
        stats.attributes = streamer.handler().attributes_seen();

        info!("Conversion complete: {} records", stats.records);
        if !stats.records_by_name.is_empty() {
            info!("  {}", stats.summary());
        }
        Ok(stats)
    }

    fn pump<R: BufRead, S: RecordSink>(
        &self,
        streamer: &mut OsmStreamer<R>,
        sink: &mut S,
    ) -> Result<ConversionStats, ConvertError> {
        let mut stats = ConversionStats::default();

        while let Some(record) = streamer.next_record()? {
            sink.receive(&record.name, &record.json)?;

            stats.records += 1;
            match stats.records_by_name.get_mut(record.name.as_str()) {
                Some(count) => *count += 1,
                None => {
                    stats.records_by_name.insert(record.name, 1);
                }
            }

            if self.config.progress_interval > 0 && stats.records % self.config.progress_interval == 0
            {
                debug!(
                    "Converted {} records ({} bytes read)",
                    stats.records,
                    streamer.position()
                );
            }
        }

        Ok(stats)
    }
}

impl Default for OsmConverter {
    fn default() -> Self {
        Self::new()
    }
}
