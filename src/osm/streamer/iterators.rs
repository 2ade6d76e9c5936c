use std::io::BufRead;

use super::OsmStreamer;
use crate::error::ConvertError;
use crate::osm::handler::OsmRecord;

/// Iterator over records in an OSM document
///
/// Yields at most one error, after which the iterator is exhausted.
pub struct RecordIterator<R: BufRead> {
    pub(super) streamer: OsmStreamer<R>,
}

impl<R: BufRead> RecordIterator<R> {
    /// The underlying streamer
    pub fn streamer(&self) -> &OsmStreamer<R> {
        &self.streamer
    }
}

impl<R: BufRead> Iterator for RecordIterator<R> {
    type Item = Result<OsmRecord, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.streamer.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
