//! Streaming OSM XML reader using quick-xml
//!
//! Pulls events from the tokenizer and feeds them to a [`RecordHandler`],
//! returning one [`OsmRecord`] each time a top-level element closes. Only
//! element starts and ends matter; text, comments, CDATA, processing
//! instructions and the doctype are skipped. Non-whitespace text outside the
//! document element is rejected.
//!
//! Attribute values are normalized as XML requires: literal tabs and line
//! breaks become spaces, so every record stays on one output line.

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::encoding::Decoder;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::handler::{OsmRecord, RecordHandler};
use crate::error::ConvertError;

pub use iterators::RecordIterator;

mod iterators;


/// Where the tokenizer is relative to the document element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentState {
    NotStarted,
    Open,
    Closed,
}

/// Streaming parser for OSM XML documents
pub struct OsmStreamer<R: BufRead> {
    reader: Reader<R>,
    handler: RecordHandler,
    buf: Vec<u8>,
    document: DocumentState,
    open_elements: usize,
    elements_seen: usize,
    records_emitted: usize,
    finished: bool,
}

impl<R: BufRead> OsmStreamer<R> {
    /// Create a new streamer for documents wrapped in `<osm>`
    pub fn new(reader: R) -> Self {
        Self::with_handler(reader, RecordHandler::new())
    }

    /// Create a new streamer driving a preconfigured handler
    pub fn with_handler(reader: R, handler: RecordHandler) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        let config = xml_reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = true;

        Self {
            reader: xml_reader,
            handler,
            buf: Vec::new(),
            document: DocumentState::NotStarted,
            open_elements: 0,
            elements_seen: 0,
            records_emitted: 0,
            finished: false,
        }
    }

    /// The record handler
    pub fn handler(&self) -> &RecordHandler {
        &self.handler
    }

    /// Number of element starts read so far, root included
    pub fn elements_seen(&self) -> usize {
        self.elements_seen
    }

    /// Number of records returned so far
    pub fn records_emitted(&self) -> usize {
        self.records_emitted
    }

    /// Byte offset of the tokenizer in the input
    pub fn position(&self) -> u64 {
        self.reader.buffer_position()
    }

    /// Iterate over all remaining records
    pub fn records(self) -> RecordIterator<R> {
        RecordIterator { streamer: self }
    }

    /// Read the next record from the stream
    ///
    /// Returns `Ok(None)` once the document element has closed and the input
    /// is exhausted. After an error or the end of input every further call
    /// returns `Ok(None)`.
    pub fn next_record(&mut self) -> Result<Option<OsmRecord>, ConvertError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    self.finished = true;
                    return Err(ConvertError::from_xml(self.reader.error_position(), e));
                }
            };
            let decoder = self.reader.decoder();

            match event {
                Event::Start(ref e) => {
                    if self.document == DocumentState::Closed {
                        self.finished = true;
                        return Err(ConvertError::IllFormed {
                            position: self.reader.buffer_position(),
                            reason: "content after the document element".to_string(),
                        });
                    }
                    self.document = DocumentState::Open;
                    self.open_elements += 1;
                    self.elements_seen += 1;

                    let (name, attrs) = match decode_start(e, decoder) {
                        Ok(decoded) => decoded,
                        Err(err) => {
                            self.finished = true;
                            return Err(ConvertError::from_xml(self.reader.buffer_position(), err));
                        }
                    };
                    self.handler.start_element(&name, attrs);
                }
                Event::End(ref e) => {
                    let name = match decoder.decode(e.name().into_inner()) {
                        Ok(name) => name,
                        Err(err) => {
                            self.finished = true;
                            return Err(ConvertError::from_xml(
                                self.reader.buffer_position(),
                                err.into(),
                            ));
                        }
                    };
                    self.open_elements = self.open_elements.saturating_sub(1);
                    if self.open_elements == 0 {
                        self.document = DocumentState::Closed;
                    }

                    if let Some(record) = self.handler.end_element(&name) {
                        self.records_emitted += 1;
                        return Ok(Some(record));
                    }
                }
                Event::Eof => {
                    self.finished = true;
                    let reason = match self.document {
                        DocumentState::Closed => return Ok(None),
                        DocumentState::NotStarted => "no element found",
                        DocumentState::Open => "unexpected end of input inside an element",
                    };
                    return Err(ConvertError::IllFormed {
                        position: self.reader.buffer_position(),
                        reason: reason.to_string(),
                    });
                }
                Event::Text(ref t) if self.document != DocumentState::Open => {
                    if !t.iter().all(u8::is_ascii_whitespace) {
                        self.finished = true;
                        return Err(ConvertError::IllFormed {
                            position: self.reader.buffer_position(),
                            reason: "text outside the document element".to_string(),
                        });
                    }
                }
                _ => {}
            }
        }
    }
}

/// Decode an element name and its attributes, values unescaped
fn decode_start<'b>(
    e: &'b BytesStart<'_>,
    decoder: Decoder,
) -> quick_xml::Result<(Cow<'b, str>, Vec<(Cow<'b, str>, Cow<'b, str>)>)> {
    let name = decoder.decode(e.name().into_inner())?;
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decoder.decode(attr.key.into_inner())?;
        let raw = match attr.value {
            Cow::Borrowed(bytes) => decoder.decode(bytes)?,
            Cow::Owned(bytes) => Cow::Owned(decoder.decode(&bytes)?.into_owned()),
        };
        attrs.push((key, normalize_attribute_value(raw)?));
    }
    Ok((name, attrs))
}

/// Replace literal tabs and line breaks with spaces, then resolve references.
///
/// `\r\n` counts as a single line break. Character references such as
/// `&#10;` are resolved after normalization and survive as written.
fn normalize_attribute_value(raw: Cow<'_, str>) -> quick_xml::Result<Cow<'_, str>> {
    let needs_normalizing = |c: char| matches!(c, '\t' | '\n' | '\r');
    match raw {
        Cow::Borrowed(s) if !s.contains(needs_normalizing) => Ok(unescape(s)?),
        raw => {
            let mut normalized = String::with_capacity(raw.len());
            let mut chars = raw.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    continue;
                }
                normalized.push(if needs_normalizing(c) { ' ' } else { c });
            }
            Ok(Cow::Owned(unescape(&normalized)?.into_owned()))
        }
    }
}
