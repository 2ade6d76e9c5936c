//! Record output.

use std::io::Write;

/// Receiver of finished records
pub trait RecordSink {
    /// Accept one record. `name` is the top-level tag name.
    fn receive(&mut self, name: &str, json: &str) -> std::io::Result<()>;

    /// Called once after the last record, on success and on failure.
    fn finish(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writes each record as one line of text
pub struct LineEmitter<W: Write> {
    writer: W,
    flush_each_record: bool,
    lines_written: usize,
}

impl<W: Write> LineEmitter<W> {
    /// Create an emitter over `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            flush_each_record: false,
            lines_written: 0,
        }
    }

    /// Flush the writer after every record
    pub fn with_flush_each_record(mut self, flush: bool) -> Self {
        self.flush_each_record = flush;
        self
    }

    /// Number of lines written so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for LineEmitter<W> {
    fn receive(&mut self, _name: &str, json: &str) -> std::io::Result<()> {
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        if self.flush_each_record {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

/// Collects records in memory
impl RecordSink for Vec<super::OsmRecord> {
    fn receive(&mut self, name: &str, json: &str) -> std::io::Result<()> {
        self.push(super::OsmRecord {
            name: name.to_string(),
            json: json.to_string(),
        });
        Ok(())
    }
}
