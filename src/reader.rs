//! Input selection: a named file or standard input.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, StdinLock};
use std::path::Path;

use log::debug;

use crate::error::ConvertError;

/// Default input buffer size (64KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Buffered character source for the converter
///
/// A file handle is closed when the source is dropped, including when
/// parsing stops on an error.
#[derive(Debug)]
pub enum InputSource {
    /// A file opened from a path
    File(BufReader<File>),
    /// Locked standard input
    Stdin(StdinLock<'static>),
}

impl InputSource {
    /// Open `path`, or standard input when no path is given
    pub fn open(path: Option<&Path>, buffer_size: usize) -> Result<Self, ConvertError> {
        match path {
            Some(path) => Self::open_file(path, buffer_size),
            None => {
                debug!("Reading from standard input");
                Ok(InputSource::Stdin(io::stdin().lock()))
            }
        }
    }

    /// Open a file for reading
    pub fn open_file(path: &Path, buffer_size: usize) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConvertError::InputNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConvertError::InputUnreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        // Opening a directory succeeds on some platforms; reading it does not
        let metadata = file.metadata().map_err(|source| ConvertError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.is_dir() {
            return Err(ConvertError::InputUnreadable {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "is a directory"),
            });
        }

        debug!("Reading {} ({} bytes)", path.display(), metadata.len());
        Ok(InputSource::File(BufReader::with_capacity(
            buffer_size.max(1),
            file,
        )))
    }

    /// Whether this source reads standard input
    pub fn is_stdin(&self) -> bool {
        matches!(self, InputSource::Stdin(_))
    }
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputSource::File(r) => r.read(buf),
            InputSource::Stdin(r) => r.read(buf),
        }
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            InputSource::File(r) => r.fill_buf(),
            InputSource::Stdin(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputSource::File(r) => r.consume(amt),
            InputSource::Stdin(r) => r.consume(amt),
        }
    }
}
