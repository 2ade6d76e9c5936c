//! Error type shared by the reader, streamer and converter.

use std::path::PathBuf;

/// Errors that can occur while converting an OSM XML document
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input path does not exist
    #[error("Input file does not exist: {}", path.display())]
    InputNotFound {
        /// Path given on the command line
        path: PathBuf,
    },

    /// The input path exists but could not be opened
    #[error("Cannot read input file {}: {source}", path.display())]
    InputUnreadable {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying open error
        #[source]
        source: std::io::Error,
    },

    /// The tokenizer rejected the byte stream
    #[error("Malformed XML at byte {position}: {source}")]
    MalformedXml {
        /// Byte offset reported by the tokenizer
        position: u64,
        /// Underlying tokenizer error
        #[source]
        source: quick_xml::Error,
    },

    /// The token stream is not a single well-formed document
    #[error("Malformed XML at byte {position}: {reason}")]
    IllFormed {
        /// Byte offset where the problem was detected
        position: u64,
        /// Human-readable description
        reason: String,
    },

    /// I/O error while reading the input or writing records
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// True for both kinds of malformed-document errors.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ConvertError::MalformedXml { .. } | ConvertError::IllFormed { .. }
        )
    }

    /// Classify a tokenizer error, keeping read failures as I/O errors.
    pub(crate) fn from_xml(position: u64, err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => ConvertError::Io(std::io::Error::new(io.kind(), io)),
            source => ConvertError::MalformedXml { position, source },
        }
    }
}
