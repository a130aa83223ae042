//! Error types for test case ingestion.

use thiserror::Error;

/// Errors that can occur while reading raw test case input.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input has no non-blank lines.
    #[error("input is empty")]
    EmptyDocument,

    /// First line has no delimiter, so there is no header row.
    #[error("could not detect a delimited header row")]
    NoDelimitedHeader,

    /// The delimited reader rejected a record.
    #[error("failed to read delimited input at line {line}: {message}")]
    Delimited { line: u64, message: String },

    /// Uploaded bytes could not be decoded to text.
    #[error("unsupported text encoding: {encoding}")]
    UnsupportedEncoding { encoding: &'static str },
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        Self::Delimited {
            line,
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
