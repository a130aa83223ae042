//! Error types for the import pipeline edges.
//!
//! [`run`](crate::run) itself never fails; these errors come from loading
//! configuration and parsing caller-supplied overrides.

use std::path::PathBuf;
use thiserror::Error;

use tci_ingest::IngestError;

/// Errors that can occur outside the infallible import run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// Reading or decoding input failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A manual column override could not be parsed.
    #[error("Invalid column override '{value}': {reason}")]
    InvalidOverride { value: String, reason: String },

    /// Configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for [`ImportConfig`](crate::ImportConfig).
    #[error("Invalid import config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for import pipeline edges.
pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImportError::InvalidOverride {
            value: "Owner".to_string(),
            reason: "expected Header=field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid column override 'Owner': expected Header=field"
        );
    }

    #[test]
    fn test_error_from_ingest() {
        let err: ImportError = IngestError::EmptyDocument.into();
        assert!(matches!(err, ImportError::Ingest(IngestError::EmptyDocument)));
        assert_eq!(err.to_string(), "input is empty");
    }
}
