//! Import configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tci_ingest::DetectorOptions;

use crate::error::{ImportError, Result};

/// Bounds and tunables for one import.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes.
///
/// # Example
///
/// ```
/// use tci_import::ImportConfig;
///
/// let config = ImportConfig::from_toml_str("max_rows = 50")?;
/// assert_eq!(config.max_rows, 50);
/// assert_eq!(config.max_title_length, 255);
/// # Ok::<(), tci_import::ImportError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Text beyond this many bytes is cut at the last full line.
    pub max_input_bytes: usize,
    /// Rows or records beyond this count are dropped.
    pub max_rows: usize,
    /// Lines sampled for delimiter consistency.
    pub sample_lines: usize,
    /// Detection confidence at which a format wins outright.
    pub strong_match_threshold: f32,
    pub max_title_length: usize,
    pub max_description_length: usize,
    /// Prefix for titles generated for untitled rows.
    pub placeholder_title_prefix: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 5 * 1024 * 1024,
            max_rows: 10_000,
            sample_lines: 5,
            strong_match_threshold: 0.6,
            max_title_length: 255,
            max_description_length: 10_000,
            placeholder_title_prefix: "Imported Test Case".to_string(),
        }
    }
}

impl ImportConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded import config");
        Ok(config)
    }

    /// Detector options derived from this config.
    pub fn detector_options(&self) -> DetectorOptions {
        DetectorOptions::default()
            .with_sample_lines(self.sample_lines)
            .with_strong_match_threshold(self.strong_match_threshold)
    }

    #[must_use]
    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    #[must_use]
    pub fn with_sample_lines(mut self, sample_lines: usize) -> Self {
        self.sample_lines = sample_lines;
        self
    }

    #[must_use]
    pub fn with_strong_match_threshold(mut self, threshold: f32) -> Self {
        self.strong_match_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_placeholder_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_title_prefix = prefix.into();
        self
    }

    /// Title given to an untitled record at 1-based `row`.
    pub fn placeholder_title(&self, row: usize) -> String {
        format!("{} {row}", self.placeholder_title_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.max_input_bytes, 5 * 1024 * 1024);
        assert_eq!(config.max_rows, 10_000);
        assert_eq!(config.placeholder_title(3), "Imported Test Case 3");
        assert_eq!(config.detector_options().sample_lines, 5);
    }

    #[test]
    fn test_partial_toml() {
        let config = ImportConfig::from_toml_str(
            "sample_lines = 8\nplaceholder_title_prefix = \"Untitled\"\n",
        )
        .unwrap();
        assert_eq!(config.sample_lines, 8);
        assert_eq!(config.placeholder_title(1), "Untitled 1");
        assert_eq!(config.max_description_length, 10_000);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ImportConfig::from_toml_str("max_rows = \"many\"").unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));
    }
}
