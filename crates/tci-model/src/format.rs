//! Detected input formats and confidence tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of the pasted or uploaded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Tsv,
    Structured,
    Hierarchical,
    Freeform,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Structured => "structured",
            Self::Hierarchical => "hierarchical",
            Self::Freeform => "freeform",
        }
    }

    /// Returns true for table-shaped input with a header row.
    pub fn is_delimited(&self) -> bool {
        matches!(self, Self::Csv | Self::Tsv)
    }

    /// Field delimiter byte for delimited formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            _ => None,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of format detection.
///
/// `confidence` is always within `[0, 1]`; `headers` is only present for
/// delimited formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFormat {
    pub format: InputFormat,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
}

impl DetectedFormat {
    /// Creates a detection result, clamping confidence into `[0, 1]`.
    pub fn new(format: InputFormat, confidence: f32) -> Self {
        Self {
            format,
            confidence: clamp_confidence(confidence),
            headers: None,
        }
    }

    /// Creates a delimited detection result with its header row.
    pub fn delimited(format: InputFormat, confidence: f32, headers: Vec<String>) -> Self {
        Self {
            headers: Some(headers),
            ..Self::new(format, confidence)
        }
    }
}

/// Clamps a heuristic score into `[0, 1]`; NaN becomes 0.
pub fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Coarse confidence bucket attached to a column mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Representative score for the tier.
    pub fn score(&self) -> f32 {
        match self {
            Self::High => 0.9,
            Self::Medium => 0.7,
            Self::Low => 0.6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
