//! Column mappings and custom column proposals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field::FieldName;
use crate::format::ConfidenceTier;

/// Where a source column's values go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnTarget {
    /// Into a canonical attribute.
    Field(FieldName),
    /// Not a canonical attribute.
    Skip,
}

impl ColumnTarget {
    pub fn field(&self) -> Option<FieldName> {
        match self {
            Self::Field(field) => Some(*field),
            Self::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

impl fmt::Display for ColumnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{}", field.key()),
            Self::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for ColumnTarget {
    type Err = String;

    /// Accepts `skip` or anything [`FieldName`] parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("skip") {
            return Ok(Self::Skip);
        }
        s.parse().map(Self::Field)
    }
}

/// How a mapping was decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingSource {
    #[default]
    Auto,
    Manual,
}

/// Mapping of one source header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub source_column: String,
    pub target_field: ColumnTarget,
    pub confidence_tier: ConfidenceTier,
    pub confidence: f32,
    #[serde(default)]
    pub source: MappingSource,
}

impl ColumnMapping {
    /// A manual Skip drops the column entirely.
    pub fn is_ignored(&self) -> bool {
        self.target_field.is_skip() && self.source == MappingSource::Manual
    }

    /// An automatic Skip keeps the column as custom data.
    pub fn is_custom(&self) -> bool {
        self.target_field.is_skip() && self.source == MappingSource::Auto
    }
}

/// Data type proposed for a custom column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomColumnType {
    Text,
    Number,
    Select,
    Date,
}

impl CustomColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for CustomColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A column definition the persistence layer should create before
/// inserting drafts that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomColumnProposal {
    /// snake_case key used in `TestCaseDraft::custom_fields`.
    pub name: String,
    /// Original header text.
    pub label: String,
    pub inferred_type: CustomColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_options: Option<Vec<String>>,
}

/// Converts a header into a snake_case custom field key.
///
/// # Example
///
/// ```
/// use tci_model::custom_field_key;
///
/// assert_eq!(custom_field_key("Bug Count"), "bug_count");
/// assert_eq!(custom_field_key("  Build #/Version "), "build_version");
/// assert_eq!(custom_field_key("releaseTrain"), "release_train");
/// ```
pub fn custom_field_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut prev_lower = false;
    for c in header.trim().chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower {
                key.push('_');
            }
            key.extend(c.to_lowercase());
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        } else {
            if !key.is_empty() && !key.ends_with('_') {
                key.push('_');
            }
            prev_lower = false;
        }
    }
    let trimmed = key.trim_end_matches('_');
    if trimmed.is_empty() {
        "custom".to_string()
    } else {
        trimmed.to_string()
    }
}
