//! Validation issue types.
//!
//! Each variant carries only the data its message needs. Issues are
//! rendered to strings for the `errors` and `warnings` lists, but the typed
//! form stays available for callers that want to group or filter.

use serde::{Deserialize, Serialize};
use tci_model::{FieldName, TestCategory, TestPriority, TestStatus};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Reported in `errors`. The draft is still importable.
    Error,
    /// Something was repaired or dropped; review recommended.
    Warning,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Problem found while normalizing or validating a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    /// Source had no title; a placeholder was generated.
    GeneratedTitle { placeholder: String },
    /// Title is empty after normalization.
    MissingTitle,
    /// Draft has no project to belong to.
    MissingProject,
    /// Text exceeds the allowed length and was truncated.
    TextTooLong {
        field: FieldName,
        length: usize,
        max_allowed: usize,
    },
    /// Enumerated value not recognized; the default was used.
    UnrecognizedValue {
        field: FieldName,
        value: String,
        suggestion: Option<String>,
    },
    /// Execution date not in any accepted format; kept as custom data.
    InvalidDate { value: String },
}

impl Issue {
    /// Canonical field the issue concerns, if any.
    pub fn field(&self) -> Option<FieldName> {
        match self {
            Issue::GeneratedTitle { .. } | Issue::MissingTitle => Some(FieldName::Title),
            Issue::MissingProject => None,
            Issue::TextTooLong { field, .. } => Some(*field),
            Issue::UnrecognizedValue { field, .. } => Some(*field),
            Issue::InvalidDate { .. } => Some(FieldName::ExecutionDate),
        }
    }

    /// Severity for this issue type.
    pub fn severity(&self) -> Severity {
        match self {
            Issue::GeneratedTitle { .. } => Severity::Error,
            Issue::MissingTitle => Severity::Error,
            Issue::MissingProject => Severity::Error,
            Issue::TextTooLong {
                field: FieldName::Title | FieldName::Description,
                ..
            } => Severity::Error,
            Issue::TextTooLong { .. } => Severity::Warning,
            Issue::UnrecognizedValue { .. } => Severity::Error,
            Issue::InvalidDate { .. } => Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Whether the draft is flagged invalid. An unrecognized enum value is
    /// reported as an error but the default it fell back to is usable.
    pub fn invalidates_draft(&self) -> bool {
        self.is_error() && !matches!(self, Issue::UnrecognizedValue { .. })
    }

    /// Format message with issue-specific data.
    pub fn message(&self) -> String {
        match self {
            Issue::GeneratedTitle { placeholder } => {
                format!("Title is missing; using '{placeholder}'")
            }
            Issue::MissingTitle => "Title is required".to_string(),
            Issue::MissingProject => "Project id is required".to_string(),
            Issue::TextTooLong {
                field,
                length,
                max_allowed,
            } => format!(
                "{field} has {length} characters, exceeding max length {max_allowed}; truncated"
            ),
            Issue::UnrecognizedValue {
                field,
                value,
                suggestion,
            } => {
                let hint = suggestion
                    .as_deref()
                    .map(|s| format!(" (did you mean '{s}'?)"))
                    .unwrap_or_default();
                format!(
                    "Unrecognized {} '{value}', using '{}'{hint}",
                    field.label().to_lowercase(),
                    default_label(*field)
                )
            }
            Issue::InvalidDate { value } => {
                format!("Execution date '{value}' is not a recognized date; kept as custom data")
            }
        }
    }
}

/// Default label an enumerated field falls back to.
fn default_label(field: FieldName) -> &'static str {
    match field {
        FieldName::Status => TestStatus::default().as_str(),
        FieldName::Priority => TestPriority::default().as_str(),
        FieldName::Category => TestCategory::default().as_str(),
        _ => "",
    }
}
