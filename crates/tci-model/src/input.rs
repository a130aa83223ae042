//! Import input and caller context.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::ColumnTarget;

/// Raw data handed to the import engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RawInput {
    /// Clipboard paste or decoded text file.
    Text { text: String },
    /// Rows already split into cells, e.g. by a spreadsheet decoder.
    Rows {
        /// Header order as it appeared in the source.
        headers: Vec<String>,
        rows: Vec<BTreeMap<String, String>>,
    },
}

impl RawInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Builds row input, deriving headers from the rows in first-seen order.
    pub fn rows(rows: Vec<BTreeMap<String, String>>) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
        Self::Rows { headers, rows }
    }

    pub fn with_headers(headers: Vec<String>, rows: Vec<BTreeMap<String, String>>) -> Self {
        Self::Rows { headers, rows }
    }
}

/// Caller-supplied context for one import.
///
/// Never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportContext {
    pub project_id: String,
    #[serde(default)]
    pub suite_id: Option<String>,
    /// Manual header mappings that replace automatic suggestions.
    #[serde(default)]
    pub column_overrides: BTreeMap<String, ColumnTarget>,
}

impl ImportContext {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_suite(mut self, suite_id: impl Into<String>) -> Self {
        self.suite_id = Some(suite_id.into());
        self
    }

    #[must_use]
    pub fn with_override(mut self, header: impl Into<String>, target: ColumnTarget) -> Self {
        self.column_overrides.insert(header.into(), target);
        self
    }

    /// Override for a header, matched case-insensitively after trimming.
    pub fn override_for(&self, header: &str) -> Option<ColumnTarget> {
        let header = header.trim();
        self.column_overrides
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(header))
            .map(|(_, target)| *target)
    }
}
