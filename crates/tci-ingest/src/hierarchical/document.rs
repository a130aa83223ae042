//! Parsed outline tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Title used for sections and subsections that the document never named.
pub const IMPLICIT_GROUP_TITLE: &str = "General";

/// A parsed outline: sections in source order plus the priority block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchicalDocument {
    pub sections: Vec<Section>,
    /// Test case id to `P<n>` label, from the priority block.
    pub priority_assignments: BTreeMap<String, String>,
    /// Non-fatal problems found while parsing.
    pub warnings: Vec<String>,
}

impl HierarchicalDocument {
    /// All test cases in document order.
    pub fn test_cases(&self) -> impl Iterator<Item = &HierarchicalTestCase> {
        self.sections
            .iter()
            .flat_map(|section| section.subsections.iter())
            .flat_map(|subsection| subsection.test_cases.iter())
    }

    pub fn test_case_count(&self) -> usize {
        self.test_cases().count()
    }

    /// Looks up a test case by id (case-insensitive).
    pub fn find(&self, id: &str) -> Option<&HierarchicalTestCase> {
        self.test_cases().find(|case| case.id.eq_ignore_ascii_case(id))
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

/// A top-level numbered section (`1. AUTHENTICATION`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    /// Subsections in first-seen order, unique by key.
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subsections: Vec::new(),
        }
    }

    /// Looks up a subsection by its number key (`1.2`).
    pub fn subsection(&self, key: &str) -> Option<&Subsection> {
        self.subsections.iter().find(|s| s.key == key)
    }
}

/// A nested subsection (`1.2 Password Reset`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    /// Outline number, or empty for an implicit subsection.
    pub key: String,
    pub title: String,
    pub test_cases: Vec<HierarchicalTestCase>,
}

/// One test case block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchicalTestCase {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    /// Inline `Priority:` value, replaced by the priority block label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_status: Option<String>,
    pub section: String,
    pub subsection: String,
}
