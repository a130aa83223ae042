//! The canonical record produced by an import.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{TestCategory, TestPriority, TestStatus};
use crate::field::FieldName;

/// Value stored in a custom field.
///
/// Serialized untagged so the persistence layer sees plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CustomValue {
    /// Wraps text, mapping blank strings to [`CustomValue::Null`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Null
        } else {
            Self::Text(value)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A test case ready to hand to persistence.
///
/// `title`, `description`, `status`, `priority` and `category` always hold
/// a value once a draft has been normalized; the remaining canonical
/// attributes are optional. Anything that does not fit the canonical schema
/// lives in `custom_fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseDraft {
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<String>,
    /// 1-based position of the record in the source input.
    pub source_row: usize,

    pub title: String,
    pub description: String,
    pub status: TestStatus,
    pub priority: TestPriority,
    pub category: TestCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_tester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub custom_fields: BTreeMap<String, CustomValue>,
}

impl TestCaseDraft {
    /// Creates a draft with defaults for every attribute.
    pub fn new(project_id: impl Into<String>, source_row: usize, title: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            suite_id: None,
            source_row,
            title: title.into(),
            description: String::new(),
            status: TestStatus::default(),
            priority: TestPriority::default(),
            category: TestCategory::default(),
            expected_result: None,
            actual_result: None,
            steps_to_reproduce: None,
            prerequisites: None,
            assigned_tester: None,
            execution_date: None,
            environment: None,
            platform: None,
            notes: None,
            custom_fields: BTreeMap::new(),
        }
    }

    /// Mutable access to an optional free-text attribute.
    ///
    /// Returns `None` for attributes that are not optional text
    /// (title, description, the enums, and the execution date).
    pub fn text_slot(&mut self, field: FieldName) -> Option<&mut Option<String>> {
        match field {
            FieldName::ExpectedResult => Some(&mut self.expected_result),
            FieldName::ActualResult => Some(&mut self.actual_result),
            FieldName::StepsToReproduce => Some(&mut self.steps_to_reproduce),
            FieldName::Prerequisites => Some(&mut self.prerequisites),
            FieldName::AssignedTester => Some(&mut self.assigned_tester),
            FieldName::Environment => Some(&mut self.environment),
            FieldName::Platform => Some(&mut self.platform),
            FieldName::Notes => Some(&mut self.notes),
            FieldName::Title
            | FieldName::Description
            | FieldName::Status
            | FieldName::Priority
            | FieldName::Category
            | FieldName::ExecutionDate => None,
        }
    }

    /// Display value of a canonical attribute, if set.
    pub fn field_value(&self, field: FieldName) -> Option<String> {
        match field {
            FieldName::Title => Some(self.title.clone()),
            FieldName::Description => Some(self.description.clone()),
            FieldName::Status => Some(self.status.to_string()),
            FieldName::Priority => Some(self.priority.to_string()),
            FieldName::Category => Some(self.category.to_string()),
            FieldName::ExecutionDate => self.execution_date.map(|d| d.to_string()),
            FieldName::ExpectedResult => self.expected_result.clone(),
            FieldName::ActualResult => self.actual_result.clone(),
            FieldName::StepsToReproduce => self.steps_to_reproduce.clone(),
            FieldName::Prerequisites => self.prerequisites.clone(),
            FieldName::AssignedTester => self.assigned_tester.clone(),
            FieldName::Environment => self.environment.clone(),
            FieldName::Platform => self.platform.clone(),
            FieldName::Notes => self.notes.clone(),
        }
    }
}
