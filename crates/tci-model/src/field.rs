//! Canonical test case attributes.
//!
//! [`FieldName`] is the closed set of attributes a [`TestCaseDraft`](crate::TestCaseDraft)
//! understands. Every other piece of imported data ends up in custom fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical test case attribute.
///
/// Serialized as the camelCase key used by the persistence layer
/// (`expectedResult`, `assignedTester`, ...).
///
/// # Example
///
/// ```
/// use tci_model::FieldName;
///
/// let field: FieldName = "Expected Result".parse().unwrap();
/// assert_eq!(field, FieldName::ExpectedResult);
/// assert_eq!(field.key(), "expectedResult");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Title,
    Description,
    ExpectedResult,
    Status,
    Priority,
    Category,
    AssignedTester,
    ExecutionDate,
    Notes,
    ActualResult,
    Environment,
    Prerequisites,
    Platform,
    StepsToReproduce,
}

impl FieldName {
    /// All canonical fields in display order.
    pub const ALL: [FieldName; 14] = [
        Self::Title,
        Self::Description,
        Self::ExpectedResult,
        Self::Status,
        Self::Priority,
        Self::Category,
        Self::AssignedTester,
        Self::ExecutionDate,
        Self::Notes,
        Self::ActualResult,
        Self::Environment,
        Self::Prerequisites,
        Self::Platform,
        Self::StepsToReproduce,
    ];

    /// camelCase key as stored by the persistence layer.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::ExpectedResult => "expectedResult",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Category => "category",
            Self::AssignedTester => "assignedTester",
            Self::ExecutionDate => "executionDate",
            Self::Notes => "notes",
            Self::ActualResult => "actualResult",
            Self::Environment => "environment",
            Self::Prerequisites => "prerequisites",
            Self::Platform => "platform",
            Self::StepsToReproduce => "stepsToReproduce",
        }
    }

    /// Human-readable English label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::ExpectedResult => "Expected Result",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::Category => "Category",
            Self::AssignedTester => "Assigned Tester",
            Self::ExecutionDate => "Execution Date",
            Self::Notes => "Notes",
            Self::ActualResult => "Actual Result",
            Self::Environment => "Environment",
            Self::Prerequisites => "Prerequisites",
            Self::Platform => "Platform",
            Self::StepsToReproduce => "Steps To Reproduce",
        }
    }

    /// Returns true for the fields backed by a closed enumeration.
    pub fn is_enumerated(&self) -> bool {
        matches!(self, Self::Status | Self::Priority | Self::Category)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FieldName {
    type Err = String;

    /// Accepts the label, the camelCase key or the snake_case key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold(s);
        Self::ALL
            .iter()
            .copied()
            .find(|field| fold(field.label()) == wanted)
            .ok_or_else(|| format!("Unknown field: {s}"))
    }
}

/// Lowercase and strip everything except letters and digits.
fn fold(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
