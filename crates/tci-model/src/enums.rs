//! Closed enumerations for status, priority, and category.
//!
//! Imported text rarely matches these exactly, so each enum offers
//! [`coerce`](TestStatus::coerce): a case-insensitive exact match that is
//! tolerant of `_`, `-` and repeated whitespace. Anything else is rejected
//! and the caller falls back to [`Default`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Execution status of a test case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Passed,
    Failed,
    Blocked,
    Skipped,
}

impl TestStatus {
    pub const ALL: [TestStatus; 6] = [
        Self::Pending,
        Self::InProgress,
        Self::Passed,
        Self::Failed,
        Self::Blocked,
        Self::Skipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Blocked => "Blocked",
            Self::Skipped => "Skipped",
        }
    }

    /// Case-insensitive exact match against the labels.
    pub fn coerce(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|status| normalize_label(status.as_str()) == wanted)
    }

    /// Labels accepted by [`coerce`](Self::coerce).
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

/// Business priority of a test case.
///
/// Outline documents group test cases under `P0`..`P3` labels
/// (`P0 - Critical`); those resolve to Critical..Low.
///
/// # Example
///
/// ```
/// use tci_model::TestPriority;
///
/// assert_eq!(TestPriority::coerce("high"), Some(TestPriority::High));
/// assert_eq!(TestPriority::coerce("P0 - Critical"), Some(TestPriority::Critical));
/// assert_eq!(TestPriority::coerce("urgent"), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestPriority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl TestPriority {
    pub const ALL: [TestPriority; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Case-insensitive exact match, plus the `P<n>` outline convention.
    pub fn coerce(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        if let Some(found) = Self::ALL
            .into_iter()
            .find(|priority| normalize_label(priority.as_str()) == wanted)
        {
            return Some(found);
        }
        Self::from_outline_level(&wanted)
    }

    /// Resolves `p0`..`p3` (optionally followed by a label) to a priority.
    fn from_outline_level(normalized: &str) -> Option<Self> {
        let mut chars = normalized.chars();
        if chars.next() != Some('p') {
            return None;
        }
        let level = chars.next()?.to_digit(10)?;
        // "p10" or "pending" must not resolve.
        if chars.next().is_some_and(|c| !c.is_whitespace()) {
            return None;
        }
        match level {
            0 => Some(Self::Critical),
            1 => Some(Self::High),
            2 => Some(Self::Medium),
            3 => Some(Self::Low),
            _ => None,
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

/// Kind of testing a case belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestCategory {
    #[default]
    Functional,
    Regression,
    Smoke,
    Integration,
    Performance,
    Security,
    Usability,
    Accessibility,
}

impl TestCategory {
    pub const ALL: [TestCategory; 8] = [
        Self::Functional,
        Self::Regression,
        Self::Smoke,
        Self::Integration,
        Self::Performance,
        Self::Security,
        Self::Usability,
        Self::Accessibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::Regression => "Regression",
            Self::Smoke => "Smoke",
            Self::Integration => "Integration",
            Self::Performance => "Performance",
            Self::Security => "Security",
            Self::Usability => "Usability",
            Self::Accessibility => "Accessibility",
        }
    }

    pub fn coerce(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|category| normalize_label(category.as_str()) == wanted)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

macro_rules! label_traits {
    ($($ty:ident => $what:literal),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::coerce(s).ok_or_else(|| format!(concat!("Unknown ", $what, ": {}"), s))
                }
            }
        )+
    };
}

label_traits! {
    TestStatus => "status",
    TestPriority => "priority",
    TestCategory => "category",
}

/// Lowercase, turn `_`/`-` into spaces, collapse whitespace.
pub fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_coercion_is_case_and_separator_insensitive() {
        assert_eq!(TestStatus::coerce("PASSED"), Some(TestStatus::Passed));
        assert_eq!(TestStatus::coerce("in_progress"), Some(TestStatus::InProgress));
        assert_eq!(TestStatus::coerce(" In-Progress "), Some(TestStatus::InProgress));
        assert_eq!(TestStatus::coerce("pass"), None);
        assert_eq!(TestStatus::default(), TestStatus::Pending);
    }

    #[test]
    fn priority_outline_levels() {
        assert_eq!(TestPriority::coerce("P1"), Some(TestPriority::High));
        assert_eq!(TestPriority::coerce("p2 - Medium"), Some(TestPriority::Medium));
        assert_eq!(TestPriority::coerce("P3-Low"), Some(TestPriority::Low));
        assert_eq!(TestPriority::coerce("P9 - Someday"), None);
        assert_eq!(TestPriority::coerce("P10"), None);
        assert_eq!(TestPriority::coerce("pending"), None);
    }

    #[test]
    fn category_default_and_parse() {
        assert_eq!(TestCategory::default(), TestCategory::Functional);
        assert_eq!("smoke".parse(), Ok(TestCategory::Smoke));
        assert_eq!(
            "exploratory".parse::<TestCategory>(),
            Err("Unknown category: exploratory".to_string())
        );
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&TestStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: TestStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestStatus::InProgress);
    }
}
