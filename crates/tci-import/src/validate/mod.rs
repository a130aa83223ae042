//! Draft validation.
//!
//! Validation never fails and never panics: every problem becomes an
//! [`Issue`], and a cleaned copy of the draft is always returned.
//!
//! # Example
//!
//! ```
//! use tci_import::{ImportConfig, validate};
//! use tci_model::TestCaseDraft;
//!
//! let draft = TestCaseDraft::new("proj-1", 1, "  Login works  ");
//! let result = validate(&draft, &ImportConfig::default());
//! assert!(result.is_valid);
//! assert_eq!(result.cleaned_draft.title, "Login works");
//! ```

mod checks;
mod issue;

pub use issue::{Issue, Severity};

use serde::{Deserialize, Serialize};
use tci_model::TestCaseDraft;

use crate::config::ImportConfig;

/// Outcome of validating one draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no issue invalidates the draft. `errors` may still be
    /// non-empty, e.g. for an unrecognized status that fell back to its default.
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub issues: Vec<Issue>,
    pub cleaned_draft: TestCaseDraft,
}

impl ValidationResult {
    fn from_issues(issues: Vec<Issue>, cleaned_draft: TestCaseDraft) -> Self {
        let (errors, warnings): (Vec<&Issue>, Vec<&Issue>) =
            issues.iter().partition(|issue| issue.is_error());
        Self {
            is_valid: !issues.iter().any(Issue::invalidates_draft),
            errors: errors.into_iter().map(Issue::message).collect(),
            warnings: warnings.into_iter().map(Issue::message).collect(),
            issues,
            cleaned_draft,
        }
    }
}

/// Validates a draft on its own.
pub fn validate(draft: &TestCaseDraft, config: &ImportConfig) -> ValidationResult {
    validate_with_issues(draft, Vec::new(), config)
}

/// Validates a draft, merging issues already found during normalization.
pub fn validate_with_issues(
    draft: &TestCaseDraft,
    prior: Vec<Issue>,
    config: &ImportConfig,
) -> ValidationResult {
    let mut cleaned = draft.clone();
    checks::trim_text(&mut cleaned);

    let mut issues = prior;
    if let Some(issue) = checks::check_title(&cleaned, &issues) {
        issues.push(issue);
    }
    if let Some(issue) = checks::check_project(&cleaned) {
        issues.push(issue);
    }
    issues.extend(checks::check_lengths(&mut cleaned, config));

    if !issues.is_empty() {
        tracing::debug!(
            row = cleaned.source_row,
            issues = issues.len(),
            "draft has validation issues"
        );
    }
    ValidationResult::from_issues(issues, cleaned)
}
