//! Structural checks on a normalized draft.
//!
//! Checks repair what they can in place and report what they found.

use tci_model::{FieldName, TestCaseDraft};

use super::issue::Issue;
use crate::config::ImportConfig;

/// Trims every text field; blank optional fields become `None`.
pub(super) fn trim_text(draft: &mut TestCaseDraft) {
    trim_in_place(&mut draft.title);
    trim_in_place(&mut draft.description);
    draft.project_id = draft.project_id.trim().to_string();
    for field in FieldName::ALL {
        if let Some(slot) = draft.text_slot(field) {
            *slot = slot
                .take()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
        }
    }
}

/// Title must be present; a draft with a generated title already reported it.
pub(super) fn check_title(draft: &TestCaseDraft, prior: &[Issue]) -> Option<Issue> {
    let generated = prior
        .iter()
        .any(|issue| matches!(issue, Issue::GeneratedTitle { .. }));
    (draft.title.is_empty() && !generated).then_some(Issue::MissingTitle)
}

pub(super) fn check_project(draft: &TestCaseDraft) -> Option<Issue> {
    draft.project_id.is_empty().then_some(Issue::MissingProject)
}

/// Truncates over-long title and description.
pub(super) fn check_lengths(draft: &mut TestCaseDraft, config: &ImportConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    if let Some(issue) = truncate(&mut draft.title, FieldName::Title, config.max_title_length) {
        issues.push(issue);
    }
    if let Some(issue) = truncate(
        &mut draft.description,
        FieldName::Description,
        config.max_description_length,
    ) {
        issues.push(issue);
    }
    issues
}

/// Cuts `value` to `max_allowed` characters, never splitting a character.
fn truncate(value: &mut String, field: FieldName, max_allowed: usize) -> Option<Issue> {
    let length = value.chars().count();
    if length <= max_allowed {
        return None;
    }
    let cut = value
        .char_indices()
        .nth(max_allowed)
        .map_or(value.len(), |(idx, _)| idx);
    value.truncate(cut);
    let trimmed_len = value.trim_end().len();
    value.truncate(trimmed_len);
    Some(Issue::TextTooLong {
        field,
        length,
        max_allowed,
    })
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
