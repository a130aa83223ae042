//! Lenient coercion of enumerated values.

use rapidfuzz::distance::jaro_winkler;
use tci_model::{FieldName, normalize_label};

use crate::validate::Issue;

/// Minimum similarity for a label to be offered as a hint.
const HINT_THRESHOLD: f64 = 0.7;

/// Coerces `raw` with `coerce`, falling back to the default.
///
/// Blank values fall back silently; unrecognized values also record an
/// issue carrying the closest label.
pub(crate) fn coerce_or_default<T: Default>(
    field: FieldName,
    raw: Option<&str>,
    coerce: impl Fn(&str) -> Option<T>,
    labels: &[&'static str],
    issues: &mut Vec<Issue>,
) -> T {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return T::default();
    };
    if let Some(value) = coerce(raw) {
        return value;
    }
    issues.push(Issue::UnrecognizedValue {
        field,
        value: raw.to_string(),
        suggestion: closest_label(raw, labels).map(str::to_string),
    });
    T::default()
}

/// Most similar label by Jaro-Winkler, if similar enough.
pub(crate) fn closest_label(raw: &str, labels: &[&'static str]) -> Option<&'static str> {
    let wanted = normalize_label(raw);
    labels
        .iter()
        .map(|label| {
            let score = jaro_winkler::similarity(wanted.chars(), normalize_label(label).chars());
            (*label, score)
        })
        .filter(|(_, score)| *score >= HINT_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tci_model::TestStatus;

    #[test]
    fn test_closest_label() {
        let labels = TestStatus::labels();
        assert_eq!(closest_label("Passd", &labels), Some("Passed"));
        assert_eq!(closest_label("inprogress", &labels), Some("In Progress"));
        assert_eq!(closest_label("zzz", &labels), None);
    }

    #[test]
    fn test_coerce_or_default() {
        let labels = TestStatus::labels();
        let mut issues = Vec::new();

        let status = coerce_or_default(
            FieldName::Status,
            Some("failed"),
            TestStatus::coerce,
            &labels,
            &mut issues,
        );
        assert_eq!(status, TestStatus::Failed);
        assert!(issues.is_empty());

        let status = coerce_or_default(
            FieldName::Status,
            Some("  "),
            TestStatus::coerce,
            &labels,
            &mut issues,
        );
        assert_eq!(status, TestStatus::Pending);
        assert!(issues.is_empty());

        let status = coerce_or_default(
            FieldName::Status,
            Some("Done"),
            TestStatus::coerce,
            &labels,
            &mut issues,
        );
        assert_eq!(status, TestStatus::Pending);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field(), Some(FieldName::Status));
    }
}
