//! Custom column proposals for headers that map to no canonical field.

use std::collections::BTreeSet;

use tci_model::{CustomColumnProposal, CustomColumnType, custom_field_key};

use super::rules::NormalizedHeader;

/// Most distinct values a column can have and still be offered as a select.
const MAX_SELECT_OPTIONS: usize = 5;

/// Options proposed for boolean-like select columns.
pub const BOOLEAN_OPTIONS: [&str; 2] = ["Yes", "No"];

/// Characteristics of a column's values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnHint {
    /// More than 90% of non-blank values parse as numbers.
    pub is_numeric: bool,
    /// Ratio of distinct values among non-blank ones (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of blank values (0.0 to 1.0).
    pub null_ratio: f64,
    /// Distinct non-blank values in first-seen order.
    pub distinct: Vec<String>,
    pub non_null: usize,
}

impl ColumnHint {
    /// Few distinct values, each seen more than once on average.
    pub fn looks_like_select(&self) -> bool {
        self.non_null >= 2
            && !self.distinct.is_empty()
            && self.distinct.len() <= MAX_SELECT_OPTIONS
            && self.unique_ratio <= 0.5
    }
}

/// Builds a hint from a column's raw values.
pub fn build_column_hint<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnHint {
    let mut total = 0usize;
    let mut null_count = 0usize;
    let mut numeric_count = 0usize;
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut distinct = Vec::new();

    for value in values {
        total += 1;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            null_count += 1;
            continue;
        }
        if parse_number(trimmed).is_some() {
            numeric_count += 1;
        }
        if seen.insert(trimmed) {
            distinct.push(trimmed.to_string());
        }
    }

    if total == 0 {
        return ColumnHint {
            null_ratio: 1.0,
            ..ColumnHint::default()
        };
    }

    let non_null = total - null_count;
    let unique_ratio = if non_null > 0 {
        distinct.len() as f64 / non_null as f64
    } else {
        0.0
    };
    ColumnHint {
        is_numeric: non_null > 0 && (numeric_count as f64 / non_null as f64) > 0.9,
        unique_ratio,
        null_ratio: null_count as f64 / total as f64,
        distinct,
        non_null,
    }
}

/// Parses a number, tolerating thousands separators.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Proposes a custom column for a header.
///
/// The header's wording decides first: date/time headers are dates,
/// count/number/id headers are numbers, enabled/active/status headers are
/// selects. Otherwise the values decide. A number header whose values are
/// mostly not numbers is kept as text.
pub fn propose_custom_column<'a>(
    header: &str,
    values: impl IntoIterator<Item = &'a str>,
) -> CustomColumnProposal {
    let hint = build_column_hint(values);
    let (inferred_type, suggested_options) = infer_type(header, &hint);
    CustomColumnProposal {
        name: custom_field_key(header),
        label: header.trim().to_string(),
        inferred_type,
        suggested_options,
    }
}

fn infer_type(header: &str, hint: &ColumnHint) -> (CustomColumnType, Option<Vec<String>>) {
    let h = NormalizedHeader::new(header);
    let words: Vec<&str> = h.as_str().split(' ').collect();
    let has = |needle: &str| h.as_str().contains(needle);

    if has("date") || has("time") {
        return (CustomColumnType::Date, None);
    }
    if has("count") || has("number") || words.contains(&"id") {
        if hint.non_null > 0 && !hint.is_numeric {
            return (CustomColumnType::Text, None);
        }
        return (CustomColumnType::Number, None);
    }
    if has("enabled") || has("active") || has("status") {
        let options = if hint.looks_like_select() {
            hint.distinct.clone()
        } else {
            BOOLEAN_OPTIONS.iter().map(ToString::to_string).collect()
        };
        return (CustomColumnType::Select, Some(options));
    }
    if hint.is_numeric {
        return (CustomColumnType::Number, None);
    }
    if hint.looks_like_select() {
        return (CustomColumnType::Select, Some(hint.distinct.clone()));
    }
    (CustomColumnType::Text, None)
}
