//! Field normalization: mapped partial records to canonical drafts.

mod coerce;
mod dates;

pub use dates::parse_execution_date;

use std::collections::BTreeMap;

use tci_model::{
    CustomColumnType, CustomValue, FieldName, ImportContext, TestCaseDraft, TestCategory,
    TestPriority, TestStatus,
};

use crate::config::ImportConfig;
use crate::map::{BOOLEAN_OPTIONS, parse_number};
use crate::validate::Issue;
use coerce::coerce_or_default;

/// Custom field holding an execution date that could not be parsed.
pub const EXECUTION_DATE_RAW_KEY: &str = "execution_date_raw";

/// A record after mapping, before normalization.
///
/// Canonical values are still raw text; custom values are already typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRecord {
    /// 1-based position in the source.
    pub source_row: usize,
    pub fields: BTreeMap<FieldName, String>,
    pub custom_fields: BTreeMap<String, CustomValue>,
}

impl PartialRecord {
    pub fn new(source_row: usize) -> Self {
        Self {
            source_row,
            ..Self::default()
        }
    }

    /// Sets a canonical field, ignoring blank values.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields.insert(field, value);
        }
    }

    /// Appends a line to a canonical field.
    pub fn append(&mut self, field: FieldName, line: &str) {
        match self.fields.get_mut(&field) {
            Some(existing) if !existing.is_empty() => {
                existing.push('\n');
                existing.push_str(line);
            }
            _ => self.set(field, line),
        }
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Sets a custom field from text; blank text becomes null.
    pub fn set_custom_text(&mut self, key: impl Into<String>, value: &str) {
        self.custom_fields
            .insert(key.into(), CustomValue::text(value.trim()));
    }
}

/// A normalized draft plus everything normalization had to repair.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub draft: TestCaseDraft,
    pub issues: Vec<Issue>,
}

/// Converts a partial record into a draft with every required value set.
///
/// Missing status, priority and category take their defaults; a blank title
/// becomes `"<prefix> <row>"`. Never fails.
pub fn normalize(record: &PartialRecord, context: &ImportContext, config: &ImportConfig) -> Normalized {
    let mut issues = Vec::new();
    let row = record.source_row;

    let title = match record.get(FieldName::Title).map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => {
            let placeholder = config.placeholder_title(row);
            issues.push(Issue::GeneratedTitle {
                placeholder: placeholder.clone(),
            });
            placeholder
        }
    };

    let mut draft = TestCaseDraft::new(context.project_id.clone(), row, title);
    draft.suite_id = context.suite_id.clone();
    draft.description = record
        .get(FieldName::Description)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    draft.status = coerce_or_default(
        FieldName::Status,
        record.get(FieldName::Status),
        TestStatus::coerce,
        &TestStatus::labels(),
        &mut issues,
    );
    draft.priority = coerce_or_default(
        FieldName::Priority,
        record.get(FieldName::Priority),
        TestPriority::coerce,
        &TestPriority::labels(),
        &mut issues,
    );
    draft.category = coerce_or_default(
        FieldName::Category,
        record.get(FieldName::Category),
        TestCategory::coerce,
        &TestCategory::labels(),
        &mut issues,
    );

    for field in FieldName::ALL {
        let Some(value) = record.get(field).map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        if let Some(slot) = draft.text_slot(field) {
            *slot = Some(value.to_string());
        }
    }

    draft.custom_fields = record.custom_fields.clone();

    if let Some(raw) = record
        .get(FieldName::ExecutionDate)
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        match parse_execution_date(raw) {
            Some(date) => draft.execution_date = Some(date),
            None => {
                issues.push(Issue::InvalidDate {
                    value: raw.to_string(),
                });
                draft
                    .custom_fields
                    .insert(EXECUTION_DATE_RAW_KEY.to_string(), CustomValue::text(raw));
            }
        }
    }

    Normalized { draft, issues }
}

/// Types a custom cell according to its column proposal.
pub fn custom_value(raw: &str, column_type: CustomColumnType, options: Option<&[String]>) -> CustomValue {
    let value = raw.trim();
    if value.is_empty() {
        return CustomValue::Null;
    }
    match column_type {
        CustomColumnType::Number => parse_number(value)
            .map(CustomValue::Number)
            .unwrap_or_else(|| CustomValue::text(value)),
        CustomColumnType::Select if options.is_some_and(is_boolean_options) => {
            parse_bool(value).map_or_else(|| CustomValue::text(value), CustomValue::Bool)
        }
        CustomColumnType::Select | CustomColumnType::Date | CustomColumnType::Text => {
            CustomValue::text(value)
        }
    }
}

fn is_boolean_options(options: &[String]) -> bool {
    options.len() == BOOLEAN_OPTIONS.len()
        && options
            .iter()
            .zip(BOOLEAN_OPTIONS)
            .all(|(option, boolean)| option == boolean)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "enabled" | "active" | "on" => Some(true),
        "no" | "n" | "false" | "0" | "disabled" | "inactive" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> ImportContext {
        ImportContext::new("proj-1").with_suite("suite-9")
    }

    #[test]
    fn test_defaults_and_placeholder_title() {
        let record = PartialRecord::new(4);
        let normalized = normalize(&record, &context(), &ImportConfig::default());
        let draft = &normalized.draft;
        assert_eq!(draft.title, "Imported Test Case 4");
        assert_eq!(draft.status, TestStatus::Pending);
        assert_eq!(draft.priority, TestPriority::Medium);
        assert_eq!(draft.category, TestCategory::Functional);
        assert_eq!(draft.suite_id.as_deref(), Some("suite-9"));
        assert_eq!(draft.source_row, 4);
        assert_eq!(
            normalized.issues,
            vec![Issue::GeneratedTitle {
                placeholder: "Imported Test Case 4".to_string()
            }]
        );
    }

    #[test]
    fn test_fields_are_trimmed_and_coerced() {
        let mut record = PartialRecord::new(1);
        record.set(FieldName::Title, "  Login works ");
        record.set(FieldName::Status, "passed");
        record.set(FieldName::Priority, "P0 - Critical");
        record.set(FieldName::Category, "smoke");
        record.set(FieldName::ExpectedResult, " Dashboard ");
        record.set(FieldName::ExecutionDate, "2024-05-01");
        record.set(FieldName::Notes, "   ");

        let normalized = normalize(&record, &context(), &ImportConfig::default());
        let draft = normalized.draft;
        assert!(normalized.issues.is_empty());
        assert_eq!(draft.title, "Login works");
        assert_eq!(draft.status, TestStatus::Passed);
        assert_eq!(draft.priority, TestPriority::Critical);
        assert_eq!(draft.category, TestCategory::Smoke);
        assert_eq!(draft.expected_result.as_deref(), Some("Dashboard"));
        assert_eq!(draft.execution_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn test_unparseable_date_is_kept() {
        let mut record = PartialRecord::new(2);
        record.set(FieldName::Title, "Export");
        record.set(FieldName::ExecutionDate, "next sprint");
        let normalized = normalize(&record, &context(), &ImportConfig::default());
        assert_eq!(normalized.draft.execution_date, None);
        assert_eq!(
            normalized.draft.custom_fields[EXECUTION_DATE_RAW_KEY],
            CustomValue::Text("next sprint".to_string())
        );
        assert!(matches!(normalized.issues[0], Issue::InvalidDate { .. }));
    }

    #[test]
    fn test_custom_value_typing() {
        assert_eq!(
            custom_value("1,200", CustomColumnType::Number, None),
            CustomValue::Number(1200.0)
        );
        assert_eq!(
            custom_value("many", CustomColumnType::Number, None),
            CustomValue::Text("many".to_string())
        );
        let yes_no = vec!["Yes".to_string(), "No".to_string()];
        assert_eq!(
            custom_value("yes", CustomColumnType::Select, Some(&yes_no)),
            CustomValue::Bool(true)
        );
        let components = vec!["API".to_string(), "UI".to_string()];
        assert_eq!(
            custom_value("API", CustomColumnType::Select, Some(&components)),
            CustomValue::Text("API".to_string())
        );
        assert_eq!(custom_value(" ", CustomColumnType::Text, None), CustomValue::Null);
    }

    #[test]
    fn test_append_joins_lines() {
        let mut record = PartialRecord::new(1);
        record.append(FieldName::StepsToReproduce, "1. Open");
        record.append(FieldName::StepsToReproduce, "2. Click");
        assert_eq!(record.get(FieldName::StepsToReproduce), Some("1. Open\n2. Click"));
    }
}
