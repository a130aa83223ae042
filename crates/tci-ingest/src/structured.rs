//! `Key: value` line grammar for keyword-structured test cases.

use std::sync::LazyLock;

use regex::Regex;
use tci_model::{FieldName, normalize_label};

/// `Key: value`, with an optional bullet before the key.
static KEY_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s*)?([A-Za-z][A-Za-z0-9 _/()#-]{0,40}?)\s*:\s*(.*?)\s*$")
        .expect("Invalid key-value regex")
});

/// What a recognized key stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuredKey {
    Field(FieldName),
    /// An external test case identifier ("Test Case ID", "ID").
    CaseId,
}

impl StructuredKey {
    /// Title keys open a new test case block.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Field(FieldName::Title))
    }
}

/// A `Key: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Splits a `Key: value` line. The value may be empty.
pub fn parse_key_value(line: &str) -> Option<KeyValue<'_>> {
    let caps = KEY_VALUE_RE.captures(line)?;
    let key = caps.get(1)?.as_str().trim();
    let value = caps.get(2).map_or("", |m| m.as_str());
    Some(KeyValue { key, value })
}

/// Resolves a structured-text key (case-insensitive) to what it names.
pub fn known_key(key: &str) -> Option<StructuredKey> {
    let field = match normalize_label(key).as_str() {
        "test case" | "test case name" | "test case title" | "test" | "test name" | "title"
        | "name" | "summary" | "scenario" => FieldName::Title,
        "test case id" | "id" | "case id" | "tc id" => return Some(StructuredKey::CaseId),
        "description" | "desc" | "objective" => FieldName::Description,
        "steps" | "test steps" | "steps to reproduce" | "procedure" => FieldName::StepsToReproduce,
        "expected result" | "expected results" | "expected" | "expected outcome" => {
            FieldName::ExpectedResult
        }
        "actual result" | "actual results" | "actual" => FieldName::ActualResult,
        "priority" => FieldName::Priority,
        "status" => FieldName::Status,
        "category" | "type" => FieldName::Category,
        "prerequisites" | "prerequisite" | "preconditions" | "precondition" | "setup" => {
            FieldName::Prerequisites
        }
        "environment" | "env" => FieldName::Environment,
        "platform" | "os" => FieldName::Platform,
        "assigned to" | "assigned tester" | "tester" | "owner" => FieldName::AssignedTester,
        "execution date" | "executed on" | "date" => FieldName::ExecutionDate,
        "notes" | "note" | "comments" | "comment" => FieldName::Notes,
        _ => return None,
    };
    Some(StructuredKey::Field(field))
}

/// Parses a line and resolves its key in one step.
pub fn known_key_value(line: &str) -> Option<(StructuredKey, &str)> {
    let kv = parse_key_value(line)?;
    known_key(kv.key).map(|key| (key, kv.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        let kv = parse_key_value("Expected Result:  User is logged in ").unwrap();
        assert_eq!(kv.key, "Expected Result");
        assert_eq!(kv.value, "User is logged in");

        let kv = parse_key_value("- Steps:").unwrap();
        assert_eq!(kv.key, "Steps");
        assert_eq!(kv.value, "");

        assert!(parse_key_value("no colon here").is_none());
        assert!(parse_key_value(": orphan value").is_none());
    }

    #[test]
    fn test_known_keys_are_case_insensitive() {
        assert_eq!(
            known_key("TEST CASE"),
            Some(StructuredKey::Field(FieldName::Title))
        );
        assert_eq!(
            known_key("expected_result"),
            Some(StructuredKey::Field(FieldName::ExpectedResult))
        );
        assert_eq!(known_key("Test Case ID"), Some(StructuredKey::CaseId));
        assert_eq!(known_key("Mood"), None);
    }

    #[test]
    fn test_known_key_value() {
        let (key, value) = known_key_value("Priority: High").unwrap();
        assert_eq!(key, StructuredKey::Field(FieldName::Priority));
        assert_eq!(value, "High");
        assert!(known_key_value("Weather: sunny").is_none());
    }
}
