//! Integration tests for the file-level pipeline helpers.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use tci_cli::pipeline::{build_context, column_report, load_config, preview, read_input};
use tci_import::ImportConfig;
use tci_model::{ColumnTarget, CustomColumnType, FieldName, InputFormat, TestPriority};

fn temp_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_input_decodes_utf16_with_bom() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "Title,Status\nLogin,Passed\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let file = temp_file(&bytes);
    let text = read_input(file.path()).unwrap();
    assert_eq!(text, "Title,Status\nLogin,Passed\n");
}

#[test]
fn test_read_input_missing_file() {
    let err = read_input(Path::new("/definitely/not/here.csv")).unwrap_err();
    assert!(err.to_string().starts_with("read /definitely/not/here.csv"));
}

#[test]
fn test_load_config_from_toml() {
    let file = temp_file(b"max_rows = 2\nplaceholder_title_prefix = \"Draft\"\n");
    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.max_rows, 2);
    assert_eq!(config.placeholder_title(3), "Draft 3");
    assert_eq!(config.max_title_length, 255);

    assert_eq!(load_config(None).unwrap(), ImportConfig::default());

    let broken = temp_file(b"max_rows = \"many\"\n");
    assert!(load_config(Some(broken.path())).is_err());
}

#[test]
fn test_build_context_with_overrides() {
    let overrides = vec!["Summary=title".to_string(), "Internal=skip".to_string()];
    let context = build_context("proj-1", Some("suite-1"), &overrides).unwrap();
    assert_eq!(context.suite_id.as_deref(), Some("suite-1"));
    assert_eq!(
        context.override_for("summary"),
        Some(ColumnTarget::Field(FieldName::Title))
    );
    assert_eq!(context.override_for("Internal"), Some(ColumnTarget::Skip));

    let err = build_context("proj-1", None, &["Summary".to_string()]).unwrap_err();
    assert!(err.to_string().contains("Invalid column override 'Summary'"));
}

#[test]
fn test_column_report_for_csv_file() {
    let file = temp_file(b"Title,Priority,Bug Count,Internal\nLogin,High,3,x\nLogout,Low,0,y\n");
    let text = read_input(file.path()).unwrap();
    let context = build_context("", None, &["Internal=skip".to_string()]).unwrap();
    let report = column_report(&text, &context, &ImportConfig::default()).unwrap();

    assert_eq!(report.detected.format, InputFormat::Csv);
    assert_eq!(report.mappings.len(), 4);
    assert!(report.mappings[3].is_ignored());
    assert_eq!(report.proposed_columns.len(), 1);
    assert_eq!(report.proposed_columns[0].inferred_type, CustomColumnType::Number);
}

#[test]
fn test_column_report_rejects_text() {
    let context = build_context("", None, &[]).unwrap();
    let err = column_report("Just a sentence\n", &context, &ImportConfig::default()).unwrap_err();
    assert!(err.to_string().contains("freeform"));
}

#[test]
fn test_preview_outline_file() {
    let file = temp_file(
        b"1. CHECKOUT\n1.1 Payment\nTC010: Pay by card\nExpected Result: Order is placed\n\n\
          TEST EXECUTION PRIORITY\nP1 - High\n- TC010\n",
    );
    let text = read_input(file.path()).unwrap();
    let context = build_context("proj-1", None, &[]).unwrap();
    let outcome = preview(&text, &context, &ImportConfig::default());

    assert_eq!(outcome.format, InputFormat::Hierarchical);
    assert_eq!(outcome.drafts.len(), 1);
    assert_eq!(outcome.drafts[0].priority, TestPriority::High);
    assert!(!outcome.has_invalid_drafts());
}
