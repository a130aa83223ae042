//! End-to-end imports through the orchestrator.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tci_import::{ImportConfig, Importer, build_mapping_set, map_column, run, run_with_config};
use tci_model::{
    ColumnTarget, ConfidenceTier, CustomColumnType, CustomValue, FieldName, ImportContext,
    InputFormat, RawInput, TestCategory, TestPriority, TestStatus,
};

fn context() -> ImportContext {
    ImportContext::new("proj-1")
}

#[test]
fn canonical_headers_map_at_high_tier() {
    for field in FieldName::ALL {
        let found = map_column(field.label());
        assert_eq!(found.target, ColumnTarget::Field(field), "{}", field.label());
        assert_eq!(found.tier, ConfidenceTier::High, "{}", field.label());
    }
}

#[test]
fn csv_rows_become_drafts() {
    let input = RawInput::text("Test Case ID,Title,Priority,Status\nTC-001,Login Test,High,Pending\n");
    let outcome = run(&input, &context().with_suite("suite-1"));

    assert_eq!(outcome.format, InputFormat::Csv);
    assert_eq!(
        outcome.headers,
        vec!["Test Case ID", "Title", "Priority", "Status"]
    );
    assert_eq!(outcome.mappings.len(), 4);
    assert_eq!(outcome.drafts.len(), 1);

    let draft = &outcome.drafts[0];
    assert_eq!(draft.title, "Login Test");
    assert_eq!(draft.priority, TestPriority::High);
    assert_eq!(draft.status, TestStatus::Pending);
    assert_eq!(draft.category, TestCategory::Functional);
    assert_eq!(draft.suite_id.as_deref(), Some("suite-1"));
    assert_eq!(
        draft.custom_fields["test_case_id"],
        CustomValue::Text("TC-001".to_string())
    );

    assert_eq!(outcome.proposed_columns.len(), 1);
    assert_eq!(outcome.proposed_columns[0].name, "test_case_id");
    assert_eq!(outcome.proposed_columns[0].inferred_type, CustomColumnType::Text);
    assert!(outcome.errors.is_empty());
    assert!(outcome.invalid_rows.is_empty());
}

#[test]
fn bug_count_is_proposed_as_number() {
    let input = RawInput::text("Title,Bug Count\nLogin,3\nLogout,0\n");
    let outcome = run(&input, &context());
    let proposal = &outcome.proposed_columns[0];
    assert_eq!(proposal.name, "bug_count");
    assert_eq!(proposal.label, "Bug Count");
    assert_eq!(proposal.inferred_type, CustomColumnType::Number);
    assert_eq!(
        outcome.drafts[0].custom_fields["bug_count"],
        CustomValue::Number(3.0)
    );
}

#[test]
fn outline_becomes_drafts_with_priority_block() {
    let text = "\
1. AUTH
1.1 Login
TC001: Verify login
Expected Result: User is logged in

TEST EXECUTION PRIORITY
P0 - Critical
- TC001
";
    let outcome = run(&RawInput::text(text), &context());

    assert_eq!(outcome.format, InputFormat::Hierarchical);
    assert!(outcome.headers.is_empty());
    assert_eq!(outcome.drafts.len(), 1);

    let draft = &outcome.drafts[0];
    assert_eq!(draft.title, "Verify login");
    assert_eq!(draft.expected_result.as_deref(), Some("User is logged in"));
    assert_eq!(draft.priority, TestPriority::Critical);
    let custom = |key: &str| draft.custom_fields.get(key).and_then(CustomValue::as_text);
    assert_eq!(custom("test_case_id"), Some("TC001"));
    assert_eq!(custom("section"), Some("AUTH"));
    assert_eq!(custom("subsection"), Some("Login"));
    assert_eq!(custom("priority_group"), Some("P0 - Critical"));
}

#[test]
fn structured_blocks_become_drafts() {
    let text = "\
Test Case: Login works
Priority: High
Status: Passd
Expected Result: Dashboard is shown

Test Case: Logout works
Category: Regression
Execution Date: 2024-05-01
";
    let outcome = run(&RawInput::text(text), &context());

    assert_eq!(outcome.format, InputFormat::Structured);
    assert_eq!(outcome.drafts.len(), 2);
    assert_eq!(outcome.drafts[0].status, TestStatus::Pending);
    assert_eq!(outcome.drafts[1].category, TestCategory::Regression);
    assert!(outcome.drafts[1].execution_date.is_some());
    assert!(outcome.warnings.is_empty());
    assert!(!outcome.has_invalid_drafts());
    insta::assert_snapshot!(
        outcome.errors.join("\n"),
        @"Row 1: Unrecognized status 'Passd', using 'Pending' (did you mean 'Passed'?)"
    );
}

#[test]
fn unrecognized_enum_values_are_errors() {
    let outcome = run(
        &RawInput::text("Title,Status,Priority\nLogin,Done,Urgent\n"),
        &context(),
    );

    assert_eq!(outcome.drafts[0].status, TestStatus::Pending);
    assert_eq!(outcome.drafts[0].priority, TestPriority::Medium);
    assert_eq!(outcome.valid_count(), 1);
    assert!(outcome.warnings.is_empty());
    insta::assert_snapshot!(
        outcome.errors.join("\n"),
        @r"
    Row 1: Unrecognized status 'Done', using 'Pending'
    Row 1: Unrecognized priority 'Urgent', using 'Medium'
    "
    );
}

#[test]
fn missing_title_generates_placeholder_and_error() {
    let input = RawInput::text("Title,Priority\n,High\nLogin,Low\n");
    let outcome = run(&input, &context());

    assert_eq!(outcome.drafts.len(), 2);
    assert_eq!(outcome.drafts[0].title, "Imported Test Case 1");
    assert_eq!(outcome.invalid_rows, vec![1]);
    assert_eq!(outcome.valid_count(), 1);
    insta::assert_snapshot!(
        outcome.errors.join("\n"),
        @"Row 1: Title is missing; using 'Imported Test Case 1'"
    );
}

#[test]
fn blank_rows_keep_source_row_numbers() {
    let outcome = run(&RawInput::text("Title,Priority\nA,High\n,\n,Low\n"), &context());

    let rows: Vec<usize> = outcome.drafts.iter().map(|d| d.source_row).collect();
    assert_eq!(rows, vec![1, 3]);
    assert_eq!(outcome.invalid_rows, vec![3]);
    insta::assert_snapshot!(
        outcome.errors.join("\n"),
        @"Row 3: Title is missing; using 'Imported Test Case 3'"
    );
}

#[test]
fn empty_input_yields_nothing() {
    let outcome = run(&RawInput::text(""), &context());
    assert_eq!(outcome.format, InputFormat::Freeform);
    assert!(outcome.confidence <= 0.3);
    assert!(outcome.drafts.is_empty());
}

#[test]
fn header_only_csv_falls_back_to_freeform() {
    let outcome = run(&RawInput::text("Title,Status\n"), &context());
    assert_eq!(outcome.format, InputFormat::Freeform);
    assert!(outcome.confidence <= 0.3);
    assert_eq!(outcome.drafts.len(), 1);
    assert_eq!(outcome.drafts[0].title, "Title,Status");
    insta::assert_snapshot!(
        outcome.errors.join("\n"),
        @"No test cases found in csv input; imported as freeform text"
    );
}

#[test]
fn freeform_text_becomes_one_draft() {
    let outcome = run(
        &RawInput::text("Checkout fails on Safari\nHappens after adding a coupon\n"),
        &context(),
    );
    assert_eq!(outcome.format, InputFormat::Freeform);
    assert_eq!(outcome.drafts.len(), 1);
    assert_eq!(outcome.drafts[0].title, "Checkout fails on Safari");
    assert_eq!(outcome.drafts[0].description, "Happens after adding a coupon");
}

#[test]
fn row_input_skips_detection() {
    let mut row = BTreeMap::new();
    row.insert("Summary".to_string(), "Login".to_string());
    row.insert("Priority".to_string(), "critical".to_string());
    let input = RawInput::with_headers(vec!["Summary".into(), "Priority".into()], vec![row]);

    let outcome = run(&input, &context());
    assert_eq!(outcome.format, InputFormat::Csv);
    assert_eq!(outcome.confidence, 1.0);
    assert_eq!(outcome.drafts[0].title, "Login");
    assert_eq!(outcome.drafts[0].priority, TestPriority::Critical);
}

#[test]
fn manual_override_wins() {
    let input = RawInput::text("Title,Headline\nold,new\n");
    let context = context().with_override("Headline", ColumnTarget::Field(FieldName::Title));
    let outcome = run(&input, &context);
    assert_eq!(outcome.drafts[0].title, "new");
    assert_eq!(
        outcome.drafts[0].custom_fields["title"],
        CustomValue::Text("old".to_string())
    );
}

#[test]
fn limits_are_reported() {
    let config = ImportConfig::default().with_max_rows(2);
    let input = RawInput::text("Title,Status\nA,\nB,\nC,\n");
    let outcome = run_with_config(&input, &context(), &config);
    assert_eq!(outcome.drafts.len(), 2);
    insta::assert_snapshot!(
        outcome.errors.join("\n"),
        @"Input has 3 rows, over the 2 row limit; extra rows were dropped"
    );
}

#[test]
fn outcome_serializes_camel_case() {
    let outcome = Importer::default().run(&RawInput::text("Title,Status\nLogin,Passed\n"), &context());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["format"], "csv");
    assert_eq!(json["drafts"][0]["projectId"], "proj-1");
    assert!(json["proposedColumns"].as_array().unwrap().is_empty());
    assert!(json["invalidRows"].as_array().unwrap().is_empty());
}

proptest! {
    #[test]
    fn run_never_panics(text in "\\PC{0,400}") {
        let outcome = run(&RawInput::text(text.clone()), &context());
        prop_assert!((0.0..=1.0).contains(&outcome.confidence));
        prop_assert!(outcome.invalid_rows.len() <= outcome.drafts.len());
        if text.trim().is_empty() {
            prop_assert!(outcome.drafts.is_empty());
        }
    }

    #[test]
    fn mapping_set_covers_every_header(headers in prop::collection::vec("[A-Za-z _]{0,20}", 0..8)) {
        let set = build_mapping_set(&headers, &context());
        prop_assert_eq!(set.mappings.len(), headers.len());
        prop_assert_eq!(set.headers.len(), headers.len());
        let claimed: Vec<_> = set
            .mappings
            .iter()
            .filter_map(|m| m.target_field.field())
            .collect();
        let mut unique = claimed.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(claimed.len(), unique.len());
    }
}
