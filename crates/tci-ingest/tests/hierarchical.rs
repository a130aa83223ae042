//! Outline parsing over realistic documents.

use proptest::prelude::*;
use tci_ingest::{IMPLICIT_GROUP_TITLE, parse_hierarchical};

const PLAN: &str = "\
1. AUTHENTICATION
1.1 Login
TC001: Verify login with valid credentials
Description: Registered user signs in
Steps:
1. Open the login page
2. Enter valid credentials

Expected Result: User lands on the dashboard
Automation Status: Automated

TC002: Verify login with wrong password
Expected Result: Error banner is shown
Priority: Low

1.2 Password Reset
TC003: Reset link is emailed
Expected Result: Email arrives within a minute

2. USER MANAGEMENT
2.1 Profiles
TC-004. Edit display name
Expected Result: Name is updated

TEST EXECUTION PRIORITY:
P0 - Critical
- TC001, TC003
P1 - High
- TC002
- TC-004: Edit display name
Anything not listed runs last
";

#[test]
fn parses_full_plan() {
    let doc = parse_hierarchical(PLAN).unwrap();

    let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["AUTHENTICATION", "USER MANAGEMENT"]);

    let auth = &doc.sections[0];
    let keys: Vec<_> = auth.subsections.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["1.1", "1.2"]);

    let ids: Vec<_> = doc.test_cases().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["TC001", "TC002", "TC003", "TC-004"]);

    let login = doc.find("TC001").unwrap();
    assert_eq!(login.title, "Verify login with valid credentials");
    assert_eq!(
        login.description.as_deref(),
        Some("Registered user signs in\nSteps:\n1. Open the login page\n2. Enter valid credentials")
    );
    assert_eq!(login.expected_result.as_deref(), Some("User lands on the dashboard"));
    assert_eq!(login.automation_status.as_deref(), Some("Automated"));
    assert_eq!(login.priority.as_deref(), Some("P0 - Critical"));

    // The block label replaces the inline value.
    assert_eq!(doc.find("TC002").unwrap().priority.as_deref(), Some("P1 - High"));
    assert_eq!(doc.find("TC-004").unwrap().subsection, "Profiles");
    assert_eq!(doc.find("TC-004").unwrap().section, "USER MANAGEMENT");

    assert_eq!(doc.priority_assignments.len(), 4);
    assert_eq!(doc.warnings.len(), 1);
    assert!(doc.warnings[0].contains("Anything not listed"));
}

#[test]
fn outline_after_priority_block_resumes() {
    let text = "\
TEST EXECUTION PRIORITY
P2 - Medium
- TC9
3. REPORTING
3.1 Exports
TC9: Export to CSV
";
    let doc = parse_hierarchical(text).unwrap();
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.find("TC9").unwrap().priority.as_deref(), Some("P2 - Medium"));
    assert!(doc.warnings.is_empty());
}

#[test]
fn subsection_without_section_gets_implicit_section() {
    let doc = parse_hierarchical("1.1 Login\nTC1: A\n").unwrap();
    assert_eq!(doc.sections[0].title, IMPLICIT_GROUP_TITLE);
    assert_eq!(doc.sections[0].subsections[0].title, "Login");
}

#[test]
fn sentence_case_headings_after_test_cases() {
    let text = "\
1. Authentication
1.1 Login
TC001: Verify login
Expected Result: ok

1.2 Password reset
TC002: Reset link
Expected Result: Email arrives

2. API tests
2.1 Tokens
TC003: Refresh
";
    let doc = parse_hierarchical(text).unwrap();

    let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Authentication", "API tests"]);
    let keys: Vec<_> = doc.sections[0]
        .subsections
        .iter()
        .map(|s| s.key.as_str())
        .collect();
    assert_eq!(keys, vec!["1.1", "1.2"]);

    assert_eq!(doc.find("TC001").unwrap().description, None);
    assert_eq!(doc.find("TC002").unwrap().subsection, "Password reset");
    assert_eq!(doc.find("TC002").unwrap().description, None);
    let refresh = doc.find("TC003").unwrap();
    assert_eq!(refresh.section, "API tests");
    assert_eq!(refresh.subsection, "Tokens");
}

#[test]
fn title_case_steps_stay_in_the_test_case() {
    let text = "\
1. CHECKOUT
1.1 Payment
TC010: Pay by card
1. Open The Cart
2. Click Submit
3. Confirm Payment
Expected Result: Order is placed
TC011: Pay by voucher
";
    let doc = parse_hierarchical(text).unwrap();

    assert_eq!(doc.sections.len(), 1);
    let card = doc.find("TC010").unwrap();
    assert_eq!(
        card.description.as_deref(),
        Some("1. Open The Cart\n2. Click Submit\n3. Confirm Payment")
    );
    assert_eq!(card.expected_result.as_deref(), Some("Order is placed"));
    assert_eq!(doc.find("TC011").unwrap().subsection, "Payment");
}

proptest! {
    #[test]
    fn never_panics_and_keeps_marker_order(
        titles in proptest::collection::vec("[A-Za-z ]{1,20}", 1..8),
    ) {
        let mut text = String::from("1. SUITE\n1.1 Cases\n");
        for (idx, title) in titles.iter().enumerate() {
            text.push_str(&format!("TC{idx}: {title}\nsome detail\n"));
        }
        let doc = parse_hierarchical(&text).unwrap();
        let ids: Vec<String> = doc.test_cases().map(|c| c.id.clone()).collect();
        let expected: Vec<String> = (0..titles.len()).map(|idx| format!("TC{idx}")).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,300}") {
        let _ = parse_hierarchical(&text);
    }
}
