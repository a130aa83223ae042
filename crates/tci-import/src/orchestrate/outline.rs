//! Outline documents flattened to one record per test case.

use tci_ingest::{HierarchicalDocument, IngestError, parse_hierarchical};
use tci_model::FieldName;

use super::{
    AUTOMATION_STATUS_KEY, Extraction, PRIORITY_GROUP_KEY, SECTION_KEY, SUBSECTION_KEY,
    TEST_CASE_ID_KEY,
};
use crate::normalize::PartialRecord;

pub(super) fn extract(text: &str) -> Result<Extraction, IngestError> {
    let document = parse_hierarchical(text)?;

    let records: Vec<PartialRecord> = document
        .test_cases()
        .enumerate()
        .map(|(idx, case)| {
            let mut record = PartialRecord::new(idx + 1);
            let title = if case.title.trim().is_empty() {
                case.id.as_str()
            } else {
                case.title.as_str()
            };
            record.set(FieldName::Title, title);
            if let Some(description) = &case.description {
                record.set(FieldName::Description, description.as_str());
            }
            if let Some(expected) = &case.expected_result {
                record.set(FieldName::ExpectedResult, expected.as_str());
            }
            if let Some(priority) = &case.priority {
                record.set(FieldName::Priority, priority.as_str());
            }

            record.set_custom_text(TEST_CASE_ID_KEY, &case.id);
            record.set_custom_text(SECTION_KEY, &case.section);
            record.set_custom_text(SUBSECTION_KEY, &case.subsection);
            if let Some(status) = &case.automation_status {
                record.set_custom_text(AUTOMATION_STATUS_KEY, status);
            }
            if let Some(label) = priority_group(&document, &case.id) {
                record.set_custom_text(PRIORITY_GROUP_KEY, label);
            }
            record
        })
        .collect();

    Ok(Extraction {
        records,
        warnings: document.warnings,
        ..Extraction::default()
    })
}

fn priority_group<'a>(document: &'a HierarchicalDocument, id: &str) -> Option<&'a str> {
    document
        .priority_assignments
        .iter()
        .find(|(assigned, _)| assigned.eq_ignore_ascii_case(id))
        .map(|(_, label)| label.as_str())
}
