//! Numbered outline parsing.
//!
//! Documents look like:
//!
//! ```text
//! 1. AUTHENTICATION
//! 1.1 Login
//! TC001: Verify login with valid credentials
//! Expected Result: User is logged in
//!
//! TEST EXECUTION PRIORITY
//! P0 - Critical
//! - TC001
//! ```
//!
//! The walk is a finite-state machine over lines ([`ParserState`]); each
//! line is classified, the transition function picks the next state and an
//! action, and a builder applies the action to the tree. Priority block
//! assignments are applied in a second pass once every case is known.

mod document;
mod grammar;
mod state;

pub use document::{
    HierarchicalDocument, HierarchicalTestCase, IMPLICIT_GROUP_TITLE, Section, Subsection,
};
pub use grammar::Attribute;
pub use state::ParserState;

pub(crate) use grammar::{LineKind, classify};

use grammar::subsection_major;

use crate::error::{IngestError, Result};
use state::{Action, transition};

/// Parses an outline document.
///
/// Fails only when the text has no non-blank lines; everything else is
/// best-effort, with problems recorded in
/// [`HierarchicalDocument::warnings`].
pub fn parse_hierarchical(text: &str) -> Result<HierarchicalDocument> {
    if text.lines().all(|line| line.trim().is_empty()) {
        return Err(IngestError::EmptyDocument);
    }

    let lines: Vec<&str> = text
        .lines()
        .map(|raw| raw.strip_prefix('\u{feff}').unwrap_or(raw))
        .collect();
    let mut builder = DocumentBuilder::default();
    let mut state = ParserState::Root;
    for (idx, &raw) in lines.iter().enumerate() {
        let mut kind = classify(raw, state.in_priority_block());
        if let LineKind::Section {
            number,
            leads_subsection,
            ..
        } = &mut kind
        {
            *leads_subsection = next_subsection_major(&lines[idx + 1..]) == Some(*number);
        }
        let (next, action) = transition(&state, kind, raw);
        if next != state {
            tracing::trace!(line = idx + 1, from = state.name(), to = next.name(), "outline state change");
        }
        builder.apply(action);
        state = next;
    }

    let document = builder.finish();
    tracing::debug!(
        sections = document.sections.len(),
        test_cases = document.test_case_count(),
        priority_assignments = document.priority_assignments.len(),
        warnings = document.warnings.len(),
        "parsed outline document"
    );
    Ok(document)
}

fn next_subsection_major(rest: &[&str]) -> Option<u32> {
    let line = rest.iter().find(|line| !line.trim().is_empty())?;
    subsection_major(line)
}

#[derive(Debug, Default)]
struct DocumentBuilder {
    document: HierarchicalDocument,
    /// Index of the open subsection within the last section.
    subsection: Option<usize>,
}

impl DocumentBuilder {
    fn apply(&mut self, action: Action<'_>) {
        match action {
            Action::Ignore => {}
            Action::OpenSection { title } => {
                self.document.sections.push(Section::new(title));
                self.subsection = None;
            }
            Action::OpenSubsection {
                key,
                title,
                new_section,
            } => {
                if new_section {
                    self.document.sections.push(Section::new(IMPLICIT_GROUP_TITLE));
                    self.subsection = None;
                }
                self.open_subsection(key, title);
            }
            Action::OpenTestCase { id, title } => self.open_test_case(id, title),
            Action::SetAttribute { attribute, value } => self.set_attribute(attribute, value),
            Action::AppendDescription(text) => {
                if let Some(case) = self.current_case() {
                    match &mut case.description {
                        Some(description) => {
                            description.push('\n');
                            description.push_str(text);
                        }
                        None => case.description = Some(text.to_string()),
                    }
                }
            }
            Action::AssignPriority { label, ids } => {
                for id in ids {
                    self.assign_priority(id, &label);
                }
            }
            Action::Warn(message) => {
                tracing::debug!(%message, "outline warning");
                self.document.warnings.push(message);
            }
        }
    }

    fn open_subsection(&mut self, key: &str, title: &str) {
        if self.document.sections.is_empty() {
            self.document.sections.push(Section::new(IMPLICIT_GROUP_TITLE));
        }
        let Some(section) = self.document.sections.last_mut() else {
            return;
        };
        // A repeated key reopens the earlier subsection.
        if let Some(idx) = section.subsections.iter().position(|s| s.key == key) {
            self.subsection = Some(idx);
            return;
        }
        section.subsections.push(Subsection {
            key: key.to_string(),
            title: title.to_string(),
            test_cases: Vec::new(),
        });
        self.subsection = Some(section.subsections.len() - 1);
    }

    fn open_test_case(&mut self, id: &str, title: &str) {
        if self.subsection.is_none() {
            self.open_subsection("", IMPLICIT_GROUP_TITLE);
        }
        let Some(idx) = self.subsection else {
            return;
        };
        let Some(section) = self.document.sections.last_mut() else {
            return;
        };
        let section_title = section.title.clone();
        let Some(subsection) = section.subsections.get_mut(idx) else {
            return;
        };
        subsection.test_cases.push(HierarchicalTestCase {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            expected_result: None,
            priority: None,
            automation_status: None,
            section: section_title,
            subsection: subsection.title.clone(),
        });
    }

    fn set_attribute(&mut self, attribute: Attribute, value: &str) {
        let Some(case) = self.current_case() else {
            return;
        };
        if value.is_empty() {
            return;
        }
        let slot = match attribute {
            Attribute::Description => &mut case.description,
            Attribute::ExpectedResult => &mut case.expected_result,
            Attribute::Priority => &mut case.priority,
            Attribute::AutomationStatus => &mut case.automation_status,
        };
        *slot = Some(value.to_string());
    }

    fn current_case(&mut self) -> Option<&mut HierarchicalTestCase> {
        let idx = self.subsection?;
        self.document
            .sections
            .last_mut()?
            .subsections
            .get_mut(idx)?
            .test_cases
            .last_mut()
    }

    fn assign_priority(&mut self, id: &str, label: &str) {
        let assignments = &mut self.document.priority_assignments;
        if let Some(existing) = assignments
            .keys()
            .find(|known| known.eq_ignore_ascii_case(id))
        {
            let message = format!(
                "Test case {id} already has priority '{}'; ignoring '{label}'",
                assignments[existing]
            );
            self.document.warnings.push(message);
            return;
        }
        assignments.insert(id.to_string(), label.to_string());
    }

    /// Applies priority assignments onto matching test cases.
    fn finish(mut self) -> HierarchicalDocument {
        let assignments = self.document.priority_assignments.clone();
        for (id, label) in &assignments {
            let mut found = false;
            for case in self
                .document
                .sections
                .iter_mut()
                .flat_map(|section| section.subsections.iter_mut())
                .flat_map(|subsection| subsection.test_cases.iter_mut())
                .filter(|case| case.id.eq_ignore_ascii_case(id))
            {
                case.priority = Some(label.clone());
                found = true;
            }
            if !found {
                self.document
                    .warnings
                    .push(format!("Priority assigned to unknown test case {id}"));
            }
        }
        self.document
    }
}
