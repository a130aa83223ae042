//! Outline parser states and the transition function.

use super::grammar::{Attribute, LineKind};

/// Where the walk currently is.
///
/// Section-scoped states remember the number of the open section so a
/// numbered step inside a test case can be told apart from the next section,
/// and a subsection from another section is not filed under this one.
/// Implicit sections opened by a test case marker have number 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Root,
    InSection { section: u32 },
    InSubsection { section: u32 },
    InTestCaseBody { section: u32 },
    /// Inside `TEST EXECUTION PRIORITY`; holds the current `P<n>` label.
    InPriorityBlock { label: Option<String> },
}

impl ParserState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::InSection { .. } => "section",
            Self::InSubsection { .. } => "subsection",
            Self::InTestCaseBody { .. } => "test_case_body",
            Self::InPriorityBlock { .. } => "priority_block",
        }
    }

    pub fn in_priority_block(&self) -> bool {
        matches!(self, Self::InPriorityBlock { .. })
    }

    fn section_number(&self) -> u32 {
        match self {
            Self::InSection { section }
            | Self::InSubsection { section }
            | Self::InTestCaseBody { section } => *section,
            Self::Root | Self::InPriorityBlock { .. } => 0,
        }
    }
}

/// What the document builder should do for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action<'a> {
    Ignore,
    OpenSection { title: &'a str },
    /// `new_section` opens an implicit section first; the key belongs to a
    /// section whose header never appeared.
    OpenSubsection {
        key: &'a str,
        title: &'a str,
        new_section: bool,
    },
    OpenTestCase { id: &'a str, title: &'a str },
    SetAttribute { attribute: Attribute, value: &'a str },
    AppendDescription(&'a str),
    AssignPriority { label: String, ids: Vec<&'a str> },
    Warn(String),
}

/// Pure transition: the next state plus the action for this line.
pub(crate) fn transition<'a>(
    state: &ParserState,
    line: LineKind<'a>,
    raw: &'a str,
) -> (ParserState, Action<'a>) {
    let section = state.section_number();
    match (state, line) {
        (_, LineKind::Blank) => (state.clone(), Action::Ignore),
        (_, LineKind::PriorityBlock) => (
            ParserState::InPriorityBlock { label: None },
            Action::Ignore,
        ),

        // Priority block
        (ParserState::InPriorityBlock { .. }, LineKind::PriorityLabel(label)) => (
            ParserState::InPriorityBlock {
                label: Some(label.to_string()),
            },
            Action::Ignore,
        ),
        (ParserState::InPriorityBlock { label }, LineKind::IdList(ids)) => match label {
            Some(label) => (
                state.clone(),
                Action::AssignPriority {
                    label: label.clone(),
                    ids,
                },
            ),
            None => (
                state.clone(),
                Action::Warn(format!(
                    "Priority line '{}' appears before any priority label",
                    raw.trim()
                )),
            ),
        },
        (ParserState::InPriorityBlock { .. }, LineKind::Section { number, title, .. }) => (
            ParserState::InSection { section: number },
            Action::OpenSection { title },
        ),
        (ParserState::InPriorityBlock { .. }, _) => (
            state.clone(),
            Action::Warn(format!("Skipped ambiguous priority line '{}'", raw.trim())),
        ),

        // Numbered lines inside a test case are steps unless they continue
        // the outline.
        (
            ParserState::InTestCaseBody { .. },
            LineKind::Section {
                number,
                title,
                shouted,
                leads_subsection,
            },
        ) => {
            if number > section && (shouted || leads_subsection) {
                (
                    ParserState::InSection { section: number },
                    Action::OpenSection { title },
                )
            } else {
                (state.clone(), Action::AppendDescription(raw.trim()))
            }
        }
        (ParserState::InTestCaseBody { .. }, LineKind::Attribute { attribute, value }) => {
            (state.clone(), Action::SetAttribute { attribute, value })
        }
        (ParserState::InTestCaseBody { .. }, LineKind::Text(text)) => {
            (state.clone(), Action::AppendDescription(text))
        }

        // Outline structure
        (_, LineKind::Section { number, title, .. }) => (
            ParserState::InSection { section: number },
            Action::OpenSection { title },
        ),
        (_, LineKind::Subsection { key, major, title }) => (
            ParserState::InSubsection { section: major },
            Action::OpenSubsection {
                key,
                title,
                new_section: major != section,
            },
        ),
        (_, LineKind::CaseMarker { id, title }) => (
            ParserState::InTestCaseBody { section },
            Action::OpenTestCase { id, title },
        ),

        // Text, attributes and priority lines outside a test case body.
        (_, _) => (state.clone(), Action::Ignore),
    }
}
