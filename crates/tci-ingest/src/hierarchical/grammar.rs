//! Line grammar for numbered outline documents.
//!
//! Classification is context-free except for the priority block, whose lines
//! read differently from outline lines; see [`classify`].

use std::sync::LazyLock;

use regex::Regex;

/// `1. AUTHENTICATION`
pub(crate) static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("Invalid section regex"));

/// `1.1 Login` or `1.1. Login`
pub(crate) static SUBSECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+)\.?\s+(.+)$").expect("Invalid subsection regex")
});

/// `TC001: Verify login`, `TC-001. Verify login`
pub(crate) static CASE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{1,4}-?\d+)[:.]\s*(.*)$").expect("Invalid test case marker regex")
});

/// A bare test case id inside the priority block.
static CASE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,4}-?\d+$").expect("Invalid test case id regex"));

/// `TEST EXECUTION PRIORITY`, optionally numbered and with a trailing colon.
static PRIORITY_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+\.\s*)?test\s+execution\s+priority\s*:?$")
        .expect("Invalid priority block regex")
});

/// `P0 - Critical`
static PRIORITY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^P\d\s*-.*$").expect("Invalid priority label regex"));

/// Labelled attribute lines inside a test case body.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(expected\s+results?|priority|automation\s+status|description)\s*:\s*(.*)$")
        .expect("Invalid attribute regex")
});

/// Labelled attribute of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Description,
    ExpectedResult,
    Priority,
    AutomationStatus,
}

impl Attribute {
    fn from_label(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        if label.starts_with("expected") {
            Self::ExpectedResult
        } else if label.starts_with("automation") {
            Self::AutomationStatus
        } else if label == "priority" {
            Self::Priority
        } else {
            Self::Description
        }
    }
}

/// Classified outline line. Borrowed slices are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Blank,
    Section {
        number: u32,
        title: &'a str,
        /// Written in ALL CAPS.
        shouted: bool,
        /// The next non-blank line is an `N.M` subsection of this number.
        /// Set by the parser, which can see past the current line.
        leads_subsection: bool,
    },
    Subsection {
        key: &'a str,
        /// Section number the key belongs to (`2` in `2.1`).
        major: u32,
        title: &'a str,
    },
    CaseMarker {
        id: &'a str,
        title: &'a str,
    },
    Attribute {
        attribute: Attribute,
        value: &'a str,
    },
    PriorityBlock,
    PriorityLabel(&'a str),
    /// Test case ids listed under a priority label.
    IdList(Vec<&'a str>),
    Text(&'a str),
}

/// Classifies one line.
///
/// Inside the priority block only section headers, the block marker,
/// priority labels and id lists are recognized; anything else is text.
pub(crate) fn classify(line: &str, in_priority_block: bool) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if PRIORITY_BLOCK_RE.is_match(line) {
        return LineKind::PriorityBlock;
    }
    if in_priority_block {
        if PRIORITY_LABEL_RE.is_match(line) {
            return LineKind::PriorityLabel(line.trim_end_matches(':').trim_end());
        }
        if let Some(kind) = section(line) {
            return kind;
        }
        return match id_list(line) {
            Some(ids) => LineKind::IdList(ids),
            None => LineKind::Text(line),
        };
    }
    if let Some(kind) = section(line) {
        return kind;
    }
    if let Some(caps) = SUBSECTION_RE.captures(line) {
        let key = caps.get(1).map_or("", |m| m.as_str());
        return LineKind::Subsection {
            key,
            major: key_major(key),
            title: caps.get(2).map_or("", |m| m.as_str().trim()),
        };
    }
    if let Some(caps) = CASE_MARKER_RE.captures(line) {
        return LineKind::CaseMarker {
            id: caps.get(1).map_or("", |m| m.as_str()),
            title: caps.get(2).map_or("", |m| m.as_str().trim()),
        };
    }
    if let Some(caps) = ATTRIBUTE_RE.captures(line) {
        return LineKind::Attribute {
            attribute: Attribute::from_label(caps.get(1).map_or("", |m| m.as_str())),
            value: caps.get(2).map_or("", |m| m.as_str().trim()),
        };
    }
    LineKind::Text(line)
}

fn section(line: &str) -> Option<LineKind<'_>> {
    let caps = SECTION_RE.captures(line)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let title = caps.get(2)?.as_str().trim();
    Some(LineKind::Section {
        number,
        title,
        shouted: is_all_caps(title),
        leads_subsection: false,
    })
}

fn key_major(key: &str) -> u32 {
    key.split('.').next().and_then(|n| n.parse().ok()).unwrap_or(0)
}

/// Section number of an `N.M` subsection line, if `line` is one.
pub(crate) fn subsection_major(line: &str) -> Option<u32> {
    let line = line.trim();
    if SECTION_RE.is_match(line) {
        return None;
    }
    let caps = SUBSECTION_RE.captures(line)?;
    Some(key_major(caps.get(1)?.as_str()))
}

/// Splits `- TC001, TC002` into ids.
///
/// A line repeating a case marker (`- TC001: Verify login`) yields its id.
/// Returns `None` when any token is not an id.
fn id_list(line: &str) -> Option<Vec<&str>> {
    let body = line.trim_start_matches(['-', '*', '•']).trim();
    if let Some(caps) = CASE_MARKER_RE.captures(body) {
        let id = caps.get(1)?.as_str();
        let rest = caps.get(2).map_or("", |m| m.as_str());
        if !rest.is_empty() && !rest.contains(',') {
            return Some(vec![id]);
        }
    }
    let ids: Vec<&str> = body
        .split([',', ';'])
        .flat_map(str::split_whitespace)
        .map(|token| token.trim_start_matches(['-', '*', '•']))
        .filter(|token| !token.is_empty())
        .collect();
    if ids.is_empty() || !ids.iter().all(|id| CASE_ID_RE.is_match(id)) {
        return None;
    }
    Some(ids)
}

/// Returns true when every letter is uppercase (`USER MANAGEMENT`).
///
/// Numbered steps (`2. Click Submit`) mix cases and are not headings.
pub(crate) fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}
