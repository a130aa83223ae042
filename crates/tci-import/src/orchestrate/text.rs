//! Line-based extraction for structured and freeform text.

use tci_ingest::{StructuredKey, known_key_value};
use tci_model::FieldName;

use super::{Extraction, TEST_CASE_ID_KEY};
use crate::normalize::PartialRecord;

/// Fields that collect every following line once opened.
fn is_multiline(field: FieldName) -> bool {
    matches!(
        field,
        FieldName::Description
            | FieldName::StepsToReproduce
            | FieldName::ExpectedResult
            | FieldName::ActualResult
            | FieldName::Prerequisites
            | FieldName::Notes
    )
}

/// Lines belonging to one test case.
#[derive(Debug)]
struct TextBlock {
    record: PartialRecord,
    has_case_id: bool,
    /// Field opened by an empty `Key:` line; continuation lines go there.
    open: Option<FieldName>,
    /// Lines with no recognized key.
    loose: Vec<String>,
    lines: usize,
}

impl TextBlock {
    fn new(source_row: usize) -> Self {
        Self {
            record: PartialRecord::new(source_row),
            has_case_id: false,
            open: None,
            loose: Vec::new(),
            lines: 0,
        }
    }

    fn has(&self, key: StructuredKey) -> bool {
        match key {
            StructuredKey::CaseId => self.has_case_id,
            StructuredKey::Field(field) => self.record.fields.contains_key(&field),
        }
    }

    fn push_key(&mut self, key: StructuredKey, value: &str) {
        self.lines += 1;
        self.open = None;
        match key {
            StructuredKey::CaseId => {
                self.record.set_custom_text(TEST_CASE_ID_KEY, value);
                self.has_case_id = true;
            }
            StructuredKey::Field(field) if value.is_empty() => self.open = Some(field),
            StructuredKey::Field(field) if is_multiline(field) => self.record.append(field, value),
            StructuredKey::Field(field) => self.record.set(field, value),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.lines += 1;
        match self.open {
            Some(field) => {
                self.record.append(field, line);
                if !is_multiline(field) {
                    self.open = None;
                }
            }
            None => self.loose.push(line.to_string()),
        }
    }

    /// Untitled blocks take their first loose line as title; the remaining
    /// loose lines extend the description.
    fn finish(self) -> PartialRecord {
        let mut record = self.record;
        let mut loose = self.loose.into_iter();
        if record.get(FieldName::Title).is_none()
            && let Some(first) = loose.next()
        {
            record.set(FieldName::Title, first);
        }
        for line in loose {
            record.append(FieldName::Description, &line);
        }
        record
    }
}

fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// One record per block; a repeated title or id key starts a new block.
pub(super) fn extract_structured(text: &str) -> Extraction {
    let mut records = Vec::new();
    let mut current = TextBlock::new(1);

    for line in content_lines(text) {
        match known_key_value(line) {
            Some((key, value)) => {
                let starts_block = key.is_title() || key == StructuredKey::CaseId;
                if starts_block && current.has(key) {
                    let next = TextBlock::new(records.len() + 2);
                    records.push(std::mem::replace(&mut current, next).finish());
                }
                current.push_key(key, value);
            }
            None => current.push_line(line),
        }
    }
    if current.lines > 0 {
        records.push(current.finish());
    }

    tracing::debug!(blocks = records.len(), "extracted structured blocks");
    Extraction {
        records,
        ..Extraction::default()
    }
}

/// The whole text as one record; empty text yields none.
pub(super) fn extract_freeform(text: &str) -> Extraction {
    let mut block = TextBlock::new(1);
    for line in content_lines(text) {
        match known_key_value(line) {
            Some((key, value)) => block.push_key(key, value),
            None => block.push_line(line),
        }
    }
    let records = if block.lines > 0 {
        vec![block.finish()]
    } else {
        Vec::new()
    };
    Extraction {
        records,
        ..Extraction::default()
    }
}
