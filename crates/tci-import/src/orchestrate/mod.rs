//! Import orchestration: detect, extract, normalize and validate.
//!
//! The orchestrator never fails. Anything it cannot read as the detected
//! format is re-read as freeform text, so the worst case is one
//! low-confidence draft plus an explanatory error.

mod outline;
mod tabular;
mod text;

use serde::{Deserialize, Serialize};
use tci_ingest::{FREEFORM_CONFIDENCE, FormatDetector, IngestError};
use tci_model::{
    ColumnMapping, CustomColumnProposal, ImportContext, InputFormat, RawInput, TestCaseDraft,
};

use crate::config::ImportConfig;
use crate::normalize::{PartialRecord, normalize};
use crate::validate::validate_with_issues;

/// Custom field holding an external test case id.
pub const TEST_CASE_ID_KEY: &str = "test_case_id";
/// Custom field holding an outline section title.
pub const SECTION_KEY: &str = "section";
/// Custom field holding an outline subsection title.
pub const SUBSECTION_KEY: &str = "subsection";
pub const AUTOMATION_STATUS_KEY: &str = "automation_status";
/// Custom field holding the priority block label (`P0 - Critical`).
pub const PRIORITY_GROUP_KEY: &str = "priority_group";

/// Everything one import produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Format the drafts were actually read as.
    pub format: InputFormat,
    pub confidence: f32,
    /// Table headers; empty for text formats.
    pub headers: Vec<String>,
    /// Final column mappings; empty for text formats.
    pub mappings: Vec<ColumnMapping>,
    /// Cleaned drafts, valid or not, in source order.
    pub drafts: Vec<TestCaseDraft>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub proposed_columns: Vec<CustomColumnProposal>,
    /// Source rows whose drafts failed validation.
    pub invalid_rows: Vec<usize>,
}

impl ImportOutcome {
    fn empty(format: InputFormat, confidence: f32) -> Self {
        Self {
            format,
            confidence,
            headers: Vec::new(),
            mappings: Vec::new(),
            drafts: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            proposed_columns: Vec::new(),
            invalid_rows: Vec::new(),
        }
    }

    /// Number of drafts that passed validation.
    pub fn valid_count(&self) -> usize {
        self.drafts.len().saturating_sub(self.invalid_rows.len())
    }

    pub fn has_invalid_drafts(&self) -> bool {
        !self.invalid_rows.is_empty()
    }
}

/// What one extraction pass produced, before normalization.
#[derive(Debug, Default)]
struct Extraction {
    headers: Vec<String>,
    mappings: Vec<ColumnMapping>,
    proposals: Vec<CustomColumnProposal>,
    records: Vec<PartialRecord>,
    warnings: Vec<String>,
}

/// Runs imports with one configuration.
///
/// # Example
///
/// ```
/// use tci_import::{ImportConfig, Importer};
/// use tci_model::{ImportContext, InputFormat, RawInput};
///
/// let importer = Importer::new(ImportConfig::default());
/// let input = RawInput::text("Title,Priority\nLogin works,High\n");
/// let outcome = importer.run(&input, &ImportContext::new("proj-1"));
/// assert_eq!(outcome.format, InputFormat::Csv);
/// assert_eq!(outcome.drafts[0].title, "Login works");
/// ```
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
    detector: FormatDetector,
}

impl Default for Importer {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        let detector = FormatDetector::new(config.detector_options());
        Self { config, detector }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Imports one input. Never fails.
    pub fn run(&self, input: &RawInput, context: &ImportContext) -> ImportOutcome {
        let _span = tracing::info_span!("import", project = %context.project_id).entered();
        let mut errors = Vec::new();

        let (format, confidence, mut extraction) = match input {
            RawInput::Rows { headers, rows } => (
                InputFormat::Csv,
                1.0,
                tabular::extract_rows(headers, rows, context),
            ),
            RawInput::Text { text } => self.extract_text(text, context, &mut errors),
        };
        self.limit_rows(&mut extraction.records, &mut errors);

        let mut outcome = ImportOutcome::empty(format, confidence);
        outcome.errors = errors;
        outcome.warnings = extraction.warnings;
        outcome.headers = extraction.headers;
        outcome.mappings = extraction.mappings;
        outcome.proposed_columns = extraction.proposals;
        for record in &extraction.records {
            self.add_draft(record, context, &mut outcome);
        }

        tracing::info!(
            format = %outcome.format,
            confidence = outcome.confidence,
            drafts = outcome.drafts.len(),
            invalid = outcome.invalid_rows.len(),
            proposed_columns = outcome.proposed_columns.len(),
            "import finished"
        );
        outcome
    }

    fn extract_text(
        &self,
        text: &str,
        context: &ImportContext,
        errors: &mut Vec<String>,
    ) -> (InputFormat, f32, Extraction) {
        let text = self.bound_input(text, errors);
        let detected = self.detector.detect(text);
        tracing::debug!(
            format = %detected.format,
            confidence = detected.confidence,
            "detected input format"
        );

        let attempt: Result<Extraction, IngestError> = match detected.format {
            InputFormat::Csv | InputFormat::Tsv => {
                tabular::extract_delimited(text, detected.format, context)
            }
            InputFormat::Hierarchical => outline::extract(text),
            InputFormat::Structured => Ok(text::extract_structured(text)),
            InputFormat::Freeform => Ok(text::extract_freeform(text)),
        };

        let reason = match attempt {
            Ok(extraction)
                if detected.format == InputFormat::Freeform || !extraction.records.is_empty() =>
            {
                return (detected.format, detected.confidence, extraction);
            }
            Ok(_) => format!("No test cases found in {} input", detected.format),
            Err(err) => format!("Could not read input as {}: {err}", detected.format),
        };
        tracing::warn!(format = %detected.format, %reason, "falling back to freeform");
        errors.push(format!("{reason}; imported as freeform text"));
        (
            InputFormat::Freeform,
            FREEFORM_CONFIDENCE.min(detected.confidence),
            text::extract_freeform(text),
        )
    }

    /// Cuts oversize text at the last full line within the byte limit.
    fn bound_input<'a>(&self, text: &'a str, errors: &mut Vec<String>) -> &'a str {
        let limit = self.config.max_input_bytes;
        if text.len() <= limit {
            return text;
        }
        let mut cut = limit;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        let head = &text[..cut];
        let kept = head.rfind('\n').map_or(head, |idx| &head[..idx]);
        tracing::warn!(bytes = text.len(), limit, kept = kept.len(), "input truncated");
        errors.push(format!(
            "Input is {} bytes, over the {limit} byte limit; truncated to {} bytes",
            text.len(),
            kept.len()
        ));
        kept
    }

    fn limit_rows(&self, records: &mut Vec<PartialRecord>, errors: &mut Vec<String>) {
        let limit = self.config.max_rows;
        if records.len() <= limit {
            return;
        }
        tracing::warn!(rows = records.len(), limit, "rows dropped");
        errors.push(format!(
            "Input has {} rows, over the {limit} row limit; extra rows were dropped",
            records.len()
        ));
        records.truncate(limit);
    }

    fn add_draft(&self, record: &PartialRecord, context: &ImportContext, outcome: &mut ImportOutcome) {
        let row = record.source_row;
        let normalized = normalize(record, context, &self.config);
        let result = validate_with_issues(&normalized.draft, normalized.issues, &self.config);

        outcome
            .errors
            .extend(result.errors.iter().map(|message| format!("Row {row}: {message}")));
        outcome
            .warnings
            .extend(result.warnings.iter().map(|message| format!("Row {row}: {message}")));
        if !result.is_valid {
            outcome.invalid_rows.push(row);
        }
        outcome.drafts.push(result.cleaned_draft);
    }
}

/// Imports one input with the default configuration.
pub fn run(input: &RawInput, context: &ImportContext) -> ImportOutcome {
    Importer::default().run(input, context)
}

pub fn run_with_config(
    input: &RawInput,
    context: &ImportContext,
    config: &ImportConfig,
) -> ImportOutcome {
    Importer::new(config.clone()).run(input, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_input_cuts_at_line() {
        let importer = Importer::new(ImportConfig::default().with_max_input_bytes(12));
        let mut errors = Vec::new();
        let kept = importer.bound_input("first line\nsecond line\n", &mut errors);
        assert_eq!(kept, "first line");
        assert_eq!(errors.len(), 1);

        let kept = importer.bound_input("short", &mut errors);
        assert_eq!(kept, "short");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_bound_input_respects_char_boundary() {
        let importer = Importer::new(ImportConfig::default().with_max_input_bytes(3));
        let mut errors = Vec::new();
        assert_eq!(importer.bound_input("aéé", &mut errors), "a\u{e9}");
    }

    #[test]
    fn test_limit_rows() {
        let importer = Importer::new(ImportConfig::default().with_max_rows(2));
        let mut records: Vec<_> = (1..=5).map(PartialRecord::new).collect();
        let mut errors = Vec::new();
        importer.limit_rows(&mut records, &mut errors);
        assert_eq!(records.len(), 2);
        assert_eq!(
            errors,
            vec!["Input has 5 rows, over the 2 row limit; extra rows were dropped".to_string()]
        );
    }
}
