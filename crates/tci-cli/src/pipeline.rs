//! File-level wrappers around the import engine.
//!
//! Everything that touches the filesystem or stdin lives here; the engine
//! itself only sees decoded text.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tci_import::{
    ImportConfig, ImportOutcome, Importer, build_mapping_set, parse_override,
    propose_custom_columns,
};
use tci_ingest::{FormatDetector, decode_upload, read_delimited};
use tci_model::{ColumnMapping, CustomColumnProposal, DetectedFormat, ImportContext, RawInput};

/// Path that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Reads and decodes a text file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = if path == Path::new(STDIN_PATH) {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("read stdin")?;
        bytes
    } else {
        std::fs::read(path).with_context(|| format!("read {}", path.display()))?
    };
    let text = decode_upload(&bytes).with_context(|| format!("decode {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input");
    Ok(text)
}

/// Loads `--config`, or the defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<ImportConfig> {
    match path {
        Some(path) => Ok(ImportConfig::load(path)?),
        None => Ok(ImportConfig::default()),
    }
}

/// Builds the import context from `--project`, `--suite` and `--map` flags.
pub fn build_context(
    project: &str,
    suite: Option<&str>,
    overrides: &[String],
) -> Result<ImportContext> {
    let mut context = ImportContext::new(project);
    if let Some(suite) = suite {
        context = context.with_suite(suite);
    }
    for value in overrides {
        let (header, target) = parse_override(value)?;
        context = context.with_override(header, target);
    }
    Ok(context)
}

pub fn detect_text(text: &str, config: &ImportConfig) -> DetectedFormat {
    FormatDetector::new(config.detector_options()).detect(text)
}

/// Column mappings and proposals for a table, before any import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReport {
    pub detected: DetectedFormat,
    pub mappings: Vec<ColumnMapping>,
    pub proposed_columns: Vec<CustomColumnProposal>,
}

/// Maps the columns of delimited text.
///
/// # Errors
///
/// Fails when the text is not detected as CSV or TSV, or cannot be read.
pub fn column_report(
    text: &str,
    context: &ImportContext,
    config: &ImportConfig,
) -> Result<ColumnReport> {
    let detected = detect_text(text, config);
    if !detected.format.is_delimited() {
        bail!(
            "input was detected as {} text; column mapping needs CSV or TSV",
            detected.format
        );
    }
    let table = read_delimited(text, detected.format)?;
    let set = build_mapping_set(&table.headers, context);
    let proposed_columns = propose_custom_columns(&set, &table.rows)
        .into_iter()
        .map(|(_, proposal)| proposal)
        .collect();
    Ok(ColumnReport {
        detected,
        mappings: set.mappings,
        proposed_columns,
    })
}

/// Runs a full import over decoded text.
pub fn preview(text: &str, context: &ImportContext, config: &ImportConfig) -> ImportOutcome {
    Importer::new(config.clone()).run(&RawInput::text(text), context)
}
