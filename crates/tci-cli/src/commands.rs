use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info_span;

use tci_cli::pipeline::{build_context, column_report, detect_text, load_config, preview, read_input};
use tci_import::ImportOutcome;

use crate::cli::{ColumnsArgs, InputArgs, OutputArg, PreviewArgs};
use crate::summary::{print_columns, print_detected, print_outcome};

pub fn run_detect(args: &InputArgs) -> Result<()> {
    let _guard = info_span!("detect", input = %args.input.display()).entered();
    let config = load_config(args.config.as_deref())?;
    let text = read_input(&args.input)?;
    let detected = detect_text(&text, &config);
    match args.output {
        OutputArg::Table => print_detected(&detected),
        OutputArg::Json => print_json(&detected)?,
    }
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let _guard = info_span!("columns", input = %args.input.input.display()).entered();
    let config = load_config(args.input.config.as_deref())?;
    let context = build_context("", None, &args.map)?;
    let text = read_input(&args.input.input)?;
    let report = column_report(&text, &context, &config)?;
    match args.input.output {
        OutputArg::Table => print_columns(&report),
        OutputArg::Json => print_json(&report)?,
    }
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<ImportOutcome> {
    let _guard = info_span!("preview", input = %args.input.input.display()).entered();
    let config = load_config(args.input.config.as_deref())?;
    let context = build_context(&args.project, args.suite.as_deref(), &args.map)?;
    let text = read_input(&args.input.input)?;
    let outcome = preview(&text, &context, &config);
    match args.input.output {
        OutputArg::Table => print_outcome(&outcome),
        OutputArg::Json => print_json(&outcome)?,
    }
    Ok(outcome)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}
