//! CLI argument definitions for the import preview harness.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "testcase-import",
    version,
    about = "Preview how pasted or uploaded test cases would be imported",
    long_about = "Preview how pasted or uploaded test cases would be imported.\n\n\
                  Detects CSV, TSV, Key: value, numbered outline and freeform text,\n\
                  maps columns to test case fields and validates every draft.\n\
                  Nothing is persisted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the detected input format and confidence.
    Detect(InputArgs),

    /// Print the column mapping table and custom column proposals.
    Columns(ColumnsArgs),

    /// Run a full import and print drafts and diagnostics.
    Preview(PreviewArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Text file to read, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Import configuration (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Manual column mapping, e.g. `--map "Summary=title"` or `--map "Notes=skip"`.
    #[arg(long = "map", value_name = "HEADER=FIELD")]
    pub map: Vec<String>,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Project the drafts belong to.
    #[arg(long = "project", value_name = "ID")]
    pub project: String,

    /// Suite attached to every draft.
    #[arg(long = "suite", value_name = "ID")]
    pub suite: Option<String>,

    /// Manual column mapping, e.g. `--map "Summary=title"` or `--map "Notes=skip"`.
    #[arg(long = "map", value_name = "HEADER=FIELD")]
    pub map: Vec<String>,

    /// Exit with status 1 when any draft is invalid.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
