//! Test case import pipeline.
//!
//! Takes raw pasted or uploaded input plus caller context and produces
//! normalized, validated [`TestCaseDraft`](tci_model::TestCaseDraft)s,
//! custom column proposals and diagnostics. The pipeline is pure: no I/O
//! and no state shared between imports.
//!
//! # Pipeline
//!
//! 1. **Detect** the input format (`tci-ingest`)
//! 2. **Extract** partial records: map columns, walk the outline, or read
//!    `Key: value` lines
//! 3. **Normalize** each record into a draft with defaults filled in
//! 4. **Validate** each draft, collecting issues instead of failing
//!
//! # Example
//!
//! ```
//! use tci_import::run;
//! use tci_model::{ImportContext, RawInput, TestPriority};
//!
//! let input = RawInput::text(
//!     "Test Case ID,Title,Priority,Status\nTC-001,Login Test,High,Pending\n",
//! );
//! let outcome = run(&input, &ImportContext::new("proj-1"));
//!
//! assert_eq!(outcome.drafts.len(), 1);
//! assert_eq!(outcome.drafts[0].title, "Login Test");
//! assert_eq!(outcome.drafts[0].priority, TestPriority::High);
//! assert!(outcome.errors.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod map;
pub mod normalize;
pub mod orchestrate;
pub mod validate;

// === Configuration ===
pub use config::ImportConfig;

// === Error Types ===
pub use error::{ImportError, Result};

// === Column Mapping ===
pub use map::{
    ColumnMatch, MappingSet, build_mapping_set, map_column, parse_override,
    propose_custom_column, propose_custom_columns,
};

// === Normalization ===
pub use normalize::{Normalized, PartialRecord, custom_value, normalize, parse_execution_date};

// === Validation ===
pub use validate::{Issue, Severity, ValidationResult, validate, validate_with_issues};

// === Orchestration ===
pub use orchestrate::{ImportOutcome, Importer, run, run_with_config};
