//! Data model for the test case import engine.
//!
//! Every import builds these types fresh and discards them once the result
//! has been handed to persistence; nothing here holds state between imports.
//!
//! # Module Organization
//!
//! - [`field`]: the closed set of canonical test case attributes
//! - [`enums`]: status, priority, and category with lenient coercion
//! - [`draft`]: the normalized [`TestCaseDraft`] record and custom values
//! - [`format`]: detected input formats and confidence tiers
//! - [`column`]: column mappings and custom column proposals
//! - [`input`]: raw input and caller context

pub mod column;
pub mod draft;
pub mod enums;
pub mod field;
pub mod format;
pub mod input;

pub use column::{
    ColumnMapping, ColumnTarget, CustomColumnProposal, CustomColumnType, MappingSource,
    custom_field_key,
};
pub use draft::{CustomValue, TestCaseDraft};
pub use enums::{TestCategory, TestPriority, TestStatus, normalize_label};
pub use field::FieldName;
pub use format::{ConfidenceTier, DetectedFormat, InputFormat, clamp_confidence};
pub use input::{ImportContext, RawInput};
