//! Test case ingestion utilities.
//!
//! This crate turns raw pasted or uploaded text into shapes the import
//! pipeline can work with. It never guesses field semantics; that is the
//! job of `tci-import`.
//!
//! # Features
//!
//! - **Encoding**: Decode uploaded bytes using BOM sniffing with a Windows-1252 fallback
//! - **Format Detection**: Classify text as CSV, TSV, structured, hierarchical or freeform
//! - **Delimited Reading**: Quote-aware CSV/TSV reading into header-keyed rows
//! - **Structured Lines**: Recognize `Key: value` labels
//! - **Outline Parsing**: Parse numbered sections, subsections, test cases and priority blocks
//!
//! # Example
//!
//! ```
//! use tci_ingest::{detect_format, read_delimited};
//! use tci_model::InputFormat;
//!
//! let text = "Title,Status\nLogin works,Passed\n";
//! let detected = detect_format(text);
//! assert_eq!(detected.format, InputFormat::Csv);
//!
//! let table = read_delimited(text, detected.format)?;
//! assert_eq!(table.rows[0]["Status"], "Passed");
//! # Ok::<(), tci_ingest::IngestError>(())
//! ```

mod delimited;
mod detect;
mod encoding;
mod error;
mod hierarchical;
mod structured;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encoding ===
pub use encoding::decode_upload;

// === Format Detection ===
pub use detect::{DetectorOptions, FREEFORM_CONFIDENCE, FormatDetector, detect_format};

// === Delimited Reading ===
pub use delimited::{
    DelimitedTable, count_delimiters, read_delimited, split_delimited_line, unique_headers,
};

// === Structured Lines ===
pub use structured::{KeyValue, StructuredKey, known_key, known_key_value, parse_key_value};

// === Outline Parsing ===
pub use hierarchical::{
    Attribute, HierarchicalDocument, HierarchicalTestCase, IMPLICIT_GROUP_TITLE, ParserState,
    Section, Subsection, parse_hierarchical,
};
