//! CSV and TSV reading.

mod header;
mod reader;

pub use header::{count_delimiters, split_delimited_line, unique_headers};
pub use reader::{DelimitedTable, read_delimited};
