//! Reading delimited text into header-keyed rows.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, Trim};
use tci_model::InputFormat;

use super::header::unique_headers;
use crate::error::{IngestError, Result};

/// A delimited table: unique headers plus one map per non-empty data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimitedTable {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
    /// 1-based data record number of each entry in `rows`. Skipped blank
    /// records still count, so numbers can have gaps.
    pub row_numbers: Vec<usize>,
}

impl DelimitedTable {
    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates the trimmed values of one column, skipping rows that lack it.
    pub fn column_values<'a>(&'a self, header: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        let header = header.to_string();
        self.rows
            .iter()
            .filter_map(move |row| row.get(&header).map(String::as_str))
    }
}

/// Reads CSV or TSV text. The first record is the header row.
///
/// Rows may be ragged: missing trailing cells are left out of the row map and
/// cells beyond the last header are dropped. Rows whose cells are all blank
/// are skipped.
pub fn read_delimited(text: &str, format: InputFormat) -> Result<DelimitedTable> {
    let delimiter = format.delimiter().ok_or(IngestError::NoDelimitedHeader)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = loop {
        match records.next() {
            Some(record) => {
                let record = record?;
                if record.iter().any(|cell| !cell.is_empty()) {
                    break record;
                }
            }
            None => return Err(IngestError::EmptyDocument),
        }
    };
    let raw_headers: Vec<&str> = header_record.iter().collect();
    let headers = unique_headers(&raw_headers);

    let mut rows = Vec::new();
    let mut row_numbers = Vec::new();
    let mut dropped_cells = 0usize;
    for (idx, record) in records.enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        row_numbers.push(idx + 1);
        dropped_cells += record.len().saturating_sub(headers.len());
        let row: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    if dropped_cells > 0 {
        tracing::debug!(dropped_cells, "cells beyond the header row were dropped");
    }
    tracing::debug!(
        format = %format,
        columns = headers.len(),
        rows = rows.len(),
        "read delimited input"
    );

    Ok(DelimitedTable {
        headers,
        rows,
        row_numbers,
    })
}
