//! Table-shaped input: delimited text and pre-decoded rows.

use std::collections::BTreeMap;

use tci_ingest::{IngestError, read_delimited, unique_headers};
use tci_model::{ColumnTarget, ImportContext, InputFormat};

use super::Extraction;
use crate::map::{build_mapping_set, propose_custom_columns};
use crate::normalize::{PartialRecord, custom_value};

type Row = BTreeMap<String, String>;

/// Reads CSV or TSV text and maps its rows.
pub(super) fn extract_delimited(
    text: &str,
    format: InputFormat,
    context: &ImportContext,
) -> Result<Extraction, IngestError> {
    let table = read_delimited(text, format)?;
    Ok(extract_table(
        &table.headers,
        &table.rows,
        &table.row_numbers,
        context,
    ))
}

/// Maps rows that were already split into cells.
///
/// Without headers, they are taken from the rows in first-seen order.
pub(super) fn extract_rows(headers: &[String], rows: &[Row], context: &ImportContext) -> Extraction {
    let source_headers: Vec<String> = if headers.is_empty() {
        let mut derived: Vec<String> = Vec::new();
        for key in rows.iter().flat_map(BTreeMap::keys) {
            if !derived.contains(key) {
                derived.push(key.clone());
            }
        }
        derived
    } else {
        headers.to_vec()
    };
    let unique = unique_headers(&source_headers);

    let (numbers, rows): (Vec<usize>, Vec<Row>) = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx + 1, rekey(row, &source_headers, &unique)))
        .filter(|(_, row)| row.values().any(|value| !value.trim().is_empty()))
        .unzip();
    extract_table(&unique, &rows, &numbers, context)
}

fn rekey(row: &Row, from: &[String], to: &[String]) -> Row {
    from.iter()
        .zip(to)
        .filter_map(|(source, target)| row.get(source).map(|value| (target.clone(), value.clone())))
        .collect()
}

/// `numbers` holds the source row number of each entry in `rows`.
fn extract_table(
    headers: &[String],
    rows: &[Row],
    numbers: &[usize],
    context: &ImportContext,
) -> Extraction {
    let set = build_mapping_set(headers, context);
    let proposals = propose_custom_columns(&set, rows);

    let records: Vec<PartialRecord> = rows
        .iter()
        .zip(numbers)
        .map(|(row, &number)| {
            let mut record = PartialRecord::new(number);
            for mapping in &set.mappings {
                let value = row.get(&mapping.source_column).map_or("", String::as_str);
                match mapping.target_field {
                    ColumnTarget::Field(field) => record.set(field, value),
                    ColumnTarget::Skip => {
                        // Manually ignored columns have no proposal.
                        let Some((_, proposal)) = proposals
                            .iter()
                            .find(|(header, _)| *header == mapping.source_column)
                        else {
                            continue;
                        };
                        record.custom_fields.insert(
                            proposal.name.clone(),
                            custom_value(
                                value,
                                proposal.inferred_type,
                                proposal.suggested_options.as_deref(),
                            ),
                        );
                    }
                }
            }
            record
        })
        .collect();

    Extraction {
        headers: set.headers,
        mappings: set.mappings,
        proposals: proposals.into_iter().map(|(_, proposal)| proposal).collect(),
        records,
        warnings: Vec::new(),
    }
}
