use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use tci_cli::pipeline::ColumnReport;
use tci_import::ImportOutcome;
use tci_model::{ColumnMapping, ConfidenceTier, CustomColumnProposal, DetectedFormat, MappingSource};

/// Longest cell text shown before eliding.
const MAX_CELL_CHARS: usize = 60;

pub fn print_detected(detected: &DetectedFormat) {
    println!("Format: {}", detected.format);
    println!("Confidence: {:.2}", detected.confidence);
    if let Some(headers) = &detected.headers {
        println!("Headers: {}", headers.join(", "));
    }
}

pub fn print_columns(report: &ColumnReport) {
    print_detected(&report.detected);
    println!();
    print_mapping_table(&report.mappings);
    print_proposal_table(&report.proposed_columns);
}

pub fn print_outcome(outcome: &ImportOutcome) {
    println!(
        "Format: {} (confidence {:.2})",
        outcome.format, outcome.confidence
    );
    if !outcome.mappings.is_empty() {
        print_mapping_table(&outcome.mappings);
    }
    print_proposal_table(&outcome.proposed_columns);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Title"),
        header_cell("Status"),
        header_cell("Priority"),
        header_cell("Category"),
        header_cell("Custom"),
        header_cell("Valid"),
    ]);
    apply_draft_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for draft in &outcome.drafts {
        let valid = !outcome.invalid_rows.contains(&draft.source_row);
        table.add_row(vec![
            Cell::new(draft.source_row),
            Cell::new(elide(&draft.title)),
            Cell::new(draft.status),
            Cell::new(draft.priority),
            Cell::new(draft.category),
            count_cell(draft.custom_fields.len(), Color::Blue),
            valid_cell(valid),
        ]);
    }
    println!();
    println!("Drafts:");
    println!("{table}");
    println!(
        "{} drafts, {} valid, {} invalid",
        outcome.drafts.len(),
        outcome.valid_count(),
        outcome.invalid_rows.len()
    );

    if !outcome.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &outcome.warnings {
            eprintln!("- {warning}");
        }
    }
    if !outcome.errors.is_empty() {
        eprintln!("Errors:");
        for error in &outcome.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_mapping_table(mappings: &[ColumnMapping]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Tier"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for mapping in mappings {
        let target = if mapping.is_ignored() {
            dim_cell("ignored")
        } else if mapping.is_custom() {
            Cell::new("custom").fg(Color::Blue)
        } else {
            Cell::new(mapping.target_field.to_string()).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(&mapping.source_column),
            target,
            tier_cell(mapping.confidence_tier),
            source_cell(mapping.source),
        ]);
    }
    println!("Columns:");
    println!("{table}");
}

fn print_proposal_table(proposals: &[CustomColumnProposal]) {
    if proposals.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    for proposal in proposals {
        let options = match &proposal.suggested_options {
            Some(options) => Cell::new(options.join(", ")),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&proposal.name).fg(Color::Blue),
            Cell::new(&proposal.label),
            Cell::new(proposal.inferred_type.as_str()),
            options,
        ]);
    }
    println!();
    println!("Proposed custom columns:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_draft_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn tier_cell(tier: ConfidenceTier) -> Cell {
    match tier {
        ConfidenceTier::High => Cell::new("HIGH").fg(Color::Green),
        ConfidenceTier::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        ConfidenceTier::Low => Cell::new("LOW").fg(Color::DarkGrey),
    }
}

fn source_cell(source: MappingSource) -> Cell {
    match source {
        MappingSource::Manual => Cell::new("manual")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        MappingSource::Auto => dim_cell("auto"),
    }
}

fn valid_cell(valid: bool) -> Cell {
    if valid {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn elide(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= MAX_CELL_CHARS && first_line.len() == text.len() {
        return text.to_string();
    }
    let head: String = first_line.chars().take(MAX_CELL_CHARS).collect();
    format!("{head}…")
}
