//! Terminal summary output for `run`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("Input: {}", summary.input.display());
    match &summary.database {
        Some(path) => println!("Database: {} (table `{}`)", path.display(), summary.table),
        None => println!("Database: skipped (dry run)"),
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let counts = &summary.counts;
    table.add_row(vec![Cell::new("input"), Cell::new(counts.input_rows)]);
    table.add_row(vec![
        Cell::new("after identity filter"),
        dropped_cell(counts.input_rows, counts.after_filter),
    ]);
    table.add_row(vec![
        Cell::new("after dedupe"),
        dropped_cell(counts.after_filter, counts.after_dedupe),
    ]);
    table.add_row(vec![
        Cell::new("loaded").add_attribute(Attribute::Bold),
        match summary.rows_loaded {
            Some(rows) => Cell::new(rows).add_attribute(Attribute::Bold),
            None => Cell::new("-").add_attribute(Attribute::Dim),
        },
    ]);
    println!("{table}");
}

/// Row-count cell, highlighted when the stage dropped rows.
fn dropped_cell(before: usize, after: usize) -> Cell {
    if after < before {
        Cell::new(after).fg(Color::Yellow)
    } else {
        Cell::new(after)
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
