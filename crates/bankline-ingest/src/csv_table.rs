use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame};
use tracing::info;

use bankline_model::{EtlError, Result};

/// Raw tabular snapshot of a spreadsheet export: a header row plus
/// string-valued cells. Cells are trimmed; blank rows are dropped.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a client spreadsheet export into a [`CsvTable`].
///
/// The first non-blank row is the header. Rows shorter than the header
/// are padded with empty cells; longer rows are truncated.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| EtlError::Extraction(format!("read {}: {error}", path.display())))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|error| EtlError::Extraction(format!("record {}: {error}", path.display())))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Err(EtlError::Extraction(format!(
            "{}: no header row found",
            path.display()
        )));
    }
    let headers = raw_rows.remove(0);
    let mut rows = Vec::with_capacity(raw_rows.len());
    for record in raw_rows {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Build a string-typed DataFrame from a [`CsvTable`].
///
/// Empty cells become nulls so downstream coercion sees them as missing.
pub fn table_to_frame(table: &CsvTable) -> Result<DataFrame> {
    if table.headers.is_empty() {
        return Err(EtlError::Schema("source has no column labels".to_string()));
    }
    let mut columns = Vec::with_capacity(table.headers.len());
    for (col_idx, header) in table.headers.iter().enumerate() {
        let values: Vec<Option<String>> = table
            .rows
            .iter()
            .map(|row| {
                row.get(col_idx)
                    .filter(|value| !value.is_empty())
                    .cloned()
            })
            .collect();
        columns.push(Column::new(header.as_str().into(), values));
    }
    DataFrame::new(columns)
        .map_err(|error| EtlError::Extraction(format!("build frame: {error}")))
}

/// Read a client spreadsheet export straight into a DataFrame.
pub fn read_client_table(path: &Path) -> Result<DataFrame> {
    let table = read_csv_table(path)?;
    let frame = table_to_frame(&table)?;
    info!(
        source_file = %path.display(),
        row_count = frame.height(),
        column_count = frame.width(),
        "extraction complete"
    );
    Ok(frame)
}
