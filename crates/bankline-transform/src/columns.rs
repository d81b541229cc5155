//! Column-label normalization.

use polars::prelude::DataFrame;

use bankline_model::{EtlError, Result};

/// Rewrite every column label to the canonical convention: lower-case,
/// trimmed, internal whitespace runs collapsed to a single underscore.
///
/// Idempotent; row count and cell values are untouched. A zero-width
/// frame or labels that collide after normalization are schema errors.
pub fn normalize_columns(df: &mut DataFrame) -> Result<()> {
    if df.width() == 0 {
        return Err(EtlError::Schema(
            "dataset has no column labels".to_string(),
        ));
    }
    let names: Vec<String> = df
        .get_column_names_owned()
        .iter()
        .map(|name| normalize_label(name))
        .collect();
    df.set_column_names(names)
        .map_err(|error| EtlError::Schema(format!("column labels: {error}")))?;
    Ok(())
}

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
