//! Type coercion engine.
//!
//! Each canonical field is converted to its declared class in a bulk
//! pass over the whole column. Failures are per-cell and degrade to
//! null, with one exception: a currency column where no non-empty cell
//! parses at all violates the column's type contract and fails the run.

use chrono::NaiveDate;
use polars::prelude::{AnyValue, Column, DataFrame, DataType};

use bankline_common::any_to_string;
use bankline_model::{CURRENCY_FIELDS, DATE_FIELDS, EtlError, INTEGER_FIELDS, Result, TEXT_FIELDS};

const STAGE: &str = "coerce";

/// Source pattern for date fields: day-month-year.
const DATE_PATTERN: &str = "%d-%m-%Y";

/// Coerce every canonical column present in the frame to its class.
///
/// Columns the frame does not carry are skipped; unknown columns are
/// left untouched.
pub fn coerce_types(df: &mut DataFrame) -> Result<()> {
    for name in CURRENCY_FIELDS {
        if df.column(name).is_ok() {
            coerce_currency(df, name)?;
        }
    }
    for name in INTEGER_FIELDS {
        if df.column(name).is_ok() {
            coerce_integer(df, name)?;
        }
    }
    for name in DATE_FIELDS {
        if df.column(name).is_ok() {
            coerce_date(df, name)?;
        }
    }
    for name in TEXT_FIELDS {
        if df.column(name).is_ok() {
            coerce_text(df, name)?;
        }
    }
    Ok(())
}

/// Strip thousands separators and parse as f64.
///
/// Unparseable non-empty cells become null; a column where every
/// non-empty cell is unparseable is a hard coercion error.
pub fn coerce_currency(df: &mut DataFrame, name: &str) -> Result<()> {
    let height = df.height();
    let mut values: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut non_empty = 0usize;
    let mut parsed = 0usize;
    let column = df.column(name)?;
    for idx in 0..height {
        let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        let cleaned = raw.replace(',', "");
        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            values.push(None);
            continue;
        }
        non_empty += 1;
        match trimmed.parse::<f64>() {
            Ok(value) => {
                parsed += 1;
                values.push(Some(value));
            }
            Err(_) => values.push(None),
        }
    }
    if non_empty > 0 && parsed == 0 {
        return Err(EtlError::coercion(
            STAGE,
            name,
            "no value in the column parses as a number",
        ));
    }
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Best-effort numeric parse; null on failure. The column is downcast
/// to Int64 afterwards when every non-null value is whole, mirroring a
/// lossless integer downcast.
pub fn coerce_integer(df: &mut DataFrame, name: &str) -> Result<()> {
    let height = df.height();
    let mut values: Vec<Option<f64>> = Vec::with_capacity(height);
    let column = df.column(name)?;
    for idx in 0..height {
        let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            values.push(None);
            continue;
        }
        values.push(trimmed.parse::<f64>().ok());
    }
    let lossless = values
        .iter()
        .flatten()
        .all(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64);
    if lossless {
        let ints: Vec<Option<i64>> = values
            .into_iter()
            .map(|value| value.map(|v| v as i64))
            .collect();
        df.with_column(Column::new(name.into(), ints))?;
    } else {
        df.with_column(Column::new(name.into(), values))?;
    }
    Ok(())
}

/// Parse against the exact day-month-year pattern; mismatch → null.
///
/// An already-coerced Date column is left alone, which keeps the
/// pipeline idempotent on its own output.
pub fn coerce_date(df: &mut DataFrame, name: &str) -> Result<()> {
    let height = df.height();
    {
        let column = df.column(name)?;
        if column.dtype() == &DataType::Date {
            return Ok(());
        }
    }
    let mut values: Vec<Option<NaiveDate>> = Vec::with_capacity(height);
    let column = df.column(name)?;
    for idx in 0..height {
        let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            values.push(None);
            continue;
        }
        values.push(NaiveDate::parse_from_str(trimmed, DATE_PATTERN).ok());
    }
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Trim outer whitespace and title-case. Blank cells become null for
/// the missing-value policy to fill.
pub fn coerce_text(df: &mut DataFrame, name: &str) -> Result<()> {
    let height = df.height();
    let mut values: Vec<Option<String>> = Vec::with_capacity(height);
    let column = df.column(name)?;
    for idx in 0..height {
        let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            values.push(None);
        } else {
            values.push(Some(title_case(trimmed)));
        }
    }
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Capitalize the first letter of each whitespace-separated token and
/// lower-case the rest. Interior whitespace runs are kept as-is; only
/// the outer trim in [`coerce_text`] touches spacing.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
