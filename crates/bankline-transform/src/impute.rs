//! Missing-value policy.
//!
//! Runs after coercion: anything still null was either absent in the
//! source or failed its per-cell coercion, and gets the class sentinel
//! (0 for numeric, "Unknown" for text). Date fields are exempt and stay
//! null. Values that coerced successfully are never overwritten.

use polars::prelude::{AnyValue, Column, DataFrame, DataType};

use bankline_common::{any_to_f64, any_to_i64, any_to_string};
use bankline_model::{
    CURRENCY_FIELDS, INTEGER_FIELDS, PipelineOptions, Result, SexMappingMode, TEXT_FIELDS,
    TEXT_SENTINEL,
};

/// Field with the token-mapping special rule.
const SEX: &str = "sex";

/// Fill nulls with the class sentinel for every canonical column
/// present in the frame, applying the `sex` token mapping first.
pub fn fill_missing(df: &mut DataFrame, options: &PipelineOptions) -> Result<()> {
    if df.column(SEX).is_ok() {
        normalize_sex(df, options.sex_mapping)?;
    }
    for name in CURRENCY_FIELDS {
        if df.column(name).is_ok() {
            fill_float_column(df, name)?;
        }
    }
    for name in INTEGER_FIELDS {
        if df.column(name).is_ok() {
            fill_numeric_column(df, name)?;
        }
    }
    for name in TEXT_FIELDS {
        if df.column(name).is_ok() {
            fill_text_column(df, name)?;
        }
    }
    Ok(())
}

fn fill_float_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let height = df.height();
    let column = df.column(name)?;
    let values: Vec<f64> = (0..height)
        .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0.0))
        .collect();
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Integer columns keep whatever numeric dtype coercion settled on:
/// Int64 fills with 0, a column that stayed Float64 fills with 0.0.
fn fill_numeric_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let height = df.height();
    let column = df.column(name)?;
    if column.dtype() == &DataType::Int64 {
        let values: Vec<i64> = (0..height)
            .map(|idx| any_to_i64(column.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0))
            .collect();
        df.with_column(Column::new(name.into(), values))?;
    } else {
        let values: Vec<f64> = (0..height)
            .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0.0))
            .collect();
        df.with_column(Column::new(name.into(), values))?;
    }
    Ok(())
}

fn fill_text_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let height = df.height();
    let column = df.column(name)?;
    let values: Vec<String> = (0..height)
        .map(|idx| {
            let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if value.trim().is_empty() {
                TEXT_SENTINEL.to_string()
            } else {
                value
            }
        })
        .collect();
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Upper-case `sex` values and map the MALE/FEMALE tokens to M/F, then
/// default remaining nulls to the text sentinel.
fn normalize_sex(df: &mut DataFrame, mode: SexMappingMode) -> Result<()> {
    let height = df.height();
    let column = df.column(SEX)?;
    let values: Vec<String> = (0..height)
        .map(|idx| {
            let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if value.trim().is_empty() {
                TEXT_SENTINEL.to_string()
            } else {
                map_sex_value(value.trim(), mode)
            }
        })
        .collect();
    df.with_column(Column::new(SEX.into(), values))?;
    Ok(())
}

/// Token substitution over the upper-cased value.
///
/// Substring mode reproduces the upstream system byte for byte: `MALE`
/// is replaced first, so `FEMALE` collapses to `FEM` before the second
/// pattern can match. Exact mode maps whole tokens only. The sentinel
/// is passed through so a second run does not upper-case it.
pub fn map_sex_value(value: &str, mode: SexMappingMode) -> String {
    let upper = value.to_uppercase();
    if upper == TEXT_SENTINEL.to_uppercase() {
        return TEXT_SENTINEL.to_string();
    }
    match mode {
        SexMappingMode::Substring => upper.replace("MALE", "M").replace("FEMALE", "F"),
        SexMappingMode::Exact => match upper.as_str() {
            "MALE" => "M".to_string(),
            "FEMALE" => "F".to_string(),
            other => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_mode_reproduces_the_source_behavior() {
        assert_eq!(
            map_sex_value("Male", SexMappingMode::Substring),
            "M"
        );
        // FEMALE contains MALE, which runs first.
        assert_eq!(map_sex_value("Female", SexMappingMode::Substring), "FEM");
        assert_eq!(map_sex_value("not male", SexMappingMode::Substring), "NOT M");
    }

    #[test]
    fn exact_mode_maps_whole_tokens() {
        assert_eq!(map_sex_value("Male", SexMappingMode::Exact), "M");
        assert_eq!(map_sex_value("Female", SexMappingMode::Exact), "F");
        assert_eq!(map_sex_value("not male", SexMappingMode::Exact), "NOT MALE");
    }

    #[test]
    fn sentinel_survives_a_second_pass() {
        assert_eq!(
            map_sex_value(TEXT_SENTINEL, SexMappingMode::Substring),
            TEXT_SENTINEL
        );
        assert_eq!(map_sex_value("M", SexMappingMode::Substring), "M");
    }

    #[test]
    fn fills_numeric_and_text_sentinels() {
        let mut df = DataFrame::new(vec![
            Column::new("bank_loans".into(), vec![Some(10.0_f64), None]),
            Column::new("age".into(), vec![Some(41_i64), None]),
            Column::new(
                "occupation".into(),
                vec![Some("Baker".to_string()), None],
            ),
        ])
        .unwrap();
        fill_missing(&mut df, &PipelineOptions::default()).unwrap();
        assert_eq!(df.column("bank_loans").unwrap().null_count(), 0);
        assert_eq!(df.column("age").unwrap().null_count(), 0);
        assert_eq!(
            any_to_f64(df.column("bank_loans").unwrap().get(1).unwrap()),
            Some(0.0)
        );
        assert_eq!(
            any_to_i64(df.column("age").unwrap().get(1).unwrap()),
            Some(0)
        );
        assert_eq!(
            any_to_string(df.column("occupation").unwrap().get(1).unwrap()),
            TEXT_SENTINEL
        );
    }
}
