//! Risk bucketing derived from `risk_weighting`.

use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::debug;

use bankline_common::any_to_f64;
use bankline_model::{RISK_CATEGORY, RISK_WEIGHTING, Result};

/// Append the `risk_category` column. Buckets are right-closed:
/// (-inf, 1] very low, (1, 2] low, (2, 3] medium, (3, inf) high.
///
/// A frame without `risk_weighting` is left unchanged; after the
/// missing-value fill that column has no nulls, but a null would bucket
/// as "very low" the same way a filled 0 does.
pub fn assign_risk_category(df: &mut DataFrame) -> Result<()> {
    let Ok(weighting) = df.column(RISK_WEIGHTING) else {
        debug!("no risk_weighting column, skipping risk bucketing");
        return Ok(());
    };
    let height = df.height();
    let values: Vec<String> = (0..height)
        .map(|idx| {
            let weight =
                any_to_f64(weighting.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0.0);
            risk_bucket(weight).to_string()
        })
        .collect();
    df.with_column(Column::new(RISK_CATEGORY.into(), values))?;
    Ok(())
}

/// Bucket label for a single weighting value.
pub fn risk_bucket(weight: f64) -> &'static str {
    if weight <= 1.0 {
        "very low"
    } else if weight <= 2.0 {
        "low"
    } else if weight <= 3.0 {
        "medium"
    } else {
        "high"
    }
}
