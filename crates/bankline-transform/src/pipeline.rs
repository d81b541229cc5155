//! Pipeline orchestrator.
//!
//! Fixed stage order: column normalization, critical-field filter, type
//! coercion, missing-value fill, dedupe, risk bucketing. Each stage
//! mutates the frame in place and the orchestrator records row counts
//! at the telemetry points between them.

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{info, info_span};

use bankline_common::any_to_string;
use bankline_model::{CRITICAL_FIELDS, EtlError, PipelineOptions, Result};

use crate::coerce::coerce_types;
use crate::columns::normalize_columns;
use crate::dedupe::dedupe_by_client_id;
use crate::impute::fill_missing;
use crate::risk::assign_risk_category;

/// Row counts observed at the pipeline's telemetry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCounts {
    /// Rows in the frame handed to the pipeline.
    pub input_rows: usize,
    /// Rows left after the critical-field filter.
    pub after_filter: usize,
    /// Rows left after duplicate removal.
    pub after_dedupe: usize,
}

/// A cleaned frame together with the run's row-count telemetry.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub data: DataFrame,
    pub counts: RunCounts,
}

/// Deterministic client-record cleaning pipeline.
#[derive(Debug, Clone, Default)]
pub struct ClientPipeline {
    options: PipelineOptions,
}

impl ClientPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Run every stage over the frame.
    ///
    /// The input frame must carry the critical identity columns
    /// (`client_id`, `name`) once labels are normalized; all other
    /// canonical columns are optional and unknown columns pass through
    /// untouched.
    pub fn run(&self, mut df: DataFrame) -> Result<CleanedDataset> {
        let span = info_span!("pipeline");
        let _guard = span.enter();

        let input_rows = df.height();
        normalize_columns(&mut df)?;
        for name in CRITICAL_FIELDS {
            if df.column(name).is_err() {
                return Err(EtlError::Schema(format!(
                    "dataset is missing required column `{name}`"
                )));
            }
        }
        filter_critical(&mut df)?;
        let after_filter = df.height();
        info!(input_rows, after_filter, "filtered rows without identity fields");

        coerce_types(&mut df)?;
        fill_missing(&mut df, &self.options)?;
        dedupe_by_client_id(&mut df)?;
        let after_dedupe = df.height();
        assign_risk_category(&mut df)?;
        info!(after_dedupe, "pipeline complete");

        Ok(CleanedDataset {
            data: df,
            counts: RunCounts {
                input_rows,
                after_filter,
                after_dedupe,
            },
        })
    }
}

/// Drop rows where any critical field is null or blank. Runs on the
/// raw values, before coercion.
fn filter_critical(df: &mut DataFrame) -> Result<()> {
    let height = df.height();
    let mut keep = vec![true; height];
    for name in CRITICAL_FIELDS {
        let column = df.column(name)?;
        for (idx, flag) in keep.iter_mut().enumerate() {
            let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if value.trim().is_empty() {
                *flag = false;
            }
        }
    }
    let mask = BooleanChunked::from_slice("critical".into(), &keep);
    *df = df.filter(&mask)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn filter_drops_rows_missing_identity() {
        let mut df = DataFrame::new(vec![
            Column::new(
                "client_id".into(),
                vec![Some("1"), None, Some("3"), Some("4")],
            ),
            Column::new(
                "name".into(),
                vec![Some("a"), Some("b"), Some("  "), Some("d")],
            ),
        ])
        .unwrap();
        filter_critical(&mut df).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn missing_critical_column_is_a_schema_error() {
        let df = DataFrame::new(vec![Column::new("Name".into(), vec!["a"])]).unwrap();
        let error = ClientPipeline::default().run(df).unwrap_err();
        assert!(matches!(error, EtlError::Schema(_)));
        assert!(error.to_string().contains("client_id"));
    }
}
