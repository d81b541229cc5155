//! Client-record cleaning: label normalization, type coercion, missing
//! value fill, duplicate removal, and risk bucketing over a polars
//! frame.

pub mod coerce;
pub mod columns;
pub mod dedupe;
pub mod impute;
pub mod pipeline;
pub mod risk;

pub use coerce::coerce_types;
pub use columns::normalize_columns;
pub use dedupe::dedupe_by_client_id;
pub use impute::fill_missing;
pub use pipeline::{CleanedDataset, ClientPipeline, RunCounts};
pub use risk::{assign_risk_category, risk_bucket};
