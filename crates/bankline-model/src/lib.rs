//! Data model for the bankline client-cleaning pipeline.
//!
//! Defines the canonical schema (field classes and column sets), the
//! per-run [`PipelineOptions`], and the [`EtlError`] type shared by the
//! ingest, transform, and load crates.

pub mod error;
pub mod fields;
pub mod options;

pub use error::{EtlError, Result};
pub use fields::{
    CLIENT_ID, CRITICAL_FIELDS, CURRENCY_FIELDS, DATE_FIELDS, FieldClass, INTEGER_FIELDS,
    RISK_CATEGORY, RISK_WEIGHTING, TEXT_FIELDS, TEXT_SENTINEL, field_class,
};
pub use options::{PipelineOptions, SexMappingMode};
