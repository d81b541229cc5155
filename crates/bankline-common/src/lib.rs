//! Shared helpers for working with polars values.

pub mod polars;

pub use crate::polars::{
    any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64,
};
