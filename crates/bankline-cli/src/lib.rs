//! CLI library components for the bankline pipeline.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
