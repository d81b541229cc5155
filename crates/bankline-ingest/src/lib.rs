//! Extraction collaborator for the bankline pipeline.
//!
//! Reads a spreadsheet export (CSV) into a string-typed polars
//! DataFrame. All typing, cleaning, and validation happens downstream
//! in `bankline-transform`; this crate only gets cells off disk.

pub mod csv_table;

pub use csv_table::{CsvTable, read_client_table, read_csv_table, table_to_frame};
