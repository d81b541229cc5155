//! CLI argument definitions for the bankline pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "bankline",
    version,
    about = "Bankline - clean client banking records and load them into SQLite",
    long_about = "Clean messy client banking CSV exports into a canonical schema.\n\n\
                  Normalizes column labels, coerces currency, integer, date and text\n\
                  fields, fills missing values, removes duplicate clients, and assigns\n\
                  a risk category before loading the result into a SQLite table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a client CSV export and load it into a SQLite database.
    Run(RunArgs),

    /// List the canonical fields and their type classes.
    Fields,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the client CSV export.
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// SQLite database file (default: <INPUT_CSV dir>/bank.db).
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Destination table name.
    #[arg(long = "table", value_name = "NAME", default_value = "client_data")]
    pub table: String,

    /// Sex token mapping behavior.
    ///
    /// `substring` reproduces the legacy system, where FEMALE collapses
    /// to FEM because MALE is replaced first. `exact` maps whole tokens
    /// only.
    #[arg(long = "sex-mapping", value_enum, default_value = "substring")]
    pub sex_mapping: SexMappingArg,

    /// Clean and report without writing to the database.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI sex-mapping choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SexMappingArg {
    Substring,
    Exact,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
