//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use rusqlite::Connection;
use tracing::{info, info_span};

use bankline_ingest::read_client_table;
use bankline_model::{
    CURRENCY_FIELDS, DATE_FIELDS, FieldClass, INTEGER_FIELDS, PipelineOptions, SexMappingMode,
    TEXT_FIELDS,
};
use bankline_transform::{ClientPipeline, RunCounts};

use crate::cli::{RunArgs, SexMappingArg};
use crate::summary::apply_table_style;

/// Outcome of a `run` invocation, for the summary printer.
pub struct RunSummary {
    pub input: PathBuf,
    pub database: Option<PathBuf>,
    pub table: String,
    pub counts: RunCounts,
    pub rows_loaded: Option<usize>,
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunSummary> {
    let span = info_span!("run", input = %args.input.display());
    let _guard = span.enter();

    let frame = read_client_table(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;

    let options = PipelineOptions::default().with_sex_mapping(match args.sex_mapping {
        SexMappingArg::Substring => SexMappingMode::Substring,
        SexMappingArg::Exact => SexMappingMode::Exact,
    });
    let cleaned = ClientPipeline::new(options).run(frame)?;

    if args.dry_run {
        info!("dry run, skipping database load");
        return Ok(RunSummary {
            input: args.input.clone(),
            database: None,
            table: args.table.clone(),
            counts: cleaned.counts,
            rows_loaded: None,
        });
    }

    let database = args
        .database
        .clone()
        .unwrap_or_else(|| default_database_path(&args.input));
    let mut conn = Connection::open(&database)
        .with_context(|| format!("open database {}", database.display()))?;
    let rows_loaded = bankline_load::append_clients(&mut conn, &args.table, &cleaned.data)
        .with_context(|| format!("load table `{}`", args.table))?;

    Ok(RunSummary {
        input: args.input.clone(),
        database: Some(database),
        table: args.table.clone(),
        counts: cleaned.counts,
        rows_loaded: Some(rows_loaded),
    })
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Class"]);
    apply_table_style(&mut table);
    table.add_row(vec!["client_id", "identity"]);
    for (fields, class) in [
        (CURRENCY_FIELDS.as_slice(), FieldClass::Currency),
        (INTEGER_FIELDS.as_slice(), FieldClass::Integer),
        (DATE_FIELDS.as_slice(), FieldClass::Date),
        (TEXT_FIELDS.as_slice(), FieldClass::Text),
    ] {
        for field in fields {
            table.add_row(vec![(*field).to_string(), format!("{class:?}").to_lowercase()]);
        }
    }
    println!("{table}");
    Ok(())
}

fn default_database_path(input: &std::path::Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("bank.db"), |dir| dir.join("bank.db"))
}
