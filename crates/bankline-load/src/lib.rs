//! SQLite loading for cleaned client frames.
//!
//! The table is created from the frame's own schema on first use and
//! rows are appended inside a single transaction, so a failed load
//! leaves the database untouched.

use polars::prelude::{AnyValue, DataFrame, DataType};
use rusqlite::{Connection, types::Value};
use tracing::info;

use bankline_common::any_to_string;
use bankline_model::{EtlError, Result};

/// Create `table` with one column per frame column if it does not
/// exist yet. Float columns map to REAL, integer columns to INTEGER,
/// everything else (text, dates) is stored as TEXT.
pub fn ensure_table(conn: &Connection, table: &str, df: &DataFrame) -> Result<()> {
    let columns: Vec<String> = df
        .get_columns()
        .iter()
        .map(|column| {
            let sql_type = match column.dtype() {
                DataType::Float64 | DataType::Float32 => "REAL",
                DataType::Int64 | DataType::Int32 => "INTEGER",
                _ => "TEXT",
            };
            format!("\"{}\" {}", column.name(), sql_type)
        })
        .collect();
    let statement = format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
        table,
        columns.join(", ")
    );
    conn.execute(&statement, [])
        .map_err(|error| EtlError::Load(format!("create table `{table}`: {error}")))?;
    Ok(())
}

/// Append every row of the frame to `table`, creating the table first
/// if needed. Returns the number of rows written.
pub fn append_clients(conn: &mut Connection, table: &str, df: &DataFrame) -> Result<usize> {
    ensure_table(conn, table, df)?;

    let placeholders: Vec<String> = (1..=df.width()).map(|idx| format!("?{idx}")).collect();
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|column| format!("\"{}\"", column.name()))
        .collect();
    let statement = format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        names.join(", "),
        placeholders.join(", ")
    );

    let tx = conn
        .transaction()
        .map_err(|error| EtlError::Load(format!("begin transaction: {error}")))?;
    {
        let mut insert = tx
            .prepare(&statement)
            .map_err(|error| EtlError::Load(format!("prepare insert: {error}")))?;
        for idx in 0..df.height() {
            let row: Vec<Value> = df
                .get_columns()
                .iter()
                .map(|column| cell_to_sql(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect();
            insert
                .execute(rusqlite::params_from_iter(row))
                .map_err(|error| EtlError::Load(format!("insert row {idx}: {error}")))?;
        }
    }
    tx.commit()
        .map_err(|error| EtlError::Load(format!("commit: {error}")))?;

    let rows = df.height();
    info!(rows, table, "load complete");
    Ok(rows)
}

/// Map a frame cell to a SQLite value. Dates render as ISO-8601 text.
fn cell_to_sql(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        other => Value::Text(any_to_string(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("client_id".into(), vec!["1", "2"]),
            Column::new("bank_loans".into(), vec![1250.5_f64, 0.0]),
            Column::new("age".into(), vec![30_i64, 0]),
            Column::new("name".into(), vec![Some("John Smith"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn creates_table_and_appends_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        let df = sample_frame();

        let written = append_clients(&mut conn, "client_data", &df).unwrap();
        assert_eq!(written, 2);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM client_data", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let loans: f64 = conn
            .query_row(
                "SELECT bank_loans FROM client_data WHERE client_id = '1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((loans - 1250.5).abs() < f64::EPSILON);

        let name: Option<String> = conn
            .query_row(
                "SELECT name FROM client_data WHERE client_id = '2'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn appending_twice_accumulates() {
        let mut conn = Connection::open_in_memory().unwrap();
        let df = sample_frame();
        append_clients(&mut conn, "client_data", &df).unwrap();
        append_clients(&mut conn, "client_data", &df).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM client_data", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn integer_columns_map_to_integer_affinity() {
        let mut conn = Connection::open_in_memory().unwrap();
        append_clients(&mut conn, "client_data", &sample_frame()).unwrap();
        let age: i64 = conn
            .query_row(
                "SELECT age FROM client_data WHERE client_id = '1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(age, 30);
    }
}
