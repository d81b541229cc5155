use std::fs;

use bankline_ingest::{read_client_table, read_csv_table};
use bankline_model::EtlError;

#[test]
fn reads_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients.csv");
    fs::write(&path, "Client ID,Name,Age\n1,alice,30\n2,bob,\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers, vec!["Client ID", "Name", "Age"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1], vec!["2", "bob", ""]);
}

#[test]
fn pads_short_rows_and_skips_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients.csv");
    fs::write(&path, "a,b,c\n,,\n1,2\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.rows, vec![vec!["1", "2", ""]]);
}

#[test]
fn empty_cells_become_nulls_in_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients.csv");
    fs::write(&path, "client_id,name\n7,\n8,carol\n").unwrap();

    let frame = read_client_table(&path).unwrap();
    assert_eq!(frame.height(), 2);
    let name = frame.column("name").unwrap();
    assert_eq!(name.null_count(), 1);
}

#[test]
fn empty_file_is_an_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let error = read_client_table(&path).unwrap_err();
    assert!(matches!(error, EtlError::Extraction(_)));
}

#[test]
fn strips_bom_from_first_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.csv");
    fs::write(&path, "\u{feff}client_id,name\n1,dora\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers[0], "client_id");
}
