//! Tests for sheet and template reading.

use std::fs;

use payrun_ingest::{read_raw_grid, read_sheet_grid, read_sheet_table, read_template_columns};
use tempfile::TempDir;

#[test]
fn reads_primary_sheet_with_header_offset() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("Payrun file.csv");
    fs::write(
        &path,
        "Payrun file,,\nSystem Employee ID,Department,Annual Salary\n3,Ops,51000\n,,\n1,IT,48000\n",
    )
    .expect("write sheet");

    let table = read_sheet_table(&path, 1).expect("read sheet");

    assert_eq!(table.headers[0], "System Employee ID");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(0, 1), Some("Ops"));
}

#[test]
fn grid_keeps_blank_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("Employees.csv");
    fs::write(&path, "a,b\n,\nc\n").expect("write sheet");

    let grid = read_sheet_grid(&path).expect("read grid");

    assert_eq!(grid.len(), 3);
    assert_eq!(grid[2], vec!["c".to_string()]);
}

#[test]
fn template_columns_follow_header_layout() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("Employees.csv");
    fs::write(
        &path,
        "Company,,,,\n,,,,\n,,,,\n,,,,\nID,Name,Gross pay,Bonus,\n",
    )
    .expect("write template");

    let columns = read_template_columns(&path, 4, 2).expect("template columns");

    assert_eq!(columns, vec!["Gross pay", "Bonus"]);
}

#[test]
fn raw_grid_keeps_cells_verbatim() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("Employees.csv");
    fs::write(&path, "Company, Acme ,\n  ,Net \n").expect("write sheet");

    let raw = read_raw_grid(&path).expect("read raw grid");
    let trimmed = read_sheet_grid(&path).expect("read grid");

    assert_eq!(raw[0], vec!["Company", " Acme ", ""]);
    assert_eq!(raw[1], vec!["  ", "Net "]);
    assert_eq!(trimmed[0], vec!["Company", "Acme", ""]);
    assert_eq!(trimmed[1], vec!["", "Net"]);
}
