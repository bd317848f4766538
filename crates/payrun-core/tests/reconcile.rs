//! End-to-end reconciliation over in-memory inputs.

use std::path::PathBuf;

use payrun_core::project::green_column_names;
use payrun_core::{
    CoreError, RegionKind, RegionStatus, RunInputs, RunOptions, RunOutput, SourceShapeError,
    reconcile,
};
use payrun_common::any_to_cell;
use payrun_ingest::{PayrunData, SheetTable};
use payrun_model::{MappingTable, UnresolvedPolicy};
use polars::prelude::DataFrame;
use serde_json::{Map, Value, json};

fn primary_sheet(rows: &[&[&str]]) -> SheetTable {
    SheetTable {
        headers: [
            "System Employee ID",
            "Department",
            "Annual Salary",
            "Effective Date",
            "Monthly Car Allowance",
            "Company Car Value",
        ]
        .iter()
        .map(|h| (*h).to_string())
        .collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| (*c).to_string()).collect())
            .collect(),
    }
}

fn meta() -> Map<String, Value> {
    json!({
        "company": "Acme GmbH",
        "companyId": 7,
        "country": "Germany",
        "countryAbbr": "DE",
        "payDate": "31/Jan/2023",
        "month": "January"
    })
    .as_object()
    .cloned()
    .unwrap()
}

fn employee(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "fullname": name,
        "position": "Engineer",
        "workType": "Full time",
        "rgNumber": format!("RG{id}"),
        "startDate": {"date": "2020-03-01T00:00:00.000Z"},
        "companyRef": {"id": 7},
        "countryRef": {"name": "Germany", "abbreviature": "DE"}
    })
}

fn inputs(bank_accounts: Vec<Value>, employees: Vec<Value>) -> RunInputs {
    RunInputs {
        payrun: PayrunData {
            meta: meta(),
            ..PayrunData::default()
        },
        payrun_source: PathBuf::from("inputs/payrun_data.json"),
        primary: primary_sheet(&[
            &["3", "Ops", "50000", "2022-07-01", "200", ""],
            &["1", "IT", "60000", "2021-01-15", "", "30000"],
            &["", "Totals", "110000", "", "", ""],
        ]),
        bank_accounts,
        employees,
        mapping: MappingTable::default(),
    }
}

fn green(output: &RunOutput) -> &DataFrame {
    &output
        .regions
        .iter()
        .find(|region| region.kind == RegionKind::Green)
        .unwrap()
        .frame
}

fn cell(frame: &DataFrame, col: &str, row: usize) -> Option<String> {
    any_to_cell(frame.column(col).unwrap().get(row).unwrap())
}

#[test]
fn green_region_follows_canonical_order() {
    let output = reconcile(
        inputs(
            vec![
                json!({"employee": 1, "company": 7, "iban": "DE01", "accountNumber": 111}),
                json!({"employee": 3, "company": 7, "iban": "DE03", "accountNumber": 333}),
            ],
            vec![employee(3, "Carol"), employee(1, "Alice")],
        ),
        &RunOptions::default(),
    )
    .unwrap();

    assert_eq!(output.employee_count, 2);
    let frame = green(&output);
    assert_eq!(frame.height(), 2);
    assert_eq!(
        frame
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>(),
        green_column_names()
    );
    assert_eq!(cell(frame, "System Employee ID", 0).as_deref(), Some("1"));
    assert_eq!(cell(frame, "fullname", 0).as_deref(), Some("Alice"));
    assert_eq!(cell(frame, "fullname", 1).as_deref(), Some("Carol"));
    assert_eq!(cell(frame, "accountNumber", 1).as_deref(), Some("333"));
    assert_eq!(cell(frame, "Effective Date", 0).as_deref(), Some("15.01.2021"));
    assert_eq!(cell(frame, "startDate", 0).as_deref(), Some("01.03.2020"));
    assert_eq!(cell(frame, "Car Allowance", 1).as_deref(), Some("200"));
    assert_eq!(cell(frame, "Car Value", 0).as_deref(), Some("30000"));
    assert_eq!(cell(frame, "Comments", 0), None);
}

#[test]
fn duplicate_bank_rows_resolved_by_iban() {
    let output = reconcile(
        inputs(
            vec![
                json!({"employee": 1, "company": 7, "iban": null, "accountNumber": 1}),
                json!({"employee": 1, "company": 7, "iban": "DE01", "accountNumber": 2}),
                json!({"employee": 3, "company": 7, "iban": "DE03", "accountNumber": 3}),
            ],
            vec![employee(1, "Alice"), employee(3, "Carol")],
        ),
        &RunOptions::default(),
    )
    .unwrap();

    assert!(output.unresolved.is_empty());
    let frame = green(&output);
    assert_eq!(cell(frame, "iban", 0).as_deref(), Some("DE01"));
    assert_eq!(cell(frame, "accountNumber", 0).as_deref(), Some("2"));
}

fn ambiguous_bank() -> RunInputs {
    inputs(
        vec![
            json!({"employee": 1, "company": 7, "iban": "DE01"}),
            json!({"employee": 1, "company": 7, "iban": "DE02"}),
            json!({"employee": 3, "company": 7, "iban": "DE03"}),
        ],
        vec![employee(1, "Alice"), employee(3, "Carol")],
    )
}

#[test]
fn ambiguous_duplicates_fail_by_default() {
    let err = reconcile(ambiguous_bank(), &RunOptions::default()).unwrap_err();
    match err {
        CoreError::UnresolvedDuplicates {
            source_name,
            count,
            first,
        } => {
            assert_eq!(source_name, "bankaccounts");
            assert_eq!(count, 1);
            assert_eq!(first, "1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ambiguous_duplicates_reported_leave_row_empty() {
    let options = RunOptions {
        on_unresolved: UnresolvedPolicy::Report,
        ..RunOptions::default()
    };
    let output = reconcile(ambiguous_bank(), &options).unwrap();

    assert_eq!(output.unresolved.len(), 1);
    assert_eq!(output.unresolved[0].candidates.len(), 2);
    let frame = green(&output);
    assert_eq!(cell(frame, "iban", 0), None);
    assert_eq!(cell(frame, "iban", 1).as_deref(), Some("DE03"));
    assert_eq!(cell(frame, "fullname", 0).as_deref(), Some("Alice"));
}

#[test]
fn directory_records_from_other_countries_are_ignored() {
    let mut austrian = employee(1, "Alois");
    austrian["countryRef"] = json!({"name": "Austria", "abbreviature": "AT"});
    let output = reconcile(
        inputs(Vec::new(), vec![austrian, employee(3, "Carol")]),
        &RunOptions::default(),
    )
    .unwrap();

    let frame = green(&output);
    assert_eq!(cell(frame, "fullname", 0), None);
    assert_eq!(cell(frame, "fullname", 1).as_deref(), Some("Carol"));
    assert_eq!(cell(frame, "iban", 1), None);
}

#[test]
fn other_company_bank_accounts_are_ignored() {
    let output = reconcile(
        inputs(
            vec![json!({"employee": 1, "company": 8, "iban": "XX"})],
            vec![employee(1, "Alice")],
        ),
        &RunOptions::default(),
    )
    .unwrap();
    assert_eq!(cell(green(&output), "iban", 0), None);
}

#[test]
fn bad_effective_date_fails_the_run() {
    let mut run = inputs(Vec::new(), Vec::new());
    run.primary = primary_sheet(&[&["1", "IT", "1", "not a date", "", ""]]);
    let err = reconcile(run, &RunOptions::default()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidDate { .. }));
}

#[test]
fn source_without_identity_field_is_a_shape_error() {
    let err = reconcile(
        inputs(vec![json!({"company": 7, "iban": "DE01"})], Vec::new()),
        &RunOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::SourceShape(SourceShapeError::MissingIdentityColumn { .. })
    ));
}

#[test]
fn missing_context_key_fails_before_alignment() {
    let mut run = inputs(Vec::new(), Vec::new());
    run.payrun.meta.remove("companyId");
    let err = reconcile(run, &RunOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not find required key 'companyId' in file 'inputs/payrun_data.json'"
    );
}

#[test]
fn regions_are_emitted_in_write_order() {
    let output = reconcile(inputs(Vec::new(), Vec::new()), &RunOptions::default()).unwrap();
    let kinds: Vec<_> = output.regions.iter().map(|region| region.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RegionKind::Info,
            RegionKind::Green,
            RegionKind::Red,
            RegionKind::EmployeeForm
        ]
    );

    let info = &output.regions[0];
    assert_eq!(info.status, RegionStatus::Built);
    assert_eq!(info.location.to_string(), "Employees!R1C2");
    assert_eq!(cell(&info.frame, "info", 1).as_deref(), Some("31.01.2023"));

    for stub in &output.regions[2..] {
        assert!(matches!(stub.status, RegionStatus::Stub { .. }));
        assert_eq!(stub.frame.height(), 0);
    }
}
