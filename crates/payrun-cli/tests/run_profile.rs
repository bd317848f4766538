//! Full profile runs against the `demos/poc_1` profile.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use payrun_cli::run::{inspect_mapping, run_profile};
use payrun_cli::types::ProfileRequest;
use payrun_output::{copy_dir, sheet_path};

const SHEET_WIDTH: usize = 17;

fn demo_profile() -> (TempDir, PathBuf) {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/poc_1");
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("poc_1");
    copy_dir(&demo, &root).unwrap();
    (temp, root)
}

fn request(root: &Path) -> ProfileRequest {
    ProfileRequest {
        root: root.to_path_buf(),
        ..ProfileRequest::default()
    }
}

fn row(cells: &[&str]) -> String {
    let mut padded: Vec<&str> = cells.to_vec();
    padded.resize(SHEET_WIDTH, "");
    padded.join(",")
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn first_run_writes_green_region_and_scaffold() {
    let (_temp, root) = demo_profile();
    let result = run_profile(&request(&root)).unwrap();

    assert_eq!(result.company, "Acme GmbH");
    assert_eq!(result.pay_date, "31.01.2023");
    assert_eq!(result.employees, 3);
    assert!(result.mapping.created);
    assert_eq!(result.mapping.columns, 2);
    assert_eq!(result.mapping.mapped, 0);
    assert!(result.unresolved.is_empty());

    let output = result.output.clone().unwrap();
    assert_eq!(output, root.join("Employee Form"));
    let employees = lines(&sheet_path(&output, "Employees"));
    assert_eq!(employees[0], row(&["Company", "Acme GmbH"]));
    assert_eq!(employees[1], row(&["Pay date", "31.01.2023"]));
    assert_eq!(employees[2], row(&["Month", "January"]));
    assert!(employees[4].starts_with("System Employee ID,Full name"));
    assert_eq!(
        employees[5],
        row(&[
            "1",
            "Alice Meyer",
            "Engineer",
            "IT",
            "111",
            "DE89370400440532013000",
            "Full time",
            "60000",
            "15.01.2021",
            "",
            "30000",
            "RG1",
            "01.03.2020",
        ])
    );
    assert_eq!(
        employees[6],
        row(&[
            "3",
            "Carol Schmidt",
            "Analyst",
            "Finance",
            "333",
            "DE02120300000000202051",
            "Part time",
            "50000",
            "01.07.2022",
            "200",
            "",
            "RG3",
            "30.12.1899",
        ])
    );
    assert_eq!(
        employees[7],
        row(&[
            "10",
            "",
            "",
            "Logistics",
            "",
            "",
            "",
            "38000",
            "01.06.2021",
            "150"
        ])
    );
    assert_eq!(employees.len(), 8);

    assert_eq!(
        fs::read_to_string(sheet_path(&output, "Employee form")).unwrap(),
        fs::read_to_string(sheet_path(&root.join("template/Employee Form"), "Employee form"))
            .unwrap()
    );

    let scaffold = fs::read_to_string(root.join("mapping.json")).unwrap();
    insta::assert_snapshot!(scaffold, @r#"
    [
        {
            "globalName": null,
            "templateName": "Gross Pay"
        },
        {
            "globalName": null,
            "templateName": "Net Pay"
        }
    ]
    "#);

    let red = result
        .regions
        .iter()
        .find(|region| region.region == "red")
        .unwrap();
    assert!(red.stub_reason.is_some());
    assert!(!red.written);
    assert_eq!(red.origin, "Employees!R6C15");
}

#[test]
fn second_run_keeps_edited_mapping() {
    let (_temp, root) = demo_profile();
    fs::write(
        root.join("mapping.json"),
        r#"[{"globalName": "Gross Pay", "templateName": "Gross Pay"}]"#,
    )
    .unwrap();

    let result = run_profile(&request(&root)).unwrap();
    assert!(!result.mapping.created);
    assert_eq!(result.mapping.mapped, 1);
    assert_eq!(
        fs::read_to_string(root.join("mapping.json")).unwrap(),
        r#"[{"globalName": "Gross Pay", "templateName": "Gross Pay"}]"#
    );
}

#[test]
fn dry_run_leaves_no_result_but_scaffolds_mapping() {
    let (_temp, root) = demo_profile();
    let result = run_profile(&ProfileRequest {
        dry_run: true,
        ..request(&root)
    })
    .unwrap();

    assert!(result.output.is_none());
    assert!(!root.join("Employee Form").exists());
    assert!(root.join("mapping.json").is_file());
    assert!(result.regions.iter().all(|region| !region.written));
}

fn make_bank_ambiguous(root: &Path) {
    fs::write(
        root.join("inputs/bankaccounts.json"),
        r#"[
            {"employee": 1, "company": 7, "iban": "DE01", "accountNumber": 1},
            {"employee": 1, "company": 7, "iban": "DE02", "accountNumber": 2}
        ]"#,
    )
    .unwrap();
}

#[test]
fn ambiguous_bank_accounts_abort_before_writing() {
    let (_temp, root) = demo_profile();
    make_bank_ambiguous(&root);

    let err = run_profile(&request(&root)).unwrap_err();
    assert!(format!("{err:#}").contains("bankaccounts"));
    assert!(!root.join("Employee Form").exists());
}

#[test]
fn allow_unresolved_reports_and_writes() {
    let (_temp, root) = demo_profile();
    make_bank_ambiguous(&root);

    let result = run_profile(&ProfileRequest {
        allow_unresolved: true,
        ..request(&root)
    })
    .unwrap();
    assert_eq!(result.unresolved.len(), 1);
    assert!(result.unresolved[0].contains("employee 1"));

    let employees = lines(&sheet_path(&root.join("Employee Form"), "Employees"));
    assert!(employees[5].starts_with("1,Alice Meyer,Engineer,IT,,,Full time,"));
}

#[test]
fn config_file_forces_report_policy() {
    let (_temp, root) = demo_profile();
    make_bank_ambiguous(&root);
    fs::write(
        root.join("payrun.toml"),
        "[alignment]\non_unresolved = \"report\"\n",
    )
    .unwrap();

    let result = run_profile(&request(&root)).unwrap();
    assert_eq!(result.unresolved.len(), 1);
}

#[test]
fn missing_pay_date_names_key_and_file() {
    let (_temp, root) = demo_profile();
    let path = root.join("inputs/payrun_data.json");
    let mut data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    data.as_object_mut().unwrap().remove("payDate");
    fs::write(&path, data.to_string()).unwrap();

    let err = run_profile(&request(&root)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("could not find required key 'payDate'"));
    assert!(message.contains("payrun_data.json"));
    assert!(!root.join("Employee Form").exists());
}

#[test]
fn mapping_listing_follows_template_order() {
    let (_temp, root) = demo_profile();
    let listing = inspect_mapping(&request(&root)).unwrap();
    let names: Vec<_> = listing
        .entries
        .iter()
        .map(|entry| (entry.col_pos, entry.template_name.as_str()))
        .collect();
    assert_eq!(names, vec![(0, "Gross Pay"), (1, "Net Pay")]);
    assert!(listing.summary.created);
    assert!(!root.join("Employee Form").exists());
}
