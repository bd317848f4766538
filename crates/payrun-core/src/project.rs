//! Output region tables.
//!
//! Each region is a polars `DataFrame` written header-less at its origin, so
//! only the column order matters; names exist for logs and tests. Projection
//! only selects and converts columns: rows stay in canonical identity order.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::info;

use payrun_ingest::PayrunData;
use payrun_model::{AlignedTable, MappingTable, OutLocation};

use crate::context::RunContext;
use crate::dates::convert_iso_date;
use crate::error::{Result, SourceShapeError};
use crate::identity::PrimaryTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Company, pay date and month cells at the top of `Employees`.
    Info,
    /// Per-employee master data columns.
    Green,
    /// Per-employee pay element columns driven by the mapping file.
    Red,
    /// The `Employee form` sheet.
    EmployeeForm,
}

impl RegionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Green => "green",
            Self::Red => "red",
            Self::EmployeeForm => "employee form",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionStatus {
    Built,
    /// No rule is defined for the region; nothing is written.
    Stub { reason: &'static str },
}

#[derive(Debug, Clone)]
pub struct OutputRegion {
    pub kind: RegionKind,
    pub location: OutLocation,
    pub frame: DataFrame,
    pub status: RegionStatus,
}

const RED_STUB_REASON: &str = "mapping of payrun elements to red columns is not defined";
const EMPLOYEE_FORM_STUB_REASON: &str = "source of truth for the employee form is not defined";

fn text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// The info cells: one column holding company, pay date and month.
pub fn build_info_region(ctx: &RunContext) -> Result<DataFrame> {
    let values = ctx.info_values().into_iter().map(Some).collect();
    Ok(DataFrame::new(vec![text_column("info", values)])?)
}

enum GreenField {
    EmployeeId,
    Primary(&'static str),
    PrimaryContaining(&'static str),
    PrimaryDate(&'static str),
    Directory(&'static str),
    DirectoryDate(&'static str),
    Bank(&'static str),
    Reserved,
}

/// Green columns in sheet order.
const GREEN_COLUMNS: &[(&str, GreenField)] = &[
    ("System Employee ID", GreenField::EmployeeId),
    ("fullname", GreenField::Directory("fullname")),
    ("position", GreenField::Directory("position")),
    ("Department", GreenField::Primary("Department")),
    ("accountNumber", GreenField::Bank("accountNumber")),
    ("iban", GreenField::Bank("iban")),
    ("workType", GreenField::Directory("workType")),
    ("Annual Salary", GreenField::Primary("Annual Salary")),
    ("Effective Date", GreenField::PrimaryDate("Effective Date")),
    ("Car Allowance", GreenField::PrimaryContaining("Car Allowance")),
    ("Car Value", GreenField::PrimaryContaining("Car Value")),
    ("rgNumber", GreenField::Directory("rgNumber")),
    ("startDate", GreenField::DirectoryDate("startDate.date")),
    ("Comments", GreenField::Reserved),
];

fn ensure_axis(primary: &PrimaryTable, table: &AlignedTable) -> Result<()> {
    if table.has_axis(primary.ids()) {
        Ok(())
    } else {
        Err(SourceShapeError::AxisMismatch {
            source_name: table.source().to_string(),
        }
        .into())
    }
}

fn primary_values(primary: &PrimaryTable, col: usize) -> Vec<Option<String>> {
    (0..primary.len())
        .map(|row| primary.cell(row, col).map(String::from))
        .collect()
}

fn converted_dates(field: &str, raw: Vec<Option<String>>) -> Result<Vec<Option<String>>> {
    raw.into_iter()
        .map(|value| convert_iso_date(field, value.as_deref()))
        .collect()
}

/// The green detail table, one row per canonical identity.
///
/// Dates that cannot be parsed fail the run instead of turning into blanks.
pub fn build_green_region(
    primary: &PrimaryTable,
    directory: &AlignedTable,
    bank: &AlignedTable,
) -> Result<DataFrame> {
    ensure_axis(primary, directory)?;
    ensure_axis(primary, bank)?;
    let height = primary.len();

    let mut columns = Vec::with_capacity(GREEN_COLUMNS.len());
    for (name, field) in GREEN_COLUMNS {
        let values = match field {
            GreenField::EmployeeId => primary
                .ids()
                .iter()
                .map(|id| Some(id.to_string()))
                .collect(),
            GreenField::Primary(header) => primary_values(primary, primary.column(header)?),
            GreenField::PrimaryContaining(fragment) => {
                primary_values(primary, primary.column_containing(fragment)?)
            }
            GreenField::PrimaryDate(header) => {
                converted_dates(header, primary_values(primary, primary.column(header)?))?
            }
            GreenField::Directory(path) => {
                (0..height).map(|row| directory.text(row, path)).collect()
            }
            GreenField::DirectoryDate(path) => converted_dates(
                path,
                (0..height).map(|row| directory.text(row, path)).collect(),
            )?,
            GreenField::Bank(path) => (0..height).map(|row| bank.text(row, path)).collect(),
            GreenField::Reserved => vec![None; height],
        };
        columns.push(text_column(name, values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Red pay element columns.
///
/// No rule connects the run's line items and mappings to these columns yet,
/// so the region is empty.
pub fn build_red_region(
    primary: &PrimaryTable,
    payrun: &PayrunData,
    local_mapping: &MappingTable,
) -> DataFrame {
    info!(
        employees = primary.len(),
        line_items = payrun.line_items.len(),
        global_mappings = payrun.global_mappings.len(),
        mapped_columns = local_mapping.mapped().count(),
        reason = RED_STUB_REASON,
        "red region not implemented"
    );
    DataFrame::empty()
}

/// The `Employee form` sheet; empty for the same reason as the red region.
pub fn build_employee_form() -> DataFrame {
    info!(reason = EMPLOYEE_FORM_STUB_REASON, "employee form not implemented");
    DataFrame::empty()
}

pub(crate) fn regions(
    layout: &payrun_model::LayoutConfig,
    info_frame: DataFrame,
    green_frame: DataFrame,
    red_frame: DataFrame,
    form_frame: DataFrame,
) -> Vec<OutputRegion> {
    vec![
        OutputRegion {
            kind: RegionKind::Info,
            location: layout.info.clone(),
            frame: info_frame,
            status: RegionStatus::Built,
        },
        OutputRegion {
            kind: RegionKind::Green,
            location: layout.green.clone(),
            frame: green_frame,
            status: RegionStatus::Built,
        },
        OutputRegion {
            kind: RegionKind::Red,
            location: layout.red.clone(),
            frame: red_frame,
            status: RegionStatus::Stub {
                reason: RED_STUB_REASON,
            },
        },
        OutputRegion {
            kind: RegionKind::EmployeeForm,
            location: layout.employee_form.clone(),
            frame: form_frame,
            status: RegionStatus::Stub {
                reason: EMPLOYEE_FORM_STUB_REASON,
            },
        },
    ]
}

/// Column names of the green region, in sheet order.
pub fn green_column_names() -> Vec<&'static str> {
    GREEN_COLUMNS.iter().map(|(name, _)| *name).collect()
}
