//! Payrun source loading.
//!
//! Reads the raw inputs of a run into plain Rust values:
//!
//! - **Record lists**: `bankaccounts.json`, `ee_data.json`
//! - **Run metadata**: `payrun_data.json`, split into metadata, line items
//!   and embedded global mappings
//! - **Sheets**: headerless CSV grids, one per workbook sheet, and tables
//!   with a header at a fixed row offset
//! - **Template columns**: the header cells of the template's detail range
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use payrun_ingest::{read_payrun_data, read_sheet_table};
//!
//! let run = read_payrun_data(Path::new("poc_1/inputs/payrun_data.json"))?;
//! let main = read_sheet_table(Path::new("poc_1/inputs/payrun_file/Payrun file.csv"), 1)?;
//! ```

mod error;
mod json;
mod sheet;
mod template;

pub use error::{IngestError, Result};
pub use json::{PayrunData, read_payrun_data, read_record_list};
pub use sheet::{SheetTable, read_raw_grid, read_sheet_grid, read_sheet_table, sheet_table_from_grid};
pub use template::{read_template_columns, template_columns};
