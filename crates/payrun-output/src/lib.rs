//! Workbook output.
//!
//! A workbook is a directory holding one header-less CSV grid per sheet
//! (`<sheet>.csv`). Results are written by copying the template, overlaying
//! region tables at their origins and swapping the finished copy into place,
//! so a failed run never leaves a half-written result behind.

mod common;
mod workbook;

pub use common::{copy_dir, ensure_parent_dir, sheet_path};
pub use workbook::WorkbookWriter;
