//! Error types for reconciliation.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// A source does not have the shape alignment needs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceShapeError {
    #[error("{source_name} has no identity column '{column}'")]
    MissingIdentityColumn { source_name: String, column: String },

    #[error("{source_name} names the column '{column}' more than once")]
    DuplicateColumn { source_name: String, column: String },

    #[error("{source_name} contains identity {id} more than once")]
    DuplicateIdentity { source_name: String, id: String },

    #[error("{source_name} record {index} is not an object (found {found})")]
    MalformedRecord {
        source_name: String,
        index: usize,
        found: &'static str,
    },

    #[error("{source_name} has no column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name} is not aligned to the canonical identities")]
    AxisMismatch { source_name: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("could not find required key '{key}' in file '{}'", path.display())]
    MissingField { key: &'static str, path: PathBuf },

    #[error("key '{key}' in file '{}' must be {expected}", path.display())]
    InvalidField {
        key: &'static str,
        path: PathBuf,
        expected: &'static str,
    },

    #[error("invalid date '{value}' in {field}")]
    InvalidDate { field: String, value: String },

    #[error(transparent)]
    SourceShape(#[from] SourceShapeError),

    #[error(
        "{count} employee(s) in {source_name} still have several candidate records after dedup (first: {first})"
    )]
    UnresolvedDuplicates {
        source_name: String,
        count: usize,
        first: String,
    },

    #[error("failed to build region table: {0}")]
    Frame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
