//! Error types for payrun source loading.

use std::path::PathBuf;
use thiserror::Error;

use payrun_model::ModelError;

/// Errors that can occur while loading run inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// File is not valid JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse a sheet CSV.
    #[error("failed to parse sheet {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Shape Errors ===
    /// JSON document has the wrong top-level shape.
    #[error("unexpected content in {path}: expected {expected}")]
    UnexpectedShape {
        path: PathBuf,
        expected: &'static str,
    },

    /// Embedded collection missing from the run metadata.
    #[error("could not find required collection '{key}' in file '{path}'")]
    MissingCollection { key: &'static str, path: PathBuf },

    /// Element of an embedded collection is not an object.
    #[error("malformed '{key}' entry {index} in {path}: {source}")]
    MalformedRecord {
        key: &'static str,
        index: usize,
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    /// Two template detail columns share a header.
    #[error("duplicate template column '{header}' in {path}")]
    DuplicateHeader { path: PathBuf, header: String },

    /// Configured header row lies beyond the end of the sheet.
    #[error("header row {row} is out of range for {path} ({rows} rows)")]
    HeaderRowOutOfRange {
        path: PathBuf,
        row: usize,
        rows: usize,
    },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
