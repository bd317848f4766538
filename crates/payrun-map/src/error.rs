//! Error types for mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Mapping file could not be read or created.
    #[error("mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Mapping file is not a list of `{templateName, globalName}` records.
    #[error("failed to parse mapping file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Scaffold could not be serialized.
    #[error("failed to serialize mapping scaffold: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MappingError>;
