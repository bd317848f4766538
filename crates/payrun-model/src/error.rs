use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate identity {id} in canonical set")]
    DuplicateIdentity { id: String },
    #[error("identities out of order: {previous} before {next}")]
    UnsortedIdentities { previous: String, next: String },
    #[error("source record is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
