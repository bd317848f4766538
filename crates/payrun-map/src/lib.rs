//! Template-to-source field mapping.
//!
//! The mapping file pairs each output detail column (`templateName`) with the
//! source field that fills it (`globalName`). The first run writes a scaffold
//! with every column unmapped; users edit the file and re-run.

#![deny(unsafe_code)]

mod error;
mod store;

pub use error::{MappingError, Result};
pub use store::MappingStore;
