//! Payrun reconciliation engine.
//!
//! - [`context`]: run metadata extraction
//! - [`identity`]: canonical employee identity axis from the primary sheet
//! - [`align`]: per-source filter, dedup and reindex onto that axis
//! - [`project`]: output region tables
//! - [`run`]: the whole reconciliation for one profile

pub mod align;
pub mod context;
pub mod dates;
pub mod error;
pub mod identity;
pub mod project;
pub mod run;

pub use align::{
    Alignment, BankAccounts, EmployeeDirectory, Selection, SourcePolicy, UnresolvedDuplicate,
    align, select_from_duplicates,
};
pub use context::{RunContext, extract_context};
pub use error::{CoreError, Result, SourceShapeError};
pub use identity::{PrimaryTable, resolve_identities};
pub use project::{OutputRegion, RegionKind, RegionStatus};
pub use run::{RunInputs, RunOptions, RunOutput, reconcile};
