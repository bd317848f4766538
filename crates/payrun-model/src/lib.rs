#![deny(unsafe_code)]

pub mod aligned;
pub mod error;
pub mod ids;
pub mod location;
pub mod mapping;
pub mod options;
pub mod record;

pub use aligned::AlignedTable;
pub use error::{ModelError, Result};
pub use ids::{CanonicalIds, EmployeeId, RecordKey};
pub use location::OutLocation;
pub use mapping::{MappingEntry, MappingFileEntry, MappingTable};
pub use options::{
    AlignmentConfig, LayoutConfig, PathsConfig, PayrunConfig, ProfilePaths, UnresolvedPolicy,
};
pub use record::SourceRecord;
