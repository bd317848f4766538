use std::path::PathBuf;

use payrun_model::MappingEntry;

/// One profile to run, as requested on the command line.
#[derive(Debug, Clone, Default)]
pub struct ProfileRequest {
    pub root: PathBuf,
    /// Config file used instead of `<root>/payrun.toml`.
    pub config: Option<PathBuf>,
    /// Leave unresolved duplicates empty instead of failing.
    pub allow_unresolved: bool,
    /// Reconcile without writing the result workbook.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub root: PathBuf,
    pub company: String,
    pub pay_date: String,
    pub employees: usize,
    pub mapping: MappingSummary,
    pub regions: Vec<RegionSummary>,
    /// Human-readable unresolved duplicate groups, empty unless reported.
    pub unresolved: Vec<String>,
    /// Written workbook; `None` on a dry run.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct MappingSummary {
    pub path: PathBuf,
    /// The scaffold was written during this run.
    pub created: bool,
    pub columns: usize,
    pub mapped: usize,
}

#[derive(Debug, Clone)]
pub struct RegionSummary {
    pub region: &'static str,
    /// `sheet!R<row>C<col>` of the region origin.
    pub origin: String,
    pub rows: usize,
    pub columns: usize,
    /// `None` when built; the reason when the region is a stub.
    pub stub_reason: Option<&'static str>,
    pub written: bool,
}

/// A profile's template columns with their mapped global names.
#[derive(Debug, Clone)]
pub struct MappingListing {
    pub summary: MappingSummary,
    pub entries: Vec<MappingEntry>,
}
