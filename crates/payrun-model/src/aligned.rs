//! Sources reindexed onto the canonical identity axis.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{CanonicalIds, EmployeeId, SourceRecord};

/// A source whose rows line up one-to-one with a [`CanonicalIds`] axis.
///
/// `ids()` is always exactly the canonical sequence it was built from. A row is
/// `None` when the source has no surviving record for that identity.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    source: String,
    ids: Vec<EmployeeId>,
    rows: Vec<Option<SourceRecord>>,
}

impl AlignedTable {
    /// Places each selected record at its identity's canonical position.
    ///
    /// Records keyed by identities outside the axis are discarded.
    pub fn reindex(
        source: impl Into<String>,
        canonical: &CanonicalIds,
        mut selected: BTreeMap<EmployeeId, SourceRecord>,
    ) -> Self {
        let ids = canonical.as_slice().to_vec();
        let rows = ids.iter().map(|id| selected.remove(id)).collect();
        Self {
            source: source.into(),
            ids,
            rows,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ids(&self) -> &[EmployeeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&SourceRecord> {
        self.rows.get(index).and_then(Option::as_ref)
    }

    pub fn value(&self, index: usize, path: &str) -> Option<&Value> {
        self.row(index).and_then(|row| row.value(path))
    }

    pub fn text(&self, index: usize, path: &str) -> Option<String> {
        self.row(index).and_then(|row| row.text(path))
    }

    /// Number of identities that have a record.
    pub fn matched(&self) -> usize {
        self.rows.iter().filter(|row| row.is_some()).count()
    }

    pub fn has_axis(&self, canonical: &CanonicalIds) -> bool {
        self.ids.as_slice() == canonical.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EmployeeId, Option<&SourceRecord>)> {
        self.ids.iter().zip(self.rows.iter().map(Option::as_ref))
    }
}
