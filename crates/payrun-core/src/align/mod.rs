//! Reconciliation of auxiliary sources onto the canonical identity axis.
//!
//! Every source goes through the same steps:
//!
//! 1. context filter ([`SourcePolicy::in_context`])
//! 2. identity filter (identities outside the canonical set are dropped)
//! 3. dedup selection per identity ([`select_from_duplicates`])
//! 4. reindex onto the canonical order, absent identities get empty rows
//!
//! Dedup never guesses: a group the tie-break cannot narrow to one record is
//! returned as an [`UnresolvedDuplicate`] and its row stays empty.

mod policies;

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use payrun_model::{AlignedTable, CanonicalIds, EmployeeId, SourceRecord, UnresolvedPolicy};

use crate::context::RunContext;
use crate::error::{CoreError, Result, SourceShapeError};

pub use policies::{BankAccounts, EmployeeDirectory, SourcePolicy};

/// An employee whose records could not be narrowed to one.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedDuplicate {
    pub source_name: String,
    pub employee: EmployeeId,
    /// Records still in contention, in source order.
    pub candidates: Vec<SourceRecord>,
    /// Tie-break field that was applied, if the source has one.
    pub field: Option<String>,
}

impl fmt::Display for UnresolvedDuplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: employee {} has {} candidate records",
            self.source_name,
            self.employee,
            self.candidates.len()
        )?;
        if let Some(field) = &self.field {
            write!(f, " after dropping records without '{field}'")?;
        }
        Ok(())
    }
}

/// Outcome of dedup selection for one identity group.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    One(SourceRecord),
    Ambiguous(Vec<SourceRecord>),
}

/// Picks the single record for one employee.
///
/// A one-record group is returned unchanged. Larger groups lose every record
/// whose distinguishing field is null; if that leaves anything but exactly
/// one record the group is ambiguous. When every record lacks the field the
/// whole group is reported.
pub fn select_from_duplicates(mut group: Vec<SourceRecord>, field: Option<&str>) -> Selection {
    if group.len() == 1 {
        return match group.pop() {
            Some(record) => Selection::One(record),
            None => Selection::Ambiguous(Vec::new()),
        };
    }
    let Some(field) = field else {
        return Selection::Ambiguous(group);
    };
    let (mut with_value, without): (Vec<_>, Vec<_>) = group
        .into_iter()
        .partition(|record| record.value(field).is_some());
    match with_value.len() {
        1 => match with_value.pop() {
            Some(record) => Selection::One(record),
            None => Selection::Ambiguous(Vec::new()),
        },
        0 => Selection::Ambiguous(without),
        _ => Selection::Ambiguous(with_value),
    }
}

/// An aligned source plus the identities dedup left unresolved.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub table: AlignedTable,
    pub unresolved: Vec<UnresolvedDuplicate>,
}

impl Alignment {
    /// Applies the run's policy for unresolved duplicates.
    ///
    /// `Fail` turns any unresolved group into an error; `Report` logs each
    /// group and hands them back with the table.
    pub fn resolve(
        self,
        policy: UnresolvedPolicy,
    ) -> Result<(AlignedTable, Vec<UnresolvedDuplicate>)> {
        if self.unresolved.is_empty() {
            return Ok((self.table, self.unresolved));
        }
        match policy {
            UnresolvedPolicy::Fail => Err(CoreError::UnresolvedDuplicates {
                source_name: self.table.source().to_string(),
                count: self.unresolved.len(),
                first: self.unresolved[0].employee.to_string(),
            }),
            UnresolvedPolicy::Report => {
                for duplicate in &self.unresolved {
                    warn!(
                        source = %duplicate.source_name,
                        employee = %duplicate.employee,
                        candidates = duplicate.candidates.len(),
                        "unresolved duplicate left empty"
                    );
                }
                Ok((self.table, self.unresolved))
            }
        }
    }
}

/// Aligns one auxiliary source to `canonical`.
///
/// Records without an identity value are skipped. A non-empty source where no
/// record carries the identity field at all is a shape error, as is any
/// element that is not a JSON object.
pub fn align(
    records: Vec<Value>,
    canonical: &CanonicalIds,
    ctx: &RunContext,
    policy: &dyn SourcePolicy,
) -> Result<Alignment> {
    let source_name = policy.source_name();
    let identity_field = policy.identity_field();
    let total = records.len();

    let mut parsed = Vec::with_capacity(total);
    for (index, value) in records.into_iter().enumerate() {
        let record = SourceRecord::try_from(value).map_err(|err| {
            let found = match err {
                payrun_model::ModelError::NotAnObject { found } => found,
                _ => "unknown",
            };
            SourceShapeError::MalformedRecord {
                source_name: source_name.to_string(),
                index,
                found,
            }
        })?;
        parsed.push(record);
    }
    if !parsed.is_empty() && !parsed.iter().any(|record| record.has_field(identity_field)) {
        return Err(SourceShapeError::MissingIdentityColumn {
            source_name: source_name.to_string(),
            column: identity_field.to_string(),
        }
        .into());
    }

    let mut out_of_context = 0usize;
    let mut without_identity = 0usize;
    let mut foreign = 0usize;
    let mut groups: BTreeMap<EmployeeId, Vec<SourceRecord>> = BTreeMap::new();
    for record in parsed {
        if !policy.in_context(&record, ctx) {
            out_of_context += 1;
            continue;
        }
        let Some(id) = record
            .value(identity_field)
            .and_then(EmployeeId::from_json)
        else {
            without_identity += 1;
            continue;
        };
        if !canonical.contains(&id) {
            foreign += 1;
            continue;
        }
        groups.entry(id).or_default().push(record);
    }

    let mut selected = BTreeMap::new();
    let mut unresolved = Vec::new();
    for (id, group) in groups {
        let group_size = group.len();
        match select_from_duplicates(group, policy.distinguishing_field()) {
            Selection::One(record) => {
                if group_size > 1 {
                    debug!(source = source_name, employee = %id, group_size, "resolved duplicate");
                }
                selected.insert(id, record);
            }
            Selection::Ambiguous(candidates) => unresolved.push(UnresolvedDuplicate {
                source_name: source_name.to_string(),
                employee: id,
                candidates,
                field: policy.distinguishing_field().map(String::from),
            }),
        }
    }

    let table = AlignedTable::reindex(source_name, canonical, selected);
    if !table.has_axis(canonical) {
        return Err(SourceShapeError::AxisMismatch {
            source_name: source_name.to_string(),
        }
        .into());
    }
    info!(
        source = source_name,
        records = total,
        out_of_context,
        without_identity,
        foreign,
        matched = table.matched(),
        unresolved = unresolved.len(),
        identities = table.len(),
        "aligned source"
    );
    Ok(Alignment { table, unresolved })
}
