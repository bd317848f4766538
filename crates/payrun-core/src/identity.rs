//! Canonical identity resolution from the primary payrun sheet.

use tracing::debug;

use payrun_ingest::SheetTable;
use payrun_model::{CanonicalIds, EmployeeId, ModelError};

use crate::error::{Result, SourceShapeError};

pub const PRIMARY_SOURCE: &str = "payrun sheet";

/// The primary sheet with its rows in canonical identity order.
#[derive(Debug, Clone)]
pub struct PrimaryTable {
    ids: CanonicalIds,
    sheet: SheetTable,
}

impl PrimaryTable {
    pub fn ids(&self) -> &CanonicalIds {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.sheet.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheet.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Result<usize> {
        self.sheet
            .column_index(name)
            .ok_or_else(|| missing_column(name))
    }

    /// First column whose header contains `fragment`.
    pub fn column_containing(&self, fragment: &str) -> Result<usize> {
        self.sheet
            .column_containing(fragment)
            .ok_or_else(|| missing_column(fragment))
    }

    /// The cell at `(row, col)`, `None` when blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.sheet.cell(row, col)
    }
}

fn missing_column(name: &str) -> crate::error::CoreError {
    SourceShapeError::MissingColumn {
        source_name: PRIMARY_SOURCE.to_string(),
        column: name.to_string(),
    }
    .into()
}

/// Builds the canonical identity axis from the primary sheet.
///
/// Rows with a blank identity are dropped and the rest sorted ascending.
/// The primary sheet must already be identity-unique; a repeated identity is
/// reported instead of being merged.
pub fn resolve_identities(sheet: SheetTable, id_column: &str) -> Result<PrimaryTable> {
    let id_col = match sheet.column_indices(id_column).as_slice() {
        [] => {
            return Err(SourceShapeError::MissingIdentityColumn {
                source_name: PRIMARY_SOURCE.to_string(),
                column: id_column.to_string(),
            }
            .into());
        }
        [single] => *single,
        _ => {
            return Err(SourceShapeError::DuplicateColumn {
                source_name: PRIMARY_SOURCE.to_string(),
                column: id_column.to_string(),
            }
            .into());
        }
    };

    let total = sheet.rows.len();
    let mut keyed: Vec<(EmployeeId, Vec<String>)> = sheet
        .rows
        .into_iter()
        .filter_map(|row| {
            let id = row.get(id_col).and_then(|cell| EmployeeId::parse(cell))?;
            Some((id, row))
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let (ids, rows): (Vec<EmployeeId>, Vec<Vec<String>>) = keyed.into_iter().unzip();
    let ids = CanonicalIds::from_sorted(ids).map_err(|err| match err {
        ModelError::DuplicateIdentity { id } => SourceShapeError::DuplicateIdentity {
            source_name: PRIMARY_SOURCE.to_string(),
            id,
        },
        _ => SourceShapeError::AxisMismatch {
            source_name: PRIMARY_SOURCE.to_string(),
        },
    })?;
    debug!(
        rows = total,
        identities = ids.len(),
        dropped = total - ids.len(),
        "resolved canonical identities"
    );

    Ok(PrimaryTable {
        ids,
        sheet: SheetTable {
            headers: sheet.headers,
            rows,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn sheet(headers: &[&str], rows: &[&[&str]]) -> SheetTable {
        SheetTable {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn null_identities_dropped_and_sorted() {
        let table = sheet(
            &["System Employee ID", "Department"],
            &[&["3", "Ops"], &["1", "IT"], &["", "Totals"], &["2", "HR"]],
        );

        let primary = resolve_identities(table, "System Employee ID").unwrap();

        let ids: Vec<String> = primary.ids().iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        let department = primary.column("Department").unwrap();
        assert_eq!(primary.cell(0, department), Some("IT"));
        assert_eq!(primary.cell(2, department), Some("Ops"));
        assert_eq!(primary.column_containing("Depart").unwrap(), department);
        assert!(matches!(
            primary.column("Salary").unwrap_err(),
            CoreError::SourceShape(SourceShapeError::MissingColumn { .. })
        ));
    }

    #[test]
    fn spreadsheet_float_ids_sort_numerically() {
        let table = sheet(&["System Employee ID"], &[&["10.0"], &["9"], &["100"]]);
        let primary = resolve_identities(table, "System Employee ID").unwrap();
        let ids: Vec<String> = primary.ids().iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["9", "10", "100"]);
    }

    #[test]
    fn duplicate_primary_identity_is_rejected() {
        let table = sheet(&["System Employee ID"], &[&["4"], &["4.0"]]);
        let err = resolve_identities(table, "System Employee ID").unwrap_err();
        assert!(matches!(
            err,
            CoreError::SourceShape(SourceShapeError::DuplicateIdentity { .. })
        ));
    }

    #[test]
    fn missing_identity_column_is_a_shape_error() {
        let table = sheet(&["Employee"], &[&["1"]]);
        let err = resolve_identities(table, "System Employee ID").unwrap_err();
        assert!(matches!(
            err,
            CoreError::SourceShape(SourceShapeError::MissingIdentityColumn { .. })
        ));
    }

    #[test]
    fn repeated_identity_header_is_a_shape_error() {
        let table = sheet(&["System Employee ID", "System Employee ID"], &[&["1", "2"]]);
        let err = resolve_identities(table, "System Employee ID").unwrap_err();
        assert!(matches!(
            err,
            CoreError::SourceShape(SourceShapeError::DuplicateColumn { .. })
        ));
    }
}
