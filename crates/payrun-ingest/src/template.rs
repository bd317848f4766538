use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::sheet::{normalize_header, read_sheet_grid};

/// Header cells of the template detail range.
///
/// Reads `header_row` from `start_col` rightwards and stops at the first blank
/// cell, so the range follows the template instead of a fixed letter span.
/// Headers must be unique within the range.
pub fn template_columns(
    grid: &[Vec<String>],
    header_row: usize,
    start_col: usize,
    path: &Path,
) -> Result<Vec<String>> {
    let header = grid
        .get(header_row)
        .ok_or_else(|| IngestError::HeaderRowOutOfRange {
            path: path.to_path_buf(),
            row: header_row,
            rows: grid.len(),
        })?;
    let columns: Vec<String> = header
        .iter()
        .skip(start_col)
        .map(|cell| normalize_header(cell))
        .take_while(|cell| !cell.is_empty())
        .collect();
    let mut seen = HashSet::with_capacity(columns.len());
    if let Some(repeated) = columns.iter().find(|column| !seen.insert(column.as_str())) {
        return Err(IngestError::DuplicateHeader {
            path: path.to_path_buf(),
            header: repeated.clone(),
        });
    }
    if columns.is_empty() {
        warn!(
            path = %path.display(),
            header_row,
            start_col,
            "template has no detail columns"
        );
    }
    Ok(columns)
}

/// Reads the template sheet and returns its detail column headers.
pub fn read_template_columns(
    sheet_path: &Path,
    header_row: usize,
    start_col: usize,
) -> Result<Vec<String>> {
    let grid = read_sheet_grid(sheet_path)?;
    let columns = template_columns(&grid, header_row, start_col, sheet_path)?;
    debug!(
        path = %sheet_path.display(),
        columns = columns.len(),
        "read template columns"
    );
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_ends_at_first_blank_header() {
        let grid = vec![
            vec!["Company".to_string()],
            vec![
                "ID".to_string(),
                "Name".to_string(),
                "Gross".to_string(),
                "Net".to_string(),
                String::new(),
                "Notes".to_string(),
            ],
        ];
        let columns = template_columns(&grid, 1, 2, Path::new("Employees.csv")).unwrap();
        assert_eq!(columns, vec!["Gross", "Net"]);
    }

    #[test]
    fn repeated_template_header_is_rejected() {
        let grid = vec![vec![
            "ID".to_string(),
            "Gross".to_string(),
            "Net".to_string(),
            " Gross ".to_string(),
        ]];
        let err = template_columns(&grid, 0, 1, Path::new("Employees.csv")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::DuplicateHeader { ref header, .. } if header == "Gross"
        ));
    }

    #[test]
    fn start_beyond_row_yields_no_columns() {
        let grid = vec![vec!["A".to_string()]];
        let columns = template_columns(&grid, 0, 5, Path::new("Employees.csv")).unwrap();
        assert!(columns.is_empty());
    }
}
