//! Sheet CSV reading.
//!
//! A workbook sheet is stored as a headerless CSV grid. Grids keep every row,
//! blank ones included, because cell positions are meaningful to the template
//! and the writer.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A sheet region with a header row.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Positions of every header equal to `name`.
    pub fn column_indices(&self, name: &str) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, header)| header.as_str() == name)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// First column whose header contains `fragment`.
    pub fn column_containing(&self, fragment: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.contains(fragment))
    }

    /// The cell at `(row, col)`, `None` when blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(col)?.as_str();
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a sheet as a grid of trimmed cells.
pub fn read_sheet_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    read_grid(path, normalize_cell)
}

/// Reads a sheet with every cell exactly as stored.
pub fn read_raw_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    read_grid(path, str::to_string)
}

fn read_grid(path: &Path, cell: fn(&str) -> String) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        grid.push(record.iter().map(cell).collect());
    }
    Ok(grid)
}

/// Builds a table from a grid whose header sits at `header_row`.
///
/// Rows below the header are padded to the header width; entirely blank rows
/// are dropped.
pub fn sheet_table_from_grid(
    grid: &[Vec<String>],
    header_row: usize,
    path: &Path,
) -> Result<SheetTable> {
    let header = grid
        .get(header_row)
        .ok_or_else(|| IngestError::HeaderRowOutOfRange {
            path: path.to_path_buf(),
            row: header_row,
            rows: grid.len(),
        })?;
    let headers: Vec<String> = header.iter().map(|value| normalize_header(value)).collect();
    let mut rows = Vec::new();
    for record in grid.iter().skip(header_row + 1) {
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(SheetTable { headers, rows })
}

/// Reads a sheet CSV whose header is at the 0-based `header_row`.
pub fn read_sheet_table(path: &Path, header_row: usize) -> Result<SheetTable> {
    let grid = read_sheet_grid(path)?;
    sheet_table_from_grid(&grid, header_row, path)
}
