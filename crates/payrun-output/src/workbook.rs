//! Template-backed workbook writer.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::WriterBuilder;
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use payrun_common::any_to_cell;
use payrun_ingest::read_raw_grid;
use payrun_model::OutLocation;

use crate::common::{copy_dir, ensure_parent_dir, sheet_path};

type Grid = Vec<Vec<String>>;

const STAGING_SUFFIX: &str = ".staging";
const PREVIOUS_SUFFIX: &str = ".previous";

/// Writes region tables into a staging copy of a template workbook.
///
/// Nothing touches `result` until [`WorkbookWriter::finish`].
#[derive(Debug)]
pub struct WorkbookWriter {
    staging: PathBuf,
    result: PathBuf,
    sheets: BTreeMap<String, Grid>,
}

/// `result` with `suffix` appended to its final component.
fn sibling_path(result: &Path, suffix: &str) -> PathBuf {
    let mut name = result
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    result.with_file_name(name)
}

impl WorkbookWriter {
    /// Copies `template` to a staging directory next to `result`.
    ///
    /// A staging directory left over from an interrupted run is replaced.
    pub fn from_template(template: &Path, result: &Path) -> Result<Self> {
        let staging = sibling_path(result, STAGING_SUFFIX);
        ensure_parent_dir(&staging)?;
        if staging.exists() {
            fs::remove_dir_all(&staging)
                .with_context(|| format!("remove stale {}", staging.display()))?;
        }
        copy_dir(template, &staging)
            .with_context(|| format!("copy template {}", template.display()))?;
        debug!(
            template = %template.display(),
            staging = %staging.display(),
            "staged template"
        );
        Ok(Self {
            staging,
            result: result.to_path_buf(),
            sheets: BTreeMap::new(),
        })
    }

    fn grid_mut(&mut self, sheet: &str) -> Result<&mut Grid> {
        if !self.sheets.contains_key(sheet) {
            let path = sheet_path(&self.staging, sheet);
            if !path.is_file() {
                bail!("template has no sheet '{sheet}' ({})", path.display());
            }
            let grid = read_raw_grid(&path)?;
            self.sheets.insert(sheet.to_string(), grid);
        }
        self.sheets
            .get_mut(sheet)
            .with_context(|| format!("sheet '{sheet}' not loaded"))
    }

    /// Overlays `frame` with its first cell at `location`, without headers.
    ///
    /// Null values clear the cell. Cells outside the frame keep their template
    /// content. An empty frame writes nothing. Returns the number of cells
    /// written.
    pub fn write_frame(&mut self, frame: &DataFrame, location: &OutLocation) -> Result<usize> {
        if frame.height() == 0 || frame.width() == 0 {
            debug!(%location, "skipped empty region");
            return Ok(0);
        }
        let grid = self.grid_mut(&location.sheet)?;
        let mut written = 0usize;
        for (offset_col, column) in frame.get_columns().iter().enumerate() {
            let col = location.col + offset_col;
            for offset_row in 0..frame.height() {
                let row = location.row + offset_row;
                let value = any_to_cell(column.get(offset_row)?).unwrap_or_default();
                set_cell(grid, row, col, value);
                written += 1;
            }
        }
        debug!(%location, rows = frame.height(), cols = frame.width(), "wrote region");
        Ok(written)
    }

    /// Flushes modified sheets and moves the staging copy to `result`.
    ///
    /// A previous result is set aside first and restored if the swap fails.
    /// The staging copy is removed on any error.
    pub fn finish(self) -> Result<PathBuf> {
        if let Err(err) = self.flush_and_swap() {
            if self.staging.exists()
                && let Err(cleanup) = fs::remove_dir_all(&self.staging)
            {
                warn!(
                    staging = %self.staging.display(),
                    error = %cleanup,
                    "failed to remove staging copy"
                );
            }
            return Err(err);
        }
        info!(
            result = %self.result.display(),
            sheets = self.sheets.len(),
            "wrote workbook"
        );
        Ok(self.result)
    }

    fn flush_and_swap(&self) -> Result<()> {
        for (sheet, grid) in &self.sheets {
            write_grid(&sheet_path(&self.staging, sheet), grid)?;
        }

        let previous = sibling_path(&self.result, PREVIOUS_SUFFIX);
        if previous.exists() {
            fs::remove_dir_all(&previous)
                .with_context(|| format!("remove stale {}", previous.display()))?;
        }
        let replacing = self.result.exists();
        if replacing {
            fs::rename(&self.result, &previous).with_context(|| {
                format!(
                    "move previous {} to {}",
                    self.result.display(),
                    previous.display()
                )
            })?;
        }

        if let Err(err) = fs::rename(&self.staging, &self.result) {
            if replacing && let Err(restore) = fs::rename(&previous, &self.result) {
                warn!(
                    previous = %previous.display(),
                    error = %restore,
                    "failed to restore previous result"
                );
            }
            return Err(err).with_context(|| {
                format!(
                    "move {} to {}",
                    self.staging.display(),
                    self.result.display()
                )
            });
        }

        if replacing && let Err(err) = fs::remove_dir_all(&previous) {
            warn!(
                previous = %previous.display(),
                error = %err,
                "failed to remove previous result"
            );
        }
        Ok(())
    }

    /// Removes the staging copy without touching `result`.
    pub fn discard(self) -> Result<()> {
        if self.staging.exists() {
            fs::remove_dir_all(&self.staging)
                .with_context(|| format!("remove {}", self.staging.display()))?;
        }
        Ok(())
    }
}

fn set_cell(grid: &mut Grid, row: usize, col: usize, value: String) {
    if grid.len() <= row {
        grid.resize_with(row + 1, Vec::new);
    }
    let cells = &mut grid[row];
    if cells.len() <= col {
        cells.resize(col + 1, String::new());
    }
    cells[col] = value;
}

/// Writes `grid` as a rectangular CSV so every row has the same width.
fn write_grid(path: &Path, grid: &Grid) -> Result<()> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    for row in grid {
        let padded = row
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat_n("", width - row.len()));
        writer
            .write_record(padded)
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cell_grows_grid() {
        let mut grid = vec![vec!["a".to_string()]];
        set_cell(&mut grid, 2, 3, "x".to_string());
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1], Vec::<String>::new());
        assert_eq!(grid[2], vec!["", "", "", "x"]);
        assert_eq!(grid[0], vec!["a"]);
    }

    #[test]
    fn staging_sits_next_to_result() {
        assert_eq!(
            sibling_path(Path::new("poc_1/Employee Form"), STAGING_SUFFIX),
            PathBuf::from("poc_1/Employee Form.staging")
        );
        assert_eq!(
            sibling_path(Path::new("poc_1/Employee Form"), PREVIOUS_SUFFIX),
            PathBuf::from("poc_1/Employee Form.previous")
        );
    }
}
