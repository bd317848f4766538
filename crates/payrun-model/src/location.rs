use std::fmt;

use serde::{Deserialize, Serialize};

/// The sheet and 0-based top-left cell where a region table is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutLocation {
    pub sheet: String,
    pub row: usize,
    pub col: usize,
}

impl OutLocation {
    pub fn new(sheet: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            sheet: sheet.into(),
            row,
            col,
        }
    }
}

impl fmt::Display for OutLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!R{}C{}", self.sheet, self.row + 1, self.col + 1)
    }
}
