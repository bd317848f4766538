//! Run configuration.
//!
//! Every field has a default, so a profile without a config file runs with
//! the standard layout. Paths are relative to the profile root and only become
//! absolute through [`ProfilePaths::resolve`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::OutLocation;

/// What to do when dedup leaves more than one candidate for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Abort the run.
    #[default]
    Fail,
    /// Leave the identity's row empty and list the group in the summary.
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub bank_accounts: PathBuf,
    pub employees: PathBuf,
    pub payrun_data: PathBuf,
    pub mapping: PathBuf,
    pub payrun_sheet: PathBuf,
    pub template: PathBuf,
    pub result: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            bank_accounts: PathBuf::from("inputs/bankaccounts.json"),
            employees: PathBuf::from("inputs/ee_data.json"),
            payrun_data: PathBuf::from("inputs/payrun_data.json"),
            mapping: PathBuf::from("mapping.json"),
            payrun_sheet: PathBuf::from("inputs/payrun_file/Payrun file.csv"),
            template: PathBuf::from("template/Employee Form"),
            result: PathBuf::from("Employee Form"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// 0-based row holding the primary sheet's header.
    pub primary_header_row: usize,
    /// Header of the identity column in the primary sheet.
    pub primary_id_column: String,
    pub info: OutLocation,
    pub green: OutLocation,
    pub red: OutLocation,
    pub employee_form: OutLocation,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            primary_header_row: 1,
            primary_id_column: "System Employee ID".to_string(),
            info: OutLocation::new("Employees", 0, 1),
            green: OutLocation::new("Employees", 5, 0),
            red: OutLocation::new("Employees", 5, 14),
            employee_form: OutLocation::new("Employee form", 2, 0),
        }
    }
}

impl LayoutConfig {
    /// Template header row of the red detail columns: the row just above the
    /// red region origin.
    pub fn template_header_row(&self) -> usize {
        self.red.row.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    pub on_unresolved: UnresolvedPolicy,
}

/// Contents of a profile's `payrun.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrunConfig {
    pub paths: PathsConfig,
    pub layout: LayoutConfig,
    pub alignment: AlignmentConfig,
}

/// Absolute locations of every input and output of one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePaths {
    pub root: PathBuf,
    pub bank_accounts: PathBuf,
    pub employees: PathBuf,
    pub payrun_data: PathBuf,
    pub mapping: PathBuf,
    pub payrun_sheet: PathBuf,
    pub template: PathBuf,
    pub result: PathBuf,
}

impl ProfilePaths {
    pub fn resolve(root: &Path, paths: &PathsConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            bank_accounts: root.join(&paths.bank_accounts),
            employees: root.join(&paths.employees),
            payrun_data: root.join(&paths.payrun_data),
            mapping: root.join(&paths.mapping),
            payrun_sheet: root.join(&paths.payrun_sheet),
            template: root.join(&paths.template),
            result: root.join(&paths.result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_against_profile_root() {
        let paths = ProfilePaths::resolve(Path::new("/runs/poc_1"), &PathsConfig::default());
        assert_eq!(paths.mapping, PathBuf::from("/runs/poc_1/mapping.json"));
        assert_eq!(
            paths.bank_accounts,
            PathBuf::from("/runs/poc_1/inputs/bankaccounts.json")
        );
    }

    #[test]
    fn template_header_sits_above_red_region() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.template_header_row(), 4);
        assert_eq!(layout.red.col, 14);
    }
}
