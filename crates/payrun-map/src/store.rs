//! Mapping file persistence.
//!
//! # Storage Format
//!
//! A JSON list of records, 4-space indented:
//!
//! ```json
//! [
//!     {
//!         "globalName": null,
//!         "templateName": "Gross pay"
//!     }
//! ]
//! ```
//!
//! Duplicate `templateName`s are allowed; the last one in file order wins.
//! Records for columns the template no longer has are ignored. Template
//! columns without a record come back unmapped.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use payrun_model::{MappingEntry, MappingFileEntry, MappingTable};

use crate::error::{MappingError, Result};

/// The mapping file of one profile.
#[derive(Debug, Clone)]
pub struct MappingStore {
    path: PathBuf,
}

impl MappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the mapping for `template_columns`, writing a scaffold first if
    /// the file does not exist yet.
    ///
    /// An existing file is never modified. Entries come back in template
    /// column order with `col_pos` set to the column's offset.
    pub fn load_or_create(&self, template_columns: &[String]) -> Result<MappingTable> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => self.load(&contents, template_columns),
            Err(err) if err.kind() == ErrorKind::NotFound => self.create(template_columns),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn load(&self, contents: &str, template_columns: &[String]) -> Result<MappingTable> {
        let stored: Vec<MappingFileEntry> =
            serde_json::from_str(contents).map_err(|source| MappingError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let stored_count = stored.len();

        let mut latest: HashMap<String, Option<String>> = HashMap::with_capacity(stored_count);
        for entry in stored {
            latest.insert(entry.template_name, normalize_global_name(entry.global_name));
        }
        let unique_count = latest.len();

        let entries: Vec<MappingEntry> = template_columns
            .iter()
            .enumerate()
            .map(|(col_pos, column)| MappingEntry {
                template_name: column.clone(),
                global_name: latest.get(column).cloned().flatten(),
                col_pos,
            })
            .collect();
        let foreign = latest
            .keys()
            .filter(|name| !template_columns.contains(name))
            .count();
        let table = MappingTable::new(entries);
        debug!(
            path = %self.path.display(),
            stored = stored_count,
            overridden = stored_count - unique_count,
            ignored = foreign,
            mapped = table.mapped().count(),
            columns = table.len(),
            "loaded mapping"
        );
        Ok(table)
    }

    fn create(&self, template_columns: &[String]) -> Result<MappingTable> {
        let scaffold: Vec<MappingFileEntry> = template_columns
            .iter()
            .map(MappingFileEntry::scaffold)
            .collect();
        let bytes = render_scaffold(&scaffold)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;

        // The scaffold only appears at its final path once fully written.
        let mut staged = NamedTempFile::new_in(dir).map_err(|source| self.io_error(source))?;
        staged
            .write_all(&bytes)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| self.io_error(source))?;
        match staged.persist_noclobber(&self.path) {
            Ok(_) => {}
            // Another invocation won the race; its file is authoritative.
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                let contents =
                    fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
                return self.load(&contents, template_columns);
            }
            Err(err) => return Err(self.io_error(err.error)),
        }
        info!(
            path = %self.path.display(),
            columns = scaffold.len(),
            "created mapping scaffold"
        );

        let entries = scaffold
            .into_iter()
            .enumerate()
            .map(|(col_pos, entry)| MappingEntry {
                template_name: entry.template_name,
                global_name: None,
                col_pos,
            })
            .collect();
        Ok(MappingTable::new(entries))
    }

    fn io_error(&self, source: std::io::Error) -> MappingError {
        MappingError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn normalize_global_name(name: Option<String>) -> Option<String> {
    name.filter(|value| !value.trim().is_empty())
}

fn render_scaffold(scaffold: &[MappingFileEntry]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    scaffold
        .serialize(&mut serializer)
        .map_err(MappingError::Serialize)?;
    bytes.push(b'\n');
    Ok(bytes)
}
