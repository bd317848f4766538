use serde::{Deserialize, Serialize};

/// One entry as stored in the mapping file.
///
/// `colPos` is never stored; unknown keys a user adds are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingFileEntry {
    #[serde(default)]
    pub global_name: Option<String>,
    pub template_name: String,
}

impl MappingFileEntry {
    pub fn scaffold(template_name: impl Into<String>) -> Self {
        Self {
            global_name: None,
            template_name: template_name.into(),
        }
    }
}

/// A template column paired with the source field that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub template_name: String,
    /// `None` when unmapped; an empty string in the file reads as `None`.
    pub global_name: Option<String>,
    /// 0-based offset of the column within the template detail range.
    pub col_pos: usize,
}

/// Mapping entries in template column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, template_name: &str) -> Option<&MappingEntry> {
        self.entries
            .iter()
            .find(|entry| entry.template_name == template_name)
    }

    /// Entries that name a source field.
    pub fn mapped(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(|entry| entry.global_name.is_some())
    }
}
