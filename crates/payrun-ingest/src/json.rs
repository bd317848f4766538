use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use payrun_model::SourceRecord;

use crate::error::{IngestError, Result};

const LINE_ITEMS_KEY: &str = "payrun_data";
const GLOBAL_MAPPINGS_KEY: &str = "mappings";

/// The run metadata file split into its three parts.
#[derive(Debug, Clone, Default)]
pub struct PayrunData {
    /// Scalar metadata left after the embedded collections are taken out.
    pub meta: Map<String, Value>,
    /// Per-employee line items (`payrun_data`).
    pub line_items: Vec<SourceRecord>,
    /// Global field mappings embedded in the run (`mappings`).
    pub global_mappings: Vec<SourceRecord>,
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON file holding a list of records.
///
/// Elements are returned unchecked; the aligner decides what a malformed
/// element means for its source.
pub fn read_record_list(path: &Path) -> Result<Vec<Value>> {
    match read_json(path)? {
        Value::Array(items) => {
            debug!(path = %path.display(), records = items.len(), "read record list");
            Ok(items)
        }
        _ => Err(IngestError::UnexpectedShape {
            path: path.to_path_buf(),
            expected: "a JSON array of records",
        }),
    }
}

fn take_collection(
    meta: &mut Map<String, Value>,
    key: &'static str,
    path: &Path,
) -> Result<Vec<SourceRecord>> {
    let value = meta.remove(key).ok_or_else(|| IngestError::MissingCollection {
        key,
        path: path.to_path_buf(),
    })?;
    let Value::Array(items) = value else {
        return Err(IngestError::UnexpectedShape {
            path: path.to_path_buf(),
            expected: "embedded collections to be arrays",
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            SourceRecord::try_from(item).map_err(|source| IngestError::MalformedRecord {
                key,
                index,
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

/// Reads `payrun_data.json`.
///
/// The `payrun_data` and `mappings` arrays are extracted first; everything
/// else in the object is treated as run metadata.
pub fn read_payrun_data(path: &Path) -> Result<PayrunData> {
    let Value::Object(mut meta) = read_json(path)? else {
        return Err(IngestError::UnexpectedShape {
            path: path.to_path_buf(),
            expected: "a JSON object",
        });
    };
    let line_items = take_collection(&mut meta, LINE_ITEMS_KEY, path)?;
    let global_mappings = take_collection(&mut meta, GLOBAL_MAPPINGS_KEY, path)?;
    debug!(
        path = %path.display(),
        meta_fields = meta.len(),
        line_items = line_items.len(),
        global_mappings = global_mappings.len(),
        "read payrun data"
    );
    Ok(PayrunData {
        meta,
        line_items,
        global_mappings,
    })
}
