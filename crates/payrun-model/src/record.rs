use payrun_common::json_to_text;
use serde_json::{Map, Value};

use crate::ModelError;

/// One object from an auxiliary JSON source.
///
/// Fields are addressed by dotted paths so nested references
/// (`companyRef.id`, `startDate.date`) read the same way as flat ones.
/// A `null` field and an absent field are indistinguishable.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct SourceRecord(Map<String, Value>);

impl SourceRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The non-null value at `path`.
    pub fn value(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.0.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        if current.is_null() { None } else { Some(current) }
    }

    pub fn text(&self, path: &str) -> Option<String> {
        self.value(path).and_then(json_to_text)
    }

    /// Whether the top-level field exists at all, even as `null`.
    pub fn has_field(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for SourceRecord {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Err(ModelError::NotAnObject { found: "null" }),
            Value::Bool(_) => Err(ModelError::NotAnObject { found: "boolean" }),
            Value::Number(_) => Err(ModelError::NotAnObject { found: "number" }),
            Value::String(_) => Err(ModelError::NotAnObject { found: "string" }),
            Value::Array(_) => Err(ModelError::NotAnObject { found: "array" }),
        }
    }
}
