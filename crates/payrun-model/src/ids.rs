use std::fmt;

use payrun_common::parse_i64;
use serde_json::Value;

use crate::ModelError;

/// A scalar join key read from a sheet cell or a JSON field.
///
/// Integral values compare numerically no matter how they were encoded
/// (`5`, `5.0`, `"5"`), everything else compares as trimmed text. Integers
/// sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKey {
    Integer(i64),
    Text(String),
}

impl RecordKey {
    /// Parses a raw cell, `None` when the cell is blank.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match parse_i64(trimmed) {
            Some(value) => Self::Integer(value),
            None => Self::Text(trimmed.to_string()),
        })
    }

    /// Reads a JSON scalar, `None` for `null`, arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => {
                if let Some(v) = number.as_i64() {
                    return Some(Self::Integer(v));
                }
                Self::parse(&number.to_string())
            }
            Value::String(s) => Self::parse(s),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Whether this key equals the given JSON scalar under key semantics.
    pub fn matches_json(&self, value: &Value) -> bool {
        Self::from_json(value).is_some_and(|other| &other == self)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl serde::Serialize for RecordKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// An employee identity, unique within a run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct EmployeeId(RecordKey);

impl EmployeeId {
    pub fn new(key: RecordKey) -> Self {
        Self(key)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        RecordKey::parse(raw).map(Self)
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        RecordKey::from_json(value).map(Self)
    }

    pub fn key(&self) -> &RecordKey {
        &self.0
    }
}

impl From<i64> for EmployeeId {
    fn from(value: i64) -> Self {
        Self(RecordKey::Integer(value))
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The ascending, duplicate-free identity axis every source is aligned to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalIds(Vec<EmployeeId>);

impl CanonicalIds {
    /// Accepts a sequence that is already strictly ascending.
    pub fn from_sorted(ids: Vec<EmployeeId>) -> Result<Self, ModelError> {
        for pair in ids.windows(2) {
            match pair[0].cmp(&pair[1]) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    return Err(ModelError::DuplicateIdentity {
                        id: pair[0].to_string(),
                    });
                }
                std::cmp::Ordering::Greater => {
                    return Err(ModelError::UnsortedIdentities {
                        previous: pair[0].to_string(),
                        next: pair[1].to_string(),
                    });
                }
            }
        }
        Ok(Self(ids))
    }

    /// Sorts the given identities; fails on duplicates.
    pub fn from_unsorted(mut ids: Vec<EmployeeId>) -> Result<Self, ModelError> {
        ids.sort();
        Self::from_sorted(ids)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[EmployeeId] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeId> {
        self.0.iter()
    }

    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.0.binary_search(id).is_ok()
    }
}

impl<'a> IntoIterator for &'a CanonicalIds {
    type Item = &'a EmployeeId;
    type IntoIter = std::slice::Iter<'a, EmployeeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
