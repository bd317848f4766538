//! Run context extraction.

use std::path::Path;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use payrun_common::json_to_text;
use payrun_model::RecordKey;

use crate::dates::{format_out_date, parse_pay_date};
use crate::error::{CoreError, Result};

/// Run-level metadata every auxiliary source is filtered against.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub company: String,
    pub company_id: RecordKey,
    pub country: String,
    pub country_abbr: String,
    pub pay_date: NaiveDate,
    pub month: String,
    /// Metadata fields not consumed above.
    pub extra: Map<String, Value>,
}

impl RunContext {
    /// Values for the info cells: company, pay date, month.
    pub fn info_values(&self) -> [String; 3] {
        [
            self.company.clone(),
            format_out_date(self.pay_date),
            self.month.clone(),
        ]
    }
}

fn required<'a>(meta: &'a Map<String, Value>, key: &'static str, path: &Path) -> Result<&'a Value> {
    match meta.get(key) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(CoreError::MissingField {
            key,
            path: path.to_path_buf(),
        }),
    }
}

fn required_text(meta: &Map<String, Value>, key: &'static str, path: &Path) -> Result<String> {
    let value = required(meta, key, path)?;
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            json_to_text(value).ok_or_else(|| CoreError::MissingField {
                key,
                path: path.to_path_buf(),
            })
        }
        _ => Err(CoreError::InvalidField {
            key,
            path: path.to_path_buf(),
            expected: "a scalar",
        }),
    }
}

/// Pulls the run context out of the metadata of `payrun_data.json`.
///
/// `path` is only used to name the file in errors.
pub fn extract_context(meta: &Map<String, Value>, path: &Path) -> Result<RunContext> {
    let company = required_text(meta, "company", path)?;
    let pay_date_raw = required_text(meta, "payDate", path)?;
    let month = required_text(meta, "month", path)?;
    let company_id = RecordKey::from_json(required(meta, "companyId", path)?).ok_or_else(|| {
        CoreError::InvalidField {
            key: "companyId",
            path: path.to_path_buf(),
            expected: "a scalar id",
        }
    })?;
    let country = required_text(meta, "country", path)?;
    let country_abbr = required_text(meta, "countryAbbr", path)?;

    let pay_date = parse_pay_date(&pay_date_raw).ok_or_else(|| CoreError::InvalidDate {
        field: "payDate".to_string(),
        value: pay_date_raw.clone(),
    })?;

    let mut extra = meta.clone();
    for key in ["company", "payDate", "month", "companyId", "country", "countryAbbr"] {
        extra.remove(key);
    }

    Ok(RunContext {
        company,
        company_id,
        country,
        country_abbr,
        pay_date,
        month,
        extra,
    })
}
