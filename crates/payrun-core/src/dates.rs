//! Date parsing and output formatting.
//!
//! Output dates always carry a four-digit year (`%Y`); a two-digit year would
//! fold work start dates such as 1899 into the wrong century.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{CoreError, Result};

/// Output date format for every date cell.
pub const OUT_DATE_FORMAT: &str = "%d.%m.%Y";

/// On-disk format of the run's pay date (`31/Dec/2022`).
pub const PAY_DATE_FORMAT: &str = "%d/%b/%Y";

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn format_out_date(date: NaiveDate) -> String {
    date.format(OUT_DATE_FORMAT).to_string()
}

pub fn parse_pay_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), PAY_DATE_FORMAT).ok()
}

/// Parses an ISO 8601 date or date-time, keeping only the calendar date.
///
/// Offsets (`Z`, `+01:00`) are accepted and the local date as written is
/// kept, not the UTC one.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(value.naive_local().date());
    }
    for format in ISO_DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(value.date());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Converts an optional ISO date cell to the output format.
///
/// Blank input stays blank; anything unparsable is an error so bad dates
/// never disappear silently.
pub fn convert_iso_date(field: &str, raw: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    parse_iso_date(raw)
        .map(|date| Some(format_out_date(date)))
        .ok_or_else(|| CoreError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
        })
}
