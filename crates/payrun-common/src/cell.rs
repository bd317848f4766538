//! Cell value conversions.
//!
//! Region tables are polars `DataFrame`s; the writer renders every `AnyValue`
//! to the raw text stored in a sheet cell. Source records are JSON, so the same
//! rendering rules apply to `serde_json::Value` scalars.

use polars::prelude::AnyValue;
use serde_json::Value;

/// Converts a Polars `AnyValue` to its cell text.
///
/// Returns an empty string for `Null`. Integral floats lose their fraction so
/// spreadsheet-style numbers (`1001.0`) render as `1001`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use payrun_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(52000.0)), "52000");
/// assert_eq!(any_to_string(AnyValue::String("DE89")), "DE89");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to cell text, `None` for nulls.
///
/// The writer leaves the template cell untouched only when the region has no
/// column at that position; a null value still clears the cell.
pub fn any_to_cell(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        other => Some(any_to_string(other)),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use payrun_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    v.to_string()
}

/// Renders a JSON scalar as plain text, `None` for `null`.
///
/// Strings are returned verbatim (no quotes), numbers through
/// [`format_numeric`] when they are floats. Arrays and objects render as
/// compact JSON.
pub fn json_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(v), _, _) => v.to_string(),
            (None, Some(v), _) => v.to_string(),
            (None, None, Some(v)) => format_numeric(v),
            _ => n.to_string(),
        }),
        other => Some(other.to_string()),
    }
}

/// Parses an integral value, accepting spreadsheet floats like `"42.0"`.
///
/// Returns `None` for empty strings, non-numbers and numbers with a
/// fractional part.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15 {
        Some(float as i64)
    } else {
        None
    }
}
