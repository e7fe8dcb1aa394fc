// irix-assembler/src/coerce.rs
//
// Coercion of raw JSON values into the typed representations the report
// schema expects. Date failures are hard errors; boolean coercion is total.

use chrono::{DateTime, SubsecRound, Utc};
use num_bigint::BigInt;
use serde_json::Value;

use crate::error::{IrixError, Result};

/// Parse an ISO-8601 date-time with a mandatory offset or zone and normalize
/// it to UTC at seconds precision.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| IrixError::InvalidDateTime(format!("{raw}: {e}")))?;
    Ok(parsed.with_timezone(&Utc).trunc_subsecs(0))
}

/// True iff the case-insensitive string form of the value is "true".
/// Anything else, malformed values included, is false.
pub fn parse_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Convert a JSON number into an arbitrary-precision integer.
pub fn parse_integer(value: &Value) -> Result<BigInt> {
    match value {
        Value::Number(n) => n
            .to_string()
            .parse::<BigInt>()
            .map_err(|_| IrixError::InvalidNumber(n.to_string())),
        other => Err(IrixError::InvalidNumber(json_type_name(other).to_string())),
    }
}

/// Scalar → one-element list of its string form; array → string form of each
/// element in order. Nulls and nested containers contribute nothing.
pub fn as_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

/// String form of a scalar JSON value, None for null/containers.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
