//! Field-level deserializers that repair malformed stored values.
//!
//! Stored records are hand-editable YAML. A field with the wrong shape
//! degrades to its empty value instead of failing the whole record; the
//! owning type then fills in its default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::util::parse_iso_datetime;

/// Timestamp stored as an ISO string; anything unparsable becomes `None`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_iso_datetime))
}

/// Scalar rendered as text; sequences, maps and null become `None`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

/// Boolean flag; any non-boolean value reads as `false`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// List of strings; scalars inside the list are stringified, a non-list
/// value becomes empty.
pub fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Sequence(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items.into_iter().filter_map(scalar_text).collect())
}

/// Opaque list of JSON-compatible values; a non-list value becomes empty.
pub fn lenient_value_list<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Array(items)) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
