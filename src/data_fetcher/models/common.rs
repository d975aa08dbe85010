//! Lenient deserializers for the sports data API payloads.
//!
//! The API is loose about optional fields: list fields can be missing, `null`
//! or something other than an array, and optional text fields are often an
//! empty string. Both are normalized here so callers never see a parse error
//! for them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Deserializes a list field, treating `null`, a missing key (with
/// `#[serde(default)]`) or a non-array value as an empty list. Elements that
/// fail to decode are skipped.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Expected a JSON array, got {}; treating as empty", json_type(&other));
            return Ok(Vec::new());
        }
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping undecodable list element: {e}");
                None
            }
        })
        .collect();

    if decoded.len() != total {
        warn!("Decoded {} of {} list elements", decoded.len(), total);
    }

    Ok(decoded)
}

/// Deserializes an optional string, mapping blank strings to `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
