//! Helpers for building expected values documents.

use anyhow::{Result, anyhow};
use serde_json::{Map, Value};

/// Unwraps a `json!({...})` literal into the map type returned by merging.
///
/// # Errors
///
/// Returns an error when `value` is not a JSON object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use test_helpers::json::object;
///
/// let map = object(json!({"a": 1})).expect("object literal");
/// assert_eq!(map["a"], 1);
/// ```
pub fn object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected a JSON object, got {other}")),
    }
}
