//! Envelope normalization.
//!
//! The backend wraps payloads inconsistently. The same list of events
//! may arrive as any of:
//!
//! ```text
//! {"success": true, "data": [...]}             success envelope
//! {"success": true, "data": {"events": [...]}} envelope around a keyed wrapper
//! {"events": [...]}                            keyed wrapper
//! [...]                                        bare resource
//! ```
//!
//! [`normalize`] is the one place that peels these layers off, so no
//! resource method ever guesses at shapes.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ApiError;

/// Extracts the payload from a parsed 2xx body.
///
/// Rules, first match wins:
///
/// 1. An object with a boolean `success`:
///    - `false` is an [`ApiError::Http`] carrying the envelope's
///      `message` (or `error`) and `status`;
///    - otherwise the payload is `data`, unwrapped once more by rule 2;
///    - with no `data`, the value under `resource_key` if present, else
///      `null` (a bare acknowledgement).
/// 2. An object containing `resource_key`: the value under that key.
/// 3. Any other object or array: the body itself.
/// 4. Anything else is [`ApiError::InvalidResponse`].
pub fn normalize(
    status: u16,
    body: Value,
    resource_key: Option<&str>,
) -> Result<Value, ApiError> {
    match body {
        Value::Object(mut map) if is_envelope(&map) => {
            if map.get("success") == Some(&Value::Bool(false)) {
                let message = message_field(&map)
                    .unwrap_or_else(|| format!("HTTP Error: {status}"));
                return Err(ApiError::Http { status, message });
            }
            match map.remove("data") {
                Some(Value::Null) | None => Ok(resource_key
                    .and_then(|key| map.remove(key))
                    .unwrap_or(Value::Null)),
                Some(data) => Ok(unwrap_keyed(data, resource_key)),
            }
        }
        Value::Object(_) => Ok(unwrap_keyed(body, resource_key)),
        Value::Array(_) => Ok(body),
        other => Err(ApiError::InvalidResponse(format!(
            "expected a JSON object or array, got {}",
            type_name(&other)
        ))),
    }
}

/// Decodes a normalized payload into `R`.
pub fn decode<R: DeserializeOwned>(payload: Value) -> Result<R, ApiError> {
    serde_json::from_value(payload).map_err(|e| {
        ApiError::InvalidResponse(format!("unexpected payload shape: {e}"))
    })
}

/// The server's human-readable message: `message`, else `error`.
pub(crate) fn message_field(map: &Map<String, Value>) -> Option<String> {
    ["message", "error"]
        .into_iter()
        .filter_map(|key| map.get(key).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn is_envelope(map: &Map<String, Value>) -> bool {
    matches!(map.get("success"), Some(Value::Bool(_)))
}

fn unwrap_keyed(value: Value, resource_key: Option<&str>) -> Value {
    match (value, resource_key) {
        (Value::Object(mut map), Some(key)) if map.contains_key(key) => {
            map.remove(key).unwrap_or_default()
        }
        (value, _) => value,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
