//! Canonical JSON encoding with lexicographically ordered object keys.

use std::collections::BTreeMap;

use ::serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, NdlmError};

fn serde_error(code: &str, err: impl ToString) -> NdlmError {
    NdlmError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, val)| (key, canonicalize(val)))
                .collect();
            Value::Object(ordered.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Compact JSON with every object's keys in byte order.
///
/// Infinite and NaN floats become `null`, so a failed verdict whose errors
/// are infinite still serializes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, NdlmError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

