use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, ReintError};

fn encode_error(code: &str, err: impl ToString) -> ReintError {
    ReintError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn decode_error(code: &str, err: impl ToString) -> ReintError {
    ReintError::MalformedInput(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ReintError> {
    let value = serde_json::to_value(value).map_err(|err| encode_error("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| encode_error("json_write", err))?;
    Ok(bytes)
}

/// Serializes a value into indented JSON with deterministic key order.
pub fn to_pretty_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ReintError> {
    let value = serde_json::to_value(value).map_err(|err| encode_error("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = serde_json::to_vec_pretty(&canonical)
        .map_err(|err| encode_error("json_write", err))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Deserializes a value from JSON bytes; schema violations are malformed input.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ReintError> {
    serde_json::from_slice(data).map_err(|err| decode_error("json_deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, ReintError> {
    serde_yaml::to_string(value).map_err(|err| encode_error("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ReintError> {
    serde_yaml::from_slice(data).map_err(|err| decode_error("yaml_deserialize", err))
}
