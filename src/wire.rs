//! Small typed accessors over `serde_json::Value` shared by every decode
//! path. Each helper rejects with a [`ParseError`] naming the offending
//! field, so malformed payloads fail loudly instead of producing a
//! partially populated record.

use crate::error::ParseError;
use serde_json::{Map, Value};

pub(crate) fn require_object<'a>(
    json: &'a Value,
    field: &str,
) -> Result<&'a Map<String, Value>, ParseError> {
    match json.get(field) {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(wrong_type(field, "object")),
        None => Err(missing(field)),
    }
}

pub(crate) fn require_str(json: &Value, field: &str) -> Result<String, ParseError> {
    match json.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(wrong_type(field, "string")),
        None => Err(missing(field)),
    }
}

pub(crate) fn require_u32(json: &Value, field: &str) -> Result<u32, ParseError> {
    match json.get(field) {
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| wrong_type(field, "unsigned integer")),
        None => Err(missing(field)),
    }
}

pub(crate) fn require_u64(json: &Value, field: &str) -> Result<u64, ParseError> {
    match json.get(field) {
        Some(value) => value
            .as_u64()
            .ok_or_else(|| wrong_type(field, "unsigned integer")),
        None => Err(missing(field)),
    }
}

pub(crate) fn require_bool(json: &Value, field: &str) -> Result<bool, ParseError> {
    match json.get(field) {
        Some(value) => value.as_bool().ok_or_else(|| wrong_type(field, "boolean")),
        None => Err(missing(field)),
    }
}

/// Absent fields and explicit `null` both decode to `None`; any other
/// non-string value is a type error.
pub(crate) fn opt_str(json: &Value, field: &str) -> Result<Option<String>, ParseError> {
    match json.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(wrong_type(field, "string")),
    }
}

pub(crate) fn opt_u32(json: &Value, field: &str) -> Result<Option<u32>, ParseError> {
    match json.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| wrong_type(field, "unsigned integer")),
    }
}

pub(crate) fn missing(field: &str) -> ParseError {
    ParseError::MissingField(field.to_string())
}

pub(crate) fn wrong_type(field: &str, expected: &'static str) -> ParseError {
    ParseError::WrongType {
        field: field.to_string(),
        expected,
    }
}
