//! Envelope key normalization.

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Convert a snake_case or kebab-case key to camelCase.
///
/// Keys already in camelCase pass through unchanged.
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' {
            // Leading separators have nothing to capitalize.
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Build a working copy of an envelope with camelized top-level keys.
///
/// Only the top level is rewritten; nested records keep their wire names.
pub fn camelize_keys(raw: &Value) -> Result<Map<String, Value>> {
    let Value::Object(map) = raw else {
        return Err(Error::NotAnObject {
            found: json_kind(raw),
        });
    };
    Ok(map
        .iter()
        .map(|(key, value)| (camelize(key), value.clone()))
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
