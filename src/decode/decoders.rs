//! Decoder implementations

use super::types::{DecoderConfig, RecordDecoder};
use crate::error::{Error, Result};
use crate::types::Record;
use serde_json::Value;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Dot path to the record array
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Create a decoder from its configuration
    pub fn from_config(config: &DecoderConfig) -> Self {
        Self {
            record_path: config.record_path.clone(),
        }
    }

    /// Locate the record array within the parsed document
    fn extract_records(&self, value: Value) -> Result<Vec<Value>> {
        let target = match &self.record_path {
            Some(path) => extract_simple_path(value, path)
                .ok_or_else(|| Error::unexpected_format(format!("no value at '{path}'")))?,
            None => value,
        };

        match target {
            Value::Array(items) => Ok(items),
            other => Err(Error::unexpected_format(json_type_name(&other))),
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Record>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        self.extract_records(value)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(Error::unexpected_format(format!(
                        "{} at index {index}",
                        json_type_name(&item)
                    )));
                }
                serde_json::from_value(item)
                    .map_err(|e| Error::decode(format!("Invalid record at index {index}: {e}")))
            })
            .collect()
    }
}

/// Name of a JSON value's type, for error messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Walk a dot-notation path (`$.` prefix optional, `name[0]` indexing)
fn extract_simple_path(value: Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index = part[bracket_pos + 1..]
                .strip_suffix(']')?
                .parse::<usize>()
                .ok()?;

            if !name.is_empty() {
                current = take_field(current, name)?;
            }
            current = match current {
                Value::Array(mut items) if index < items.len() => items.swap_remove(index),
                _ => return None,
            };
        } else {
            current = take_field(current, part)?;
        }
    }

    Some(current)
}

fn take_field(value: Value, name: &str) -> Option<Value> {
    match value {
        Value::Object(mut map) => map.remove(name),
        _ => None,
    }
}
