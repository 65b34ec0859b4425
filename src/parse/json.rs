use serde_json::{Map, Value};

use crate::errors::ParseError;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses a JSON object.
pub fn parse_json_to_map(text: &str) -> Result<Map<String, Value>, ParseError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::UnexpectedJson {
            expected: "object",
            found: kind_of(&other),
        }),
    }
}

/// Parses a JSON array.
pub fn parse_json_to_list(text: &str) -> Result<Vec<Value>, ParseError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(list) => Ok(list),
        other => Err(ParseError::UnexpectedJson {
            expected: "array",
            found: kind_of(&other),
        }),
    }
}
