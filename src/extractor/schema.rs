//! Syntactic schema gate. Deliberately narrow: this is not a JSON-Schema
//! validator, only the cheap shape checks consulted before any I/O happens.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema cannot be empty")]
    Empty,

    #[error("Schema must be a JSON object")]
    NotAnObject,
}

/// Accepts any non-empty JSON object; rejects everything else.
pub fn validate(schema: &Value) -> Result<(), SchemaError> {
    match schema {
        Value::Object(map) if map.is_empty() => Err(SchemaError::Empty),
        Value::Object(_) => Ok(()),
        _ => Err(SchemaError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_is_rejected_with_message() {
        let err = validate(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Schema cannot be empty");
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(validate(&json!("string")).is_err());
        assert!(validate(&json!(42)).is_err());
        assert!(validate(&json!([1, 2])).is_err());
        assert!(validate(&json!(null)).is_err());
    }

    #[test]
    fn object_schemas_pass() {
        let schema = json!({
            "type": "object",
            "properties": {"invoiceNumber": {"type": "string"}},
            "required": ["invoiceNumber"]
        });
        assert!(validate(&schema).is_ok());
    }
}
