//! JSON Schema validation of finished documents

use serde_json::Value;

use crate::error::{ConvertError, Result};

/// First violation found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Slash-separated instance path, "root" for the document itself
    pub path: String,
    pub message: String,
    /// Schema keyword that failed, e.g. `required` or `type`
    pub rule: String,
}

impl From<Violation> for ConvertError {
    fn from(v: Violation) -> Self {
        ConvertError::Validation {
            path: v.path,
            message: v.message,
            rule: v.rule,
        }
    }
}

pub trait SchemaValidator {
    /// `Ok(None)` when the document conforms. An unusable schema is an error.
    fn first_violation(&self, schema: &Value, data: &Value) -> Result<Option<Violation>>;

    fn validate(&self, schema: &Value, data: &Value) -> Result<()> {
        match self.first_violation(schema, data)? {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }
}

/// Validator backed by the `jsonschema` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn first_violation(&self, schema: &Value, data: &Value) -> Result<Option<Violation>> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| ConvertError::Schema(e.to_string()))?;

        let Some(error) = validator.iter_errors(data).next() else {
            return Ok(None);
        };

        let pointer = error.instance_path.to_string();
        let path = pointer.trim_start_matches('/').to_string();
        let schema_path = error.schema_path.to_string();
        let rule = schema_path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("unknown")
            .to_string();

        Ok(Some(Violation {
            path: if path.is_empty() { "root".to_string() } else { path },
            message: error.to_string(),
            rule,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["info", "hk4e"],
            "properties": {
                "info": {"type": "object"},
                "hk4e": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"uid": {"type": "string"}}
                    }
                }
            }
        })
    }

    #[test]
    fn test_conforming_document() {
        let data = json!({"info": {}, "hk4e": [{"uid": "700000001"}]});
        assert!(JsonSchemaValidator.validate(&schema(), &data).is_ok());
    }

    #[test]
    fn test_nested_violation_path_and_rule() {
        let data = json!({"info": {}, "hk4e": [{"uid": 700000001}]});
        let violation = JsonSchemaValidator
            .first_violation(&schema(), &data)
            .unwrap()
            .unwrap();

        assert_eq!(violation.path, "hk4e/0/uid");
        assert_eq!(violation.rule, "type");
    }

    #[test]
    fn test_root_violation() {
        let data = json!({"info": {}});
        let err = JsonSchemaValidator.validate(&schema(), &data).unwrap_err();

        match err {
            ConvertError::Validation { path, rule, .. } => {
                assert_eq!(path, "root");
                assert_eq!(rule, "required");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_schema() {
        let err = JsonSchemaValidator
            .validate(&json!({"type": 12}), &json!({}))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Schema(_)));
    }
}
