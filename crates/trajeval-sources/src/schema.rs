//! JSON Schema validation for annotation records.
//!
//! Every annotation record is checked structurally before it is decoded, so
//! a bad record is rejected with every violation listed rather than the
//! first serde error.

use serde_json::{json, Value};
use tracing::debug;

use trajeval_contracts::error::{TrajevalError, TrajevalResult};

/// The structural contract for one annotation record.
pub fn annotation_record_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "task_id": { "type": "string" },
            "task_name": { "type": "string" },
            "hash": { "type": "string" },
            "app": { "type": ["string", "null"] },
            "actions": { "type": "array", "items": { "type": "string" } },
            "evals": {
                "oneOf": [
                    { "type": "array", "items": { "type": "boolean" } },
                    { "type": "string" }
                ]
            },
            "end_correctly": { "type": "boolean" }
        },
        "required": ["evals"]
    })
}

/// A compiled record validator.
pub struct RecordValidator {
    validator: jsonschema::Validator,
}

impl RecordValidator {
    /// Compile the annotation record schema.
    pub fn annotation() -> TrajevalResult<Self> {
        Self::compile(&annotation_record_schema())
    }

    /// Compile an arbitrary schema document.
    ///
    /// Returns `SchemaValidation` when the document is not a valid schema.
    pub fn compile(schema: &Value) -> TrajevalResult<Self> {
        let validator = jsonschema::validator_for(schema).map_err(|e| TrajevalError::SchemaValidation {
            reason: format!("invalid JSON Schema document: {e}"),
        })?;
        Ok(Self { validator })
    }

    /// Every violation of the schema by `instance`; empty when valid.
    pub fn violations(&self, instance: &Value) -> Vec<String> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|error| format!("{} at '{}'", error, error.instance_path))
            .collect();
        debug!(violations = violations.len(), "record validated");
        violations
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::RecordValidator;

    #[test]
    fn accepts_boolean_array_and_token_string() {
        let v = RecordValidator::annotation().unwrap();
        assert!(v.violations(&json!({ "evals": [true, false] })).is_empty());
        assert!(v.violations(&json!({ "evals": "[t, f]", "end_correctly": true })).is_empty());
    }

    #[test]
    fn rejects_missing_evals() {
        let v = RecordValidator::annotation().unwrap();
        let violations = v.violations(&json!({ "actions": ["tap"] }));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("evals"), "{violations:?}");
    }

    #[test]
    fn collects_every_violation() {
        let v = RecordValidator::annotation().unwrap();
        let violations = v.violations(&json!({
            "evals": [true, 3],
            "end_correctly": "yes",
            "actions": "tap"
        }));
        assert!(violations.len() >= 3, "{violations:?}");
    }

    #[test]
    fn invalid_schema_is_reported() {
        let result = RecordValidator::compile(&json!({ "type": 12 }));
        assert!(result.is_err());
    }
}
