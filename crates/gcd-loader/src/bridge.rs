//! Adapter between the loader and [`ModuleSchemaValidator`].
//!
//! Flattens a validation report into the loader's view. A validator that
//! cannot run is reported as a single synthetic error on the descriptor
//! root rather than propagated.

use serde_json::Value;

use gcd_core::FieldPath;
use gcd_schema::{ModuleSchemaValidator, ValidationError};

/// Validation outcome for one raw descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeOutcome {
    pub is_valid: bool,
    /// Every violation, structural errors first.
    pub errors: Vec<ValidationError>,
    /// Canonical schema for the generator; `Some` only when valid.
    pub validated_schema: Option<Value>,
}

/// Validate `raw` and normalize the outcome.
pub fn run_schema_validation(validator: &ModuleSchemaValidator, raw: &Value) -> BridgeOutcome {
    match validator.validate(raw) {
        Ok(report) => {
            let is_valid = report.is_valid();
            let validated_schema = if is_valid {
                Some(report.normalized.unwrap_or_else(|| raw.clone()))
            } else {
                None
            };
            BridgeOutcome {
                is_valid,
                errors: report.result.into_errors(),
                validated_schema,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "schema validator failed");
            BridgeOutcome {
                is_valid: false,
                errors: vec![ValidationError::new(
                    FieldPath::root(),
                    format!("schema validator failed: {e}"),
                )],
                validated_schema: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> ModuleSchemaValidator {
        ModuleSchemaValidator::bundled().unwrap()
    }

    #[test]
    fn valid_descriptor_yields_normalized_schema() {
        let raw = json!({"id": "m", "version": "1", "fields": {"a": {"type": "string"}}});
        let outcome = run_schema_validation(&validator(), &raw);
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
        assert_eq!(
            outcome.validated_schema.unwrap()["fields"],
            json!([{"id": "a", "type": "string"}])
        );
    }

    #[test]
    fn invalid_descriptor_has_errors_and_no_schema() {
        let raw = json!({"id": "m", "fields": {}});
        let outcome = run_schema_validation(&validator(), &raw);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.validated_schema.is_none());
    }

    #[test]
    fn validator_failure_becomes_one_root_error() {
        let mut deep = json!({"type": "string"});
        for _ in 0..(gcd_schema::MAX_DEPTH + 4) {
            deep = json!({"type": "array", "items": deep});
        }
        let raw = json!({"id": "m", "version": "1", "fields": {"deep": deep}});

        let outcome = run_schema_validation(&validator(), &raw);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].path.is_root());
        assert!(outcome.errors[0].message.starts_with("schema validator failed: "));
        assert!(outcome.validated_schema.is_none());
    }
}
