//! # Validation Reports
//!
//! Path-tagged validation errors and the two-state validation result.
//! Errors keep discovery order and may repeat: the structural and domain
//! layers are allowed to report the same node independently.

use std::fmt;

use serde::Serialize;

use gcd_core::FieldPath;

/// A single violation found in a module descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Location of the violating node.
    pub path: FieldPath,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Build an error at `path`.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "errors", rename_all = "lowercase")]
pub enum ValidationResult {
    /// No violations.
    Valid,
    /// At least one violation, in discovery order.
    Invalid(Vec<ValidationError>),
}

impl ValidationResult {
    /// `Valid` for an empty list, `Invalid` otherwise.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// True when there are no violations.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The violations (empty for `Valid`).
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Consumes self and returns the violations.
    pub fn into_errors(self) -> Vec<ValidationError> {
        match self {
            Self::Valid => Vec::new(),
            Self::Invalid(errors) => errors,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid(errors) => {
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "  {e}")?;
                }
                Ok(())
            }
        }
    }
}

/// Accumulator threaded through recursive validation.
#[derive(Debug, Default)]
pub(crate) struct ErrorCollector {
    errors: Vec<ValidationError>,
}

impl ErrorCollector {
    pub(crate) fn add(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.errors.push(ValidationError::new(path.clone(), message));
    }

    pub(crate) fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_path() {
        let e = ValidationError::new(FieldPath::key("id"), "id must be a string");
        assert_eq!(e.to_string(), "id: id must be a string");
    }

    #[test]
    fn display_root_label() {
        let e = ValidationError::new(FieldPath::root(), "module schema must be a JSON object at the root");
        assert!(e.to_string().starts_with("<root>: "));
    }

    #[test]
    fn from_errors_classifies() {
        assert!(ValidationResult::from_errors(Vec::new()).is_valid());
        let invalid = ValidationResult::from_errors(vec![ValidationError::new(
            FieldPath::key("version"),
            "missing required key \"version\"",
        )]);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.errors().len(), 1);
    }

    #[test]
    fn serializes_with_status_tag() {
        let valid = serde_json::to_value(ValidationResult::Valid).unwrap();
        assert_eq!(valid, serde_json::json!({"status": "valid"}));

        let invalid = serde_json::to_value(ValidationResult::Invalid(vec![ValidationError::new(
            FieldPath::key("fields").join("a"),
            "field definition must be an object",
        )]))
        .unwrap();
        assert_eq!(invalid["status"], "invalid");
        assert_eq!(invalid["errors"][0]["path"], "fields.a");
    }
}
