//! # Module Schema Validator
//!
//! Runs structural validation against the meta-schema, then the domain
//! rules, and concatenates the two error lists (structural first). A
//! descriptor is valid only when both layers report nothing; the
//! normalized form is produced for valid descriptors only.
//!
//! ## Thread Safety
//!
//! `ModuleSchemaValidator` is `Send + Sync`. The meta-schema is parsed once
//! at construction; each call to [`ModuleSchemaValidator::validate`] keeps
//! its own error accumulator, so one validator can be shared across loader
//! threads.

use std::path::Path;

use serde_json::Value;

use crate::domain::validate_domain;
use crate::error::SchemaError;
use crate::meta::MetaSchema;
use crate::normalize::normalize_descriptor;
use crate::report::{ValidationError, ValidationResult};
use crate::structural::validate_structure;

/// Combined structural and domain validator for module descriptors.
#[derive(Debug, Clone)]
pub struct ModuleSchemaValidator {
    meta: MetaSchema,
}

impl ModuleSchemaValidator {
    /// Build a validator around an already-parsed meta-schema.
    pub fn new(meta: MetaSchema) -> Self {
        Self { meta }
    }

    /// Validator using the bundled `schemas/schema-format.json`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MetaSchemaParse`] if the bundled file is not a
    /// well-formed schema tree.
    pub fn bundled() -> Result<Self, SchemaError> {
        MetaSchema::bundled().map(Self::new)
    }

    /// Validator using a meta-schema file on disk.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        MetaSchema::from_path(path).map(Self::new)
    }

    /// The meta-schema in use.
    pub fn meta(&self) -> &MetaSchema {
        &self.meta
    }

    /// Validate one descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DepthExceeded`] when the descriptor nests too
    /// deeply for either layer to walk.
    pub fn validate(&self, descriptor: &Value) -> Result<ValidationReport, SchemaError> {
        let mut errors = validate_structure(descriptor, &self.meta)?;
        let structural_count = errors.len();
        errors.extend(validate_domain(descriptor)?);

        tracing::debug!(
            structural = structural_count,
            domain = errors.len() - structural_count,
            "descriptor validated"
        );

        let result = ValidationResult::from_errors(errors);
        let normalized = result.is_valid().then(|| normalize_descriptor(descriptor));
        Ok(ValidationReport { result, normalized })
    }
}

/// Result of [`ModuleSchemaValidator::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Valid, or invalid with every violation found.
    pub result: ValidationResult,
    /// Normalized descriptor; `Some` only when `result` is valid.
    pub normalized: Option<Value>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    pub fn errors(&self) -> &[ValidationError] {
        self.result.errors()
    }
}
