//! # gcd-schema — Module Descriptor Validation
//!
//! Validates raw module descriptors (`schema.json`) in two complementary
//! layers and produces the canonical schema consumed by the default-config
//! generator.
//!
//! ## Structural Validation (`structural`)
//!
//! A tree-recursive validator for the JSON-Schema subset used by the
//! bundled meta-schema (`schemas/schema-format.json`): `type`, `enum`,
//! `properties`/`required`/`additionalProperties`, `items` with
//! `minItems`/`maxItems`, string `pattern`/`minLength`/`maxLength`, and
//! numeric bounds. The meta-schema is deserialized into a typed
//! [`MetaSchema`] tree once.
//!
//! ## Domain Rules (`domain`)
//!
//! The strict grammar of the module dialect: string `id`/`version`, a
//! `fields` map, the six closed field kinds, default/type agreement,
//! `validation` rules, primitive-only `ui` hints, enum options, and nested
//! object/array definitions.
//!
//! ## Normalization (`normalize`)
//!
//! Valid descriptors are rewritten into the ordered-list field form the
//! generator walks (`fields: [{ "id": ..., ... }]`).
//!
//! ## Crate Policy
//!
//! - Depends only on `gcd-core` internally.
//! - Validation never panics and never stops at the first problem; every
//!   violation is collected as a path-tagged [`ValidationError`].
//! - The only `Err` a validator returns is a [`SchemaError`], meaning the
//!   validator itself could not run (bad meta-schema, nesting too deep).

pub mod domain;
pub mod error;
pub mod meta;
pub mod normalize;
pub mod report;
pub mod structural;
pub mod validate;

pub use domain::validate_domain;
pub use error::SchemaError;
pub use meta::{AdditionalProperties, MetaSchema, TypeSpec, BUNDLED_META_SCHEMA};
pub use normalize::normalize_descriptor;
pub use report::{ValidationError, ValidationResult};
pub use structural::validate_structure;
pub use validate::{ModuleSchemaValidator, ValidationReport};

/// Maximum nesting depth either validator will descend before giving up.
pub const MAX_DEPTH: usize = 128;
