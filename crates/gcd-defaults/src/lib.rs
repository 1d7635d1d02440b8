//! # gcd-defaults — Default Configuration Synthesis
//!
//! Turns a validated module schema into a fully populated default
//! configuration tree. Generation is **total**: it never returns an error
//! and never panics. Anything that cannot be generated becomes a
//! path-tagged [`DefaultConfigWarning`] plus a safe fallback value, so the
//! returned `config` is always complete and usable.
//!
//! ## Input Shape
//!
//! The generator walks the ordered-list field form produced by
//! `gcd_schema::normalize_descriptor`:
//!
//! ```json
//! { "fields": [ { "id": "port", "type": "number", "default": 8080 } ] }
//! ```
//!
//! ## Extensibility
//!
//! [`DefaultHooks`] exposes four defaulting hooks (placeholder inference,
//! UI-aware defaults, conditional defaults, array templates). Every hook is
//! a no-op unless a caller overrides it; see [`NoopHooks`].
//!
//! ## Crate Policy
//!
//! - Depends only on `gcd-core` internally.
//! - No state survives a call: each invocation allocates its own warning
//!   list and binds its own hook set.

pub mod field;
pub mod generate;
pub mod hooks;

pub use field::{field_id, SchemaField};
pub use generate::{
    generate_default_config, DefaultConfigResult, DefaultConfigWarning, GenerateOptions,
    MAX_DEPTH,
};
pub use hooks::{
    ArrayTemplateArgs, ConditionalDefaultArgs, DefaultHooks, HookError, NoopHooks,
    PlaceholderArgs, UiAwareDefaultArgs,
};
