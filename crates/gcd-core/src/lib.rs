//! # gcd-core — Foundational Types for the GCD Module Engine
//!
//! Every other crate in the workspace depends on `gcd-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One path model.** Validator errors and generator warnings both
//!    locate nodes with [`FieldPath`], an ordered list of key/index
//!    segments rendered in exactly one place. No ad-hoc string joining.
//!
//! 2. **Closed field taxonomy.** [`FieldKind`] enumerates the six field
//!    kinds of the module dialect plus an explicit `Unknown` catch-all, so
//!    every `match` is exhaustive and unrecognized type strings survive.
//!
//! 3. **JSON semantics in one module.** Type inference (including the
//!    `integer` pseudo-type) and deep equality live in [`json`], shared by
//!    the structural and domain validators.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gcd-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod json;
pub mod kind;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use json::{deep_equal, is_object, is_primitive, json_type_of, JsonType};
pub use kind::FieldKind;
pub use path::{FieldPath, PathSegment};
