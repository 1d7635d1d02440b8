//! # gcd-loader — Module Discovery and Loading
//!
//! Scans a modules root for module directories, reads each directory's
//! descriptor, validates it through `gcd-schema`, and classifies the module
//! as `valid`, `invalid`, or `missing-schema`.
//!
//! ## Failure Model
//!
//! - A missing or unreadable modules root is the only fatal condition
//!   ([`LoaderError`]); callers treat it as a startup configuration error.
//! - Every per-module problem (missing directory, unreadable file,
//!   malformed JSON, validation failure) is captured in the module's own
//!   [`LoadedModule`] record. One bad module never affects another.
//!
//! ## Crate Policy
//!
//! - Filesystem access is read-only.
//! - Records are built once and never mutated afterwards.

pub mod bridge;
pub mod config;
pub mod error;
pub mod fs;
pub mod loader;

pub use bridge::{run_schema_validation, BridgeOutcome};
pub use config::{ConfigError, LoaderConfig};
pub use error::LoaderError;
pub use fs::{list_module_directories, read_schema_file, schema_file_exists, SchemaFileRead};
pub use loader::{LoadedModule, ModuleLoader, ModuleStatus};
