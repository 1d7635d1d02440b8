//! Errors raised when a validator cannot run at all.
//!
//! These are distinct from [`ValidationError`](crate::ValidationError),
//! which describes a problem *in the document*.

use thiserror::Error;

/// Failure of the validation machinery itself.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The meta-schema could not be read.
    #[error("meta-schema load error for '{source_name}': {reason}")]
    MetaSchemaLoad {
        /// File path or `bundled`.
        source_name: String,
        /// Reason the meta-schema could not be loaded.
        reason: String,
    },

    /// The meta-schema is not a well-formed schema tree.
    #[error("meta-schema parse error for '{source_name}': {reason}")]
    MetaSchemaParse {
        /// File path or `bundled`.
        source_name: String,
        /// Underlying deserialization error.
        reason: String,
    },

    /// The document nests deeper than [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("document nesting exceeds maximum depth {max} at '{path}'")]
    DepthExceeded {
        /// Depth limit that was hit.
        max: usize,
        /// Rendered path of the node where descent stopped.
        path: String,
    },
}
