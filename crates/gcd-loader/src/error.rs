//! Fatal loader errors.

use std::path::PathBuf;

use thiserror::Error;

use gcd_schema::SchemaError;

/// A failure that stops a whole discovery pass.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The modules root does not exist.
    #[error("module root does not exist: {} (cannot scan for modules)", path.display())]
    RootNotFound {
        /// Root that was requested.
        path: PathBuf,
    },

    /// The modules root exists but could not be listed.
    #[error("cannot read module root {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The validator could not be built from the configured meta-schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
