//! # Filesystem Discovery
//!
//! Read-only helpers for locating module directories and reading their
//! descriptors. Only [`list_module_directories`] can fail; reading a
//! descriptor always returns a [`SchemaFileRead`] describing what happened.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::LoaderError;

/// Absolute paths of the immediate subdirectories of `root`, sorted by name.
///
/// Regular files directly under `root` are ignored.
///
/// # Errors
///
/// [`LoaderError::RootNotFound`] if `root` does not exist,
/// [`LoaderError::Io`] if it cannot be listed.
pub fn list_module_directories(root: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    if !root.exists() {
        return Err(LoaderError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let root = absolutize(root);
    let io_err = |source| LoaderError::Io {
        path: root.clone(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(&root).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    tracing::debug!(root = %root.display(), count = dirs.len(), "module directories listed");
    Ok(dirs)
}

/// True if `dir/file_name` exists and is a regular file.
pub fn schema_file_exists(dir: &Path, file_name: &str) -> bool {
    dir.join(file_name).is_file()
}

/// What reading one descriptor produced.
///
/// Exactly one of `raw_json` and `error` is set. `raw_text` is kept even
/// when the text is not valid JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaFileRead {
    pub raw_text: Option<String>,
    pub raw_json: Option<Value>,
    pub error: Option<String>,
}

/// Read and parse `dir/file_name`. Never fails.
pub fn read_schema_file(dir: &Path, file_name: &str) -> SchemaFileRead {
    let path = dir.join(file_name);

    if !path.is_file() {
        return SchemaFileRead {
            error: Some(format!("{file_name} not found at path: {}", path.display())),
            ..SchemaFileRead::default()
        };
    }

    let raw_text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            return SchemaFileRead {
                error: Some(format!("Failed to read {file_name}: {e}")),
                ..SchemaFileRead::default()
            }
        }
    };

    match serde_json::from_str(&raw_text) {
        Ok(json) => SchemaFileRead {
            raw_text: Some(raw_text),
            raw_json: Some(json),
            error: None,
        },
        Err(e) => SchemaFileRead {
            raw_text: Some(raw_text),
            raw_json: None,
            error: Some(format!("Invalid JSON in {file_name}: {e}")),
        },
    }
}

/// `path` made absolute against the current directory, without resolving
/// symlinks. Falls back to `path` unchanged if the current directory is
/// unavailable.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
