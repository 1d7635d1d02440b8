//! Loader configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults (`modules`, `schema.json`, bundled meta-schema);
//! 2. an optional YAML file;
//! 3. environment variables:
//!    - `GCD_MODULES_ROOT`: modules root directory
//!    - `GCD_SCHEMA_FILE`: descriptor file name inside each module
//!    - `GCD_META_SCHEMA`: path to a replacement meta-schema
//! 4. explicit overrides from the caller (CLI flags).
//!
//! Example YAML:
//!
//! ```yaml
//! modules_root: /srv/gcd/modules
//! schema_file: schema.json
//! meta_schema: /srv/gcd/schema-format.json
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use gcd_schema::{ModuleSchemaValidator, SchemaError};

/// Where modules live and how their descriptors are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory whose immediate subdirectories are modules.
    pub modules_root: PathBuf,
    /// Descriptor file name inside each module directory.
    pub schema_file_name: String,
    /// Meta-schema file; the bundled one when `None`.
    pub meta_schema_path: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            modules_root: PathBuf::from("modules"),
            schema_file_name: "schema.json".to_string(),
            meta_schema_path: None,
        }
    }
}

/// Keys accepted in the YAML config file. All optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    modules_root: Option<PathBuf>,
    schema_file: Option<String>,
    meta_schema: Option<PathBuf>,
}

impl LoaderConfig {
    /// Defaults overlaid with the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Overlay `GCD_*` environment variables onto `self`.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_lookup(|var| std::env::var(var).ok())
    }

    /// Overlay the YAML file at `path` onto `self`.
    pub fn with_yaml_file(self, path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.with_yaml_str(&text, path)
    }

    /// Overlay YAML `text` onto `self`; `origin` names the source in errors.
    pub fn with_yaml_str(mut self, text: &str, origin: &Path) -> Result<Self, ConfigError> {
        // An empty document means "no overrides".
        let file: ConfigFile = if text.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        if let Some(root) = file.modules_root {
            self.modules_root = root;
        }
        if let Some(name) = file.schema_file {
            self.schema_file_name = checked_file_name("schema_file", name)?;
        }
        if let Some(meta) = file.meta_schema {
            self.meta_schema_path = Some(meta);
        }
        Ok(self)
    }

    fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(root) = lookup("GCD_MODULES_ROOT").filter(|v| !v.is_empty()) {
            self.modules_root = PathBuf::from(root);
        }
        if let Some(name) = lookup("GCD_SCHEMA_FILE") {
            self.schema_file_name = checked_file_name("GCD_SCHEMA_FILE", name)?;
        }
        if let Some(meta) = lookup("GCD_META_SCHEMA").filter(|v| !v.is_empty()) {
            self.meta_schema_path = Some(PathBuf::from(meta));
        }
        Ok(self)
    }

    /// Build the validator this configuration describes.
    pub fn validator(&self) -> Result<ModuleSchemaValidator, SchemaError> {
        match &self.meta_schema_path {
            Some(path) => ModuleSchemaValidator::from_path(path),
            None => ModuleSchemaValidator::bundled(),
        }
    }
}

fn checked_file_name(key: &str, name: String) -> Result<String, ConfigError> {
    let plain = !name.trim().is_empty()
        && Path::new(&name).file_name().and_then(|n| n.to_str()) == Some(name.as_str());
    if plain {
        Ok(name)
    } else {
        Err(ConfigError::Invalid {
            key: key.to_string(),
            reason: format!("{name:?} is not a plain file name"),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },
    #[error("invalid config file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}
