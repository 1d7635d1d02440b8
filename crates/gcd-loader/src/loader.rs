//! # Module Loader
//!
//! Classifies one module directory at a time:
//!
//! ```text
//! directory exists? ── no ──► invalid ("Module directory does not exist")
//!        │ yes
//! descriptor exists? ─ no ──► missing-schema (one warning, no errors)
//!        │ yes
//! read + parse JSON ── err ─► invalid (raw text kept, one error)
//!        │ ok
//! validate ──────────────────► valid | invalid
//! ```
//!
//! Each step produces a complete [`LoadedModule`]; nothing partial escapes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use gcd_core::FieldPath;
use gcd_schema::{ModuleSchemaValidator, ValidationError};

use crate::bridge::run_schema_validation;
use crate::config::LoaderConfig;
use crate::error::LoaderError;
use crate::fs::{absolutize, list_module_directories, read_schema_file, schema_file_exists};

/// Readiness of a module's descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStatus {
    /// Descriptor present and passed validation.
    Valid,
    /// Descriptor unreadable, malformed, or failed validation.
    Invalid,
    /// No descriptor file. Informational, not an error.
    MissingSchema,
}

impl ModuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::MissingSchema => "missing-schema",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything known about one module directory after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedModule {
    /// Directory name.
    pub id: String,
    /// Absolute directory path.
    pub path: PathBuf,
    pub status: ModuleStatus,
    /// The descriptor's `version` string, when it has one.
    pub version: Option<String>,
    /// Parsed descriptor, or the raw text when it was not valid JSON.
    pub raw_schema: Option<Value>,
    /// Normalized descriptor; `Some` only when `status` is `Valid`.
    pub validated_schema: Option<Value>,
    pub validation_errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl LoadedModule {
    fn new(id: String, path: PathBuf, status: ModuleStatus) -> Self {
        Self {
            id,
            path,
            status,
            version: None,
            raw_schema: None,
            validated_schema: None,
            validation_errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ModuleStatus::Valid
    }
}

/// Loads module directories with one shared validator.
#[derive(Debug, Clone)]
pub struct ModuleLoader {
    validator: ModuleSchemaValidator,
    schema_file_name: String,
}

impl ModuleLoader {
    pub fn new(validator: ModuleSchemaValidator, schema_file_name: impl Into<String>) -> Self {
        Self {
            validator,
            schema_file_name: schema_file_name.into(),
        }
    }

    /// Loader with the bundled meta-schema and `schema.json` descriptors.
    pub fn bundled() -> Result<Self, LoaderError> {
        Ok(Self::new(ModuleSchemaValidator::bundled()?, "schema.json"))
    }

    /// Loader described by `config`.
    pub fn from_config(config: &LoaderConfig) -> Result<Self, LoaderError> {
        Ok(Self::new(config.validator()?, config.schema_file_name.clone()))
    }

    /// Descriptor file name looked up in each module directory.
    pub fn schema_file_name(&self) -> &str {
        &self.schema_file_name
    }

    /// Load exactly one module directory. Never fails.
    pub fn load_single_module(&self, dir: &Path) -> LoadedModule {
        let path = absolutize(dir);
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let module = self.classify(id, path);
        match module.status {
            ModuleStatus::Valid => {
                tracing::debug!(module = %module.id, "module loaded");
            }
            ModuleStatus::MissingSchema => {
                tracing::info!(module = %module.id, "module has no descriptor");
            }
            ModuleStatus::Invalid => {
                tracing::warn!(
                    module = %module.id,
                    errors = module.validation_errors.len(),
                    "module is invalid"
                );
            }
        }
        module
    }

    fn classify(&self, id: String, path: PathBuf) -> LoadedModule {
        if !path.is_dir() {
            let mut module = LoadedModule::new(id, path, ModuleStatus::Invalid);
            module.validation_errors.push(root_error(format!(
                "Module directory does not exist: {}",
                module.path.display()
            )));
            return module;
        }

        if !schema_file_exists(&path, &self.schema_file_name) {
            let mut module = LoadedModule::new(id, path, ModuleStatus::MissingSchema);
            module
                .warnings
                .push(format!("{} not found in module: {}", self.schema_file_name, module.id));
            return module;
        }

        let read = read_schema_file(&path, &self.schema_file_name);
        let raw = match (read.raw_json, read.error) {
            (Some(raw), None) => raw,
            (_, error) => {
                let mut module = LoadedModule::new(id, path, ModuleStatus::Invalid);
                module.raw_schema = read.raw_text.map(Value::String);
                module.validation_errors.push(root_error(
                    error.unwrap_or_else(|| format!("Failed to read {}", self.schema_file_name)),
                ));
                return module;
            }
        };

        let outcome = run_schema_validation(&self.validator, &raw);
        let status = if outcome.is_valid {
            ModuleStatus::Valid
        } else {
            ModuleStatus::Invalid
        };

        let mut module = LoadedModule::new(id, path, status);
        module.version = raw.get("version").and_then(Value::as_str).map(str::to_string);
        module.raw_schema = Some(raw);
        module.validated_schema = outcome.validated_schema;
        module.validation_errors = outcome.errors;
        module
    }

    /// Load every module under `root`, in directory-name order.
    ///
    /// # Errors
    ///
    /// Only when `root` is missing or unreadable.
    pub fn load_all_modules(&self, root: &Path) -> Result<Vec<LoadedModule>, LoaderError> {
        let dirs = list_module_directories(root)?;
        let modules: Vec<LoadedModule> =
            dirs.iter().map(|dir| self.load_single_module(dir)).collect();
        log_summary(root, &modules);
        Ok(modules)
    }

    /// Like [`load_all_modules`](Self::load_all_modules), spreading modules
    /// across up to `threads` scoped threads. Output order is identical.
    pub fn load_all_parallel(
        &self,
        root: &Path,
        threads: usize,
    ) -> Result<Vec<LoadedModule>, LoaderError> {
        let dirs = list_module_directories(root)?;
        if dirs.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = dirs.len().div_ceil(threads.max(1));
        let modules: Vec<LoadedModule> = std::thread::scope(|scope| {
            let handles: Vec<_> = dirs
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|dir| self.load_single_module(dir))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        log_summary(root, &modules);
        Ok(modules)
    }
}

fn root_error(message: String) -> ValidationError {
    ValidationError::new(FieldPath::root(), message)
}

fn log_summary(root: &Path, modules: &[LoadedModule]) {
    let count = |status: ModuleStatus| modules.iter().filter(|m| m.status == status).count();
    tracing::info!(
        root = %root.display(),
        total = modules.len(),
        valid = count(ModuleStatus::Valid),
        invalid = count(ModuleStatus::Invalid),
        missing_schema = count(ModuleStatus::MissingSchema),
        "modules loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn loader() -> ModuleLoader {
        ModuleLoader::bundled().unwrap()
    }

    fn write_module(root: &Path, name: &str, schema: Option<&str>) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        if let Some(text) = schema {
            std::fs::write(dir.join("schema.json"), text).unwrap();
        }
        dir
    }

    const VALID: &str = r#"{"id": "m", "version": "2.1.0", "fields": {"name": {"type": "string"}}}"#;

    #[test]
    fn valid_module() {
        let root = TempDir::new().unwrap();
        let dir = write_module(root.path(), "alpha", Some(VALID));

        let module = loader().load_single_module(&dir);
        assert_eq!(module.status, ModuleStatus::Valid);
        assert_eq!(module.id, "alpha");
        assert_eq!(module.version.as_deref(), Some("2.1.0"));
        assert!(module.validation_errors.is_empty());
        assert_eq!(
            module.validated_schema.unwrap()["fields"],
            json!([{"id": "name", "type": "string"}])
        );
    }

    #[test]
    fn missing_directory_is_invalid() {
        let root = TempDir::new().unwrap();
        let module = loader().load_single_module(&root.path().join("ghost"));
        assert_eq!(module.status, ModuleStatus::Invalid);
        assert_eq!(module.validation_errors.len(), 1);
        assert!(module.validation_errors[0]
            .message
            .starts_with("Module directory does not exist: "));
    }

    #[test]
    fn missing_descriptor_is_soft() {
        let root = TempDir::new().unwrap();
        let dir = write_module(root.path(), "docs", None);
        let module = loader().load_single_module(&dir);
        assert_eq!(module.status, ModuleStatus::MissingSchema);
        assert!(module.validation_errors.is_empty());
        assert_eq!(module.warnings, vec!["schema.json not found in module: docs"]);
        assert!(module.raw_schema.is_none());
        assert!(module.validated_schema.is_none());
    }

    #[test]
    fn malformed_json_keeps_raw_text() {
        let root = TempDir::new().unwrap();
        let dir = write_module(root.path(), "broken", Some("{ \"id\": "));
        let module = loader().load_single_module(&dir);
        assert_eq!(module.status, ModuleStatus::Invalid);
        assert_eq!(module.raw_schema, Some(json!("{ \"id\": ")));
        assert_eq!(module.validation_errors.len(), 1);
        assert!(module.validation_errors[0]
            .message
            .starts_with("Invalid JSON in schema.json: "));
        assert!(module.validated_schema.is_none());
    }

    #[test]
    fn invalid_descriptor_keeps_raw_and_errors() {
        let root = TempDir::new().unwrap();
        let dir = write_module(root.path(), "bad", Some(r#"{"id": "bad", "fields": {}}"#));
        let module = loader().load_single_module(&dir);
        assert_eq!(module.status, ModuleStatus::Invalid);
        assert_eq!(module.raw_schema, Some(json!({"id": "bad", "fields": {}})));
        assert_eq!(module.validation_errors[0].to_string(), "version: missing required key \"version\"");
        assert!(module.version.is_none());
    }

    #[test]
    fn custom_descriptor_name() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("alpha");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("module.json"), VALID).unwrap();

        let custom = ModuleLoader::new(ModuleSchemaValidator::bundled().unwrap(), "module.json");
        assert_eq!(custom.load_single_module(&dir).status, ModuleStatus::Valid);
        assert_eq!(loader().load_single_module(&dir).status, ModuleStatus::MissingSchema);
    }

    #[test]
    fn load_all_preserves_directory_order() {
        let root = TempDir::new().unwrap();
        write_module(root.path(), "charlie", Some(VALID));
        write_module(root.path(), "alpha", None);
        write_module(root.path(), "bravo", Some("nope"));

        let modules = loader().load_all_modules(root.path()).unwrap();
        let summary: Vec<(&str, ModuleStatus)> =
            modules.iter().map(|m| (m.id.as_str(), m.status)).collect();
        assert_eq!(
            summary,
            vec![
                ("alpha", ModuleStatus::MissingSchema),
                ("bravo", ModuleStatus::Invalid),
                ("charlie", ModuleStatus::Valid),
            ]
        );
    }

    #[test]
    fn load_all_missing_root_is_fatal() {
        let root = TempDir::new().unwrap();
        let err = loader().load_all_modules(&root.path().join("absent")).unwrap_err();
        assert!(matches!(err, LoaderError::RootNotFound { .. }));
    }

    #[test]
    fn parallel_matches_sequential() {
        let root = TempDir::new().unwrap();
        for i in 0..9 {
            let schema = if i % 3 == 0 { None } else { Some(VALID) };
            write_module(root.path(), &format!("mod{i}"), schema);
        }

        let l = loader();
        let sequential = l.load_all_modules(root.path()).unwrap();
        for threads in [0, 1, 2, 4, 16] {
            assert_eq!(l.load_all_parallel(root.path(), threads).unwrap(), sequential);
        }
    }

    #[test]
    fn serializes_camel_case_with_kebab_status() {
        let root = TempDir::new().unwrap();
        let dir = write_module(root.path(), "docs", None);
        let value = serde_json::to_value(loader().load_single_module(&dir)).unwrap();
        assert_eq!(value["status"], "missing-schema");
        assert!(value.get("rawSchema").is_some());
        assert!(value.get("validatedSchema").is_some());
        assert!(value["validationErrors"].as_array().unwrap().is_empty());
        assert_eq!(value["version"], Value::Null);
    }
}
