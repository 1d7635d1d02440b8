//! # Validate Subcommand
//!
//! Human-readable validation report for every module under the modules
//! root, one module directory, or one descriptor file.
//!
//! Modules without a descriptor are listed but do not fail the run.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use gcd_loader::{LoadedModule, LoaderConfig, ModuleLoader, ModuleStatus};

use crate::RootArgs;

/// Arguments for the `gcd validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Validate a single module directory or descriptor file instead.
    #[arg(value_name = "PATH")]
    pub path: Option<std::path::PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when everything validated, 1 on any failure.
pub fn run_validate(args: &ValidateArgs, config: &LoaderConfig) -> Result<u8> {
    let loader = ModuleLoader::from_config(config).context("failed to build module loader")?;

    let had_failures = match &args.path {
        Some(path) if path.is_file() => validate_descriptor_file(config, path)?,
        Some(path) => report(&[loader.load_single_module(path)]),
        None => {
            let modules = loader
                .load_all_modules(&config.modules_root)
                .with_context(|| {
                    format!("failed to load modules from {}", config.modules_root.display())
                })?;
            report(&modules)
        }
    };

    Ok(u8::from(had_failures))
}

/// Print the report; true if any module is invalid.
fn report(modules: &[LoadedModule]) -> bool {
    let passed = modules.iter().filter(|m| m.is_valid()).count();
    let missing = modules
        .iter()
        .filter(|m| m.status == ModuleStatus::MissingSchema)
        .count();
    let failed = modules.len() - passed - missing;

    println!("Modules: {passed}/{} passed", modules.len());

    for module in modules {
        match module.status {
            ModuleStatus::Valid => {}
            ModuleStatus::MissingSchema => {
                println!("  SKIP: {} ({})", module.id, module.warnings.join("; "));
            }
            ModuleStatus::Invalid => {
                println!("  FAIL: {}", module.id);
                for error in &module.validation_errors {
                    println!("    {error}");
                }
            }
        }
    }

    if failed > 0 {
        println!("\n{failed} module(s) failed validation out of {} total.", modules.len());
    }

    failed > 0
}

/// Validate one descriptor file outside the module layout.
fn validate_descriptor_file(config: &LoaderConfig, path: &Path) -> Result<bool> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let descriptor: Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let validator = config.validator().context("failed to load meta-schema")?;
    let outcome = gcd_loader::run_schema_validation(&validator, &descriptor);

    if outcome.is_valid {
        println!("OK: {}", path.display());
    } else {
        println!("FAIL: {}", path.display());
        for error in &outcome.errors {
            println!("  {error}");
        }
    }
    Ok(!outcome.is_valid)
}
