//! # Defaults Subcommand
//!
//! Loads one module and prints its generated default configuration as
//! `{config, warnings}`. Only valid modules have a canonical schema to
//! generate from; anything else exits with code 1.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use gcd_defaults::{generate_default_config, GenerateOptions};
use gcd_loader::{LoaderConfig, ModuleLoader};

use crate::RootArgs;

/// Arguments for the `gcd defaults` subcommand.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Module directory name under the modules root.
    #[arg(value_name = "MODULE")]
    pub module: String,

    #[command(flatten)]
    pub root: RootArgs,
}

/// Execute the defaults subcommand.
///
/// Returns exit code: 0 when defaults were printed, 1 when the module is
/// not valid.
pub fn run_defaults(args: &DefaultsArgs, config: &LoaderConfig) -> Result<u8> {
    let is_plain_name = Path::new(&args.module).file_name().and_then(|n| n.to_str())
        == Some(args.module.as_str());
    if !is_plain_name {
        bail!("module name must be a directory name, got {:?}", args.module);
    }

    let loader = ModuleLoader::from_config(config)?;
    let module = loader.load_single_module(&config.modules_root.join(&args.module));

    let Some(schema) = module.validated_schema.as_ref() else {
        eprintln!("Module {} is {}; no defaults generated.", module.id, module.status);
        for error in &module.validation_errors {
            eprintln!("  {error}");
        }
        for warning in &module.warnings {
            eprintln!("  {warning}");
        }
        return Ok(1);
    };

    let result = generate_default_config(schema, &GenerateOptions::default());
    for warning in &result.warnings {
        tracing::warn!(module = %module.id, path = %warning.path, "{}", warning.message);
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(0)
}
