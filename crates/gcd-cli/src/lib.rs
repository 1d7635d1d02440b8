//! # gcd-cli — Command-Line Tool for GCD Modules
//!
//! Provides the `gcd` binary and the client used by other processes to
//! read its module listing.
//!
//! ## Subcommands
//!
//! - `gcd modules`: load every module and print the records as one JSON array.
//! - `gcd defaults <MODULE>`: print `{config, warnings}` for a valid module.
//! - `gcd validate [PATH]`: human-readable pass/fail report.
//!
//! ```bash
//! gcd modules --root ./modules > modules.json
//! gcd -v validate
//! gcd defaults mockmod
//! ```
//!
//! stdout carries only command output; logs go to stderr.

pub mod defaults;
pub mod listing;
pub mod modules;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use gcd_loader::LoaderConfig;

/// Modules root override shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct RootArgs {
    /// Modules root directory (overrides config file and GCD_MODULES_ROOT).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Resolve the loader configuration: defaults, then the YAML file, then
/// `GCD_*` environment variables, then command-line flags.
pub fn load_config(config_file: Option<&Path>, root: &RootArgs) -> Result<LoaderConfig> {
    let mut config = LoaderConfig::default();
    if let Some(path) = config_file {
        config = config
            .with_yaml_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?;
    }
    config = config.with_env().context("invalid GCD_* environment")?;
    if let Some(root) = &root.root {
        config.modules_root = root.clone();
    }

    tracing::debug!(
        modules_root = %config.modules_root.display(),
        schema_file = %config.schema_file_name,
        "loader configuration resolved"
    );
    Ok(config)
}
