//! # Modules Subcommand
//!
//! Loads every module under the modules root and prints the records as a
//! single JSON array on stdout. This output is the process boundary read
//! by [`crate::listing::fetch_module_listing`].

use anyhow::{Context, Result};
use clap::Args;

use gcd_loader::{LoaderConfig, ModuleLoader};

use crate::RootArgs;

/// Arguments for the `gcd modules` subcommand.
#[derive(Args, Debug)]
pub struct ModulesArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Load modules on this many threads.
    #[arg(long, short = 'j', default_value_t = 1)]
    pub jobs: usize,

    /// Emit compact single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the modules subcommand. Returns exit code 0 on success.
pub fn run_modules(args: &ModulesArgs, config: &LoaderConfig) -> Result<u8> {
    let loader = ModuleLoader::from_config(config).context("failed to build module loader")?;

    let root = &config.modules_root;
    let modules = if args.jobs > 1 {
        loader.load_all_parallel(root, args.jobs)
    } else {
        loader.load_all_modules(root)
    }
    .with_context(|| format!("failed to load modules from {}", root.display()))?;

    let out = if args.compact {
        serde_json::to_string(&modules)?
    } else {
        serde_json::to_string_pretty(&modules)?
    };
    println!("{out}");
    Ok(0)
}
