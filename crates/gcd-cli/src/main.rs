//! # gcd CLI entry point
//!
//! Parses command-line arguments, initializes logging on stderr, resolves
//! the loader configuration, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gcd_cli::defaults::{run_defaults, DefaultsArgs};
use gcd_cli::load_config;
use gcd_cli::modules::{run_modules, ModulesArgs};
use gcd_cli::validate::{run_validate, ValidateArgs};

/// GCD module tool
///
/// Discovers module directories, validates their schema.json descriptors,
/// and generates default configurations.
#[derive(Parser, Debug)]
#[command(name = "gcd", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load every module and print the records as a JSON array.
    Modules(ModulesArgs),

    /// Print the default configuration of one module.
    Defaults(DefaultsArgs),

    /// Validate module descriptors and print a report.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("gcd CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let root_args = match &cli.command {
        Commands::Modules(args) => &args.root,
        Commands::Defaults(args) => &args.root,
        Commands::Validate(args) => &args.root,
    };

    let result = load_config(cli.config.as_deref(), root_args).and_then(|config| match &cli.command {
        Commands::Modules(args) => run_modules(args, &config),
        Commands::Defaults(args) => run_defaults(args, &config),
        Commands::Validate(args) => run_validate(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
