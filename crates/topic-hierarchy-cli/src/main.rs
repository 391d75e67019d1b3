//! Topic Hierarchy CLI
//!
//! Command-line driver for two-tier topic model reconciliation.
//!
//! # Commands
//!
//! - `run`: load a project spec and both trained tiers, then run the full
//!   reconciliation pipeline (similarity, assignment, merge, export)
//! - `validate`: load and validate a project spec without running anything
//!
//! Exit code 0 on success, 1 on any error; diagnostics go to stderr,
//! command output to stdout.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Topic Hierarchy CLI - two-tier topic model reconciliation
#[derive(Parser)]
#[command(name = "topic-hierarchy")]
#[command(version = "0.1.0")]
#[command(about = "Reconcile a fine-grained topic model against a coarse one")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reconciliation pipeline from a project spec
    Run(commands::run::RunArgs),
    /// Validate a project spec without running the pipeline
    Validate(commands::validate::ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Run(args) => commands::run::run_command(args),
        Commands::Validate(args) => commands::validate::validate_command(args),
    };

    std::process::exit(exit_code);
}
