//! # sidebars CLI entry point
//!
//! Parses command-line arguments, configures logging and dispatches to
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sidebars_cli::categories::{run_categories, CategoriesArgs};
use sidebars_cli::check::{run_check, CheckArgs};
use sidebars_cli::report::EXIT_OPERATIONAL;
use sidebars_cli::OutputFormat;

/// Validate documentation sidebars files and category metadata files.
#[derive(Parser, Debug)]
#[command(name = "sidebars", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a whole-site sidebars file.
    Check(CheckArgs),

    /// Validate every _category_ metadata file under a docs directory.
    Categories(CategoriesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sidebars CLI starting");

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, cli.format),
        Commands::Categories(args) => run_categories(&args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}
