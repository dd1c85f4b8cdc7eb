//! # Check Subcommand
//!
//! Validates one whole-site sidebars file and reports the sidebar and
//! item counts on success.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sidebars_schema::load_sidebars;

use crate::report::{FileReport, OutputFormat, RunReport};

/// Arguments for the `sidebars check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Sidebars file to validate (.json, .yaml or .yml).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 when the
/// file cannot be read or parsed.
pub fn run_check(args: &CheckArgs, format: OutputFormat) -> Result<u8> {
    let report = check_file(args);
    report
        .emit(format)
        .context("failed to write report to stdout")?;
    Ok(report.exit_code())
}

fn check_file(args: &CheckArgs) -> RunReport {
    let file = match load_sidebars(&args.path) {
        Ok(config) => {
            tracing::info!(
                path = %args.path.display(),
                sidebars = config.len(),
                items = config.item_count(),
                "sidebars file is valid"
            );
            FileReport::passed(&args.path).with_counts(config.len(), config.item_count())
        }
        Err(e) => {
            tracing::debug!(path = %args.path.display(), error = %e, "sidebars check failed");
            FileReport::failed(&args.path, &e)
        }
    };
    RunReport::new(vec![file])
}
