//! # Categories Subcommand
//!
//! Finds every `_category_.json`, `_category_.yml` and `_category_.yaml`
//! under a docs directory and validates each one. With `--print`, the
//! normalized metadata of valid files is included in the output.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use sidebars_schema::{is_category_metadata_file, load_category_metadata};

use crate::report::{FileReport, OutputFormat, RunReport};

/// Arguments for the `sidebars categories` subcommand.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Docs directory to scan.
    #[arg(value_name = "DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Print the normalized metadata of each valid file.
    #[arg(long)]
    pub print: bool,
}

/// Execute the categories subcommand.
///
/// Returns exit code: 0 when every file is valid, 1 when any file fails
/// validation, 2 when any file cannot be read or parsed.
pub fn run_categories(args: &CategoriesArgs, format: OutputFormat) -> Result<u8> {
    let report = check_categories(args)?;
    report
        .emit(format)
        .context("failed to write report to stdout")?;
    Ok(report.exit_code())
}

fn check_categories(args: &CategoriesArgs) -> Result<RunReport> {
    if !args.docs_dir.is_dir() {
        bail!("docs directory not found: {}", args.docs_dir.display());
    }

    let files = find_category_files(&args.docs_dir);
    tracing::info!(
        docs_dir = %args.docs_dir.display(),
        count = files.len(),
        "found category metadata files"
    );

    let reports = files
        .iter()
        .map(|path| match load_category_metadata(path) {
            Ok(metadata) => FileReport::passed(path).with_metadata(args.print.then_some(metadata)),
            Err(e) => FileReport::failed(path, &e),
        })
        .collect();
    Ok(RunReport::new(reports))
}

/// Recursively collect category metadata files, sorted by path.
pub fn find_category_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    walk_category_files(dir, &mut results);
    results.sort();
    results
}

fn walk_category_files(dir: &Path, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during file walk"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read file type");
                continue;
            }
        };
        // Symlinked directories are not followed; they can loop back up the tree.
        if file_type.is_dir() {
            walk_category_files(&path, acc);
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping symlinked directory");
        } else if is_category_metadata_file(&path) {
            acc.push(path);
        }
    }
}
