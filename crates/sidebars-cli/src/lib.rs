//! # sidebars-cli: Sidebars Validation CLI
//!
//! Provides the `sidebars` command-line interface over `sidebars-schema`.
//!
//! ## Subcommands
//!
//! - `sidebars check`: Validate one whole-site sidebars file.
//! - `sidebars categories`: Validate every `_category_` metadata file
//!   under a docs directory.
//!
//! Both accept `--format text|json` and `-v` (repeatable).
//!
//! ```bash
//! sidebars check sidebars.yaml
//! sidebars categories docs/ --print --format json
//! ```
//!
//! Exit codes: 0 success, 1 validation failure, 2 operational error
//! (unreadable file, unparseable document, missing directory).

pub mod categories;
pub mod check;
pub mod report;

pub use report::{FileReport, OutputFormat, RunReport};
