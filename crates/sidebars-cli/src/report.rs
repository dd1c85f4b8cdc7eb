//! # Validation Reports
//!
//! Per-file outcomes and their text / JSON rendering. Subcommand handlers
//! build a [`RunReport`]; `main` only maps its exit code.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use sidebars_core::CategoryMetadata;
use sidebars_schema::LoadError;

/// Output syntax selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per file plus a summary.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Exit code for a run with no failures.
pub const EXIT_OK: u8 = 0;
/// Exit code when a document parsed but failed validation.
pub const EXIT_INVALID: u8 = 1;
/// Exit code when a document could not be read or parsed.
pub const EXIT_OPERATIONAL: u8 = 2;

/// Outcome of validating one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CategoryMetadata>,
    #[serde(skip)]
    exit_code: u8,
}

impl FileReport {
    pub fn passed(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            ok: true,
            code: None,
            location: None,
            error: None,
            sidebars: None,
            items: None,
            metadata: None,
            exit_code: EXIT_OK,
        }
    }

    pub fn failed(path: &Path, error: &LoadError) -> Self {
        // The file path is already on the report line, so keep only the cause.
        let (code, location, message, exit_code) = match error {
            LoadError::Invalid { source, .. } => (
                source.code(),
                source.path().map(ToString::to_string),
                source.to_string(),
                EXIT_INVALID,
            ),
            LoadError::Io { source, .. } => ("io", None, source.to_string(), EXIT_OPERATIONAL),
            LoadError::Parse { reason, .. } => ("parse", None, reason.clone(), EXIT_OPERATIONAL),
        };
        Self {
            ok: false,
            code: Some(code),
            location,
            error: Some(message),
            exit_code,
            ..Self::passed(path)
        }
    }

    /// Record sidebar and node counts of a valid sidebars file.
    pub fn with_counts(mut self, sidebars: usize, items: usize) -> Self {
        self.sidebars = Some(sidebars);
        self.items = Some(items);
        self
    }

    pub fn with_metadata(mut self, metadata: Option<CategoryMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        match (&self.error, self.sidebars, self.items) {
            (Some(error), _, _) => writeln!(out, "FAIL: {} — {error}", self.path)?,
            (None, Some(sidebars), Some(items)) => {
                writeln!(out, "OK: {} ({sidebars} sidebars, {items} items)", self.path)?
            }
            _ => writeln!(out, "OK: {}", self.path)?,
        }
        if let Some(metadata) = &self.metadata {
            let rendered = serde_json::to_string_pretty(metadata)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            for line in rendered.lines() {
                writeln!(out, "    {line}")?;
            }
        }
        Ok(())
    }
}

/// Outcome of one subcommand run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let passed = files.iter().filter(|f| f.ok).count();
        Self {
            total: files.len(),
            passed,
            failed: files.len() - passed,
            files,
        }
    }

    /// Worst exit code across files: operational errors outrank
    /// validation failures.
    pub fn exit_code(&self) -> u8 {
        self.files
            .iter()
            .map(FileReport::exit_code)
            .max()
            .unwrap_or(EXIT_OK)
    }

    pub fn write_to(&self, format: OutputFormat, out: &mut impl Write) -> std::io::Result<()> {
        match format {
            OutputFormat::Text => {
                for file in &self.files {
                    file.write_text(out)?;
                }
                if self.total != 1 {
                    writeln!(out, "{}/{} passed", self.passed, self.total)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                writeln!(out)
            }
        }
    }

    /// Write to stdout.
    pub fn emit(&self, format: OutputFormat) -> std::io::Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_to(format, &mut lock)
    }
}
