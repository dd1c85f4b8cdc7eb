//! # Document Loading
//!
//! Reads sidebars configurations and category metadata files from disk
//! into `serde_json::Value`, then hands them to the validator. YAML is
//! converted to the equivalent JSON value tree with mapping order kept.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use sidebars_core::{CategoryMetadata, SidebarValidationError, SidebarsConfig};

use crate::validate::SidebarValidator;

/// File names recognized as per-directory category metadata files.
pub const CATEGORY_METADATA_FILENAMES: [&str; 3] =
    ["_category_.json", "_category_.yml", "_category_.yaml"];

/// Error loading a document from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or YAML.
    #[error("cannot parse '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// The document parsed but does not have the expected shape.
    #[error("invalid '{path}': {source}")]
    Invalid {
        path: String,
        #[source]
        source: SidebarValidationError,
    },
}

/// Input syntax of a document, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Whether `path` names a category metadata file.
pub fn is_category_metadata_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| CATEGORY_METADATA_FILENAMES.contains(&name))
}

/// Parse document text in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
            yaml_to_json_value(yaml).map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
        }
    }
}

/// Read and parse a JSON or YAML document.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&content, DocumentFormat::from_path(path)).map_err(|reason| LoadError::Parse {
        path: path.display().to_string(),
        reason,
    })
}

/// Load and validate a whole-site sidebars file.
pub fn load_sidebars(path: &Path) -> Result<SidebarsConfig, LoadError> {
    let document = load_document(path)?;
    tracing::debug!(path = %path.display(), "validating sidebars file");
    SidebarValidator::shared()
        .and_then(|validator| validator.parse_sidebars(&document))
        .map_err(|source| LoadError::Invalid {
            path: path.display().to_string(),
            source,
        })
}

/// Load and validate one category metadata file.
pub fn load_category_metadata(path: &Path) -> Result<CategoryMetadata, LoadError> {
    let document = load_document(path)?;
    tracing::debug!(path = %path.display(), "validating category metadata file");
    SidebarValidator::shared()
        .and_then(|validator| validator.validate_category_metadata_file(&document))
        .map_err(|source| LoadError::Invalid {
            path: path.display().to_string(),
            source,
        })
}

/// Convert a parsed YAML document into the JSON value tree the validator
/// walks. Tags are dropped and mapping order is kept.
fn yaml_to_json_value(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => Value::Number(yaml_number(&n)?),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_json_value)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                object.insert(mapping_key(key)?, yaml_to_json_value(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json_value(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<serde_json::Number, String> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| format!("number {n} has no JSON representation"))
}

/// Mapping keys are sidebar names, shorthand category labels or field
/// names. Scalar keys become strings, so a category labelled `2024` keeps
/// its label; `~` and nested keys cannot name anything.
fn mapping_key(key: serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Tagged(tagged) => mapping_key(tagged.value),
        Yaml::Null => Err("mapping key must be a name, got null".to_string()),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            Err("mapping key must be a name, got a collection".to_string())
        }
    }
}
