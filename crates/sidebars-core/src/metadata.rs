//! # Category Metadata Files
//!
//! Per-directory `_category_.json` / `_category_.yml` side files carrying
//! category presentation metadata. Flat: they never nest items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::link::CategoryLink;

/// Validated content of one category metadata file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Ordering hint among sibling categories and documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// `null` in the file deserializes to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Map<String, Value>>,
}
