//! # Category Links
//!
//! The landing-page behavior of a category: either an existing document
//! or a synthesized index page. Shared by category items and category
//! metadata files.

use serde::{Deserialize, Serialize};

use crate::kind::CategoryLinkKind;

/// Landing page of a category, discriminated by its own `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    /// The category links to an existing document.
    Doc {
        /// Id of the landing page document.
        id: String,
    },
    /// The category gets a generated index page.
    GeneratedIndex(GeneratedIndex),
}

impl CategoryLink {
    /// The discriminator of this link.
    pub fn kind(&self) -> CategoryLinkKind {
        match self {
            Self::Doc { .. } => CategoryLinkKind::Doc,
            Self::GeneratedIndex(_) => CategoryLinkKind::GeneratedIndex,
        }
    }
}

/// Optional presentation fields of a generated index page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Keywords>,
}

/// `keywords` accepts a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    One(String),
    Many(Vec<String>),
}

impl Keywords {
    /// The keywords as a flat list.
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            Self::One(keyword) => vec![keyword.as_str()],
            Self::Many(keywords) => keywords.iter().map(String::as_str).collect(),
        }
    }
}
