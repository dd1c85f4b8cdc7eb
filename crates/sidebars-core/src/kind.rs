//! # Discriminator Tags
//!
//! The `type` tag of a sidebar item and of a category link. These enums
//! are the single place the tag strings are spelled; dispatch in the
//! validator is an exhaustive `match` over them.

use std::fmt;

/// Recognized values of a sidebar item's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// `doc`: reference to a document by id.
    Doc,
    /// `ref`: reference to a document by id, without making it the
    /// active sidebar for that document.
    Ref,
    /// `link`: arbitrary hyperlink.
    Link,
    /// `autogenerated`: expanded at build time from a docs directory.
    Autogenerated,
    /// `category`: labelled group of child items.
    Category,
}

impl ItemKind {
    /// All recognized item kinds, in declaration order.
    pub const ALL: [ItemKind; 5] = [
        Self::Doc,
        Self::Ref,
        Self::Link,
        Self::Autogenerated,
        Self::Category,
    ];

    /// Resolve a `type` tag. Returns `None` for anything unrecognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "doc" => Some(Self::Doc),
            "ref" => Some(Self::Ref),
            "link" => Some(Self::Link),
            "autogenerated" => Some(Self::Autogenerated),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    /// The tag as it appears in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Ref => "ref",
            Self::Link => "link",
            Self::Autogenerated => "autogenerated",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized values of a category link's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryLinkKind {
    /// `doc`: the category's landing page is an existing document.
    Doc,
    /// `generated-index`: a landing page listing the category's items.
    GeneratedIndex,
}

impl CategoryLinkKind {
    /// All recognized link kinds.
    pub const ALL: [CategoryLinkKind; 2] = [Self::Doc, Self::GeneratedIndex];

    /// Resolve a category link `type` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "doc" => Some(Self::Doc),
            "generated-index" => Some(Self::GeneratedIndex),
            _ => None,
        }
    }

    /// The tag as it appears in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::GeneratedIndex => "generated-index",
        }
    }
}

impl fmt::Display for CategoryLinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
