//! # Item Paths
//!
//! JSON Pointer (RFC 6901) locations of nodes inside a sidebars document,
//! e.g. `/tutorialSidebar/2/items/0/link`. The validator extends the path
//! as it descends so every error can name the node it was raised on.

use std::fmt;

/// Location of a node inside the validated input, as a JSON Pointer.
///
/// The empty pointer is the document root and displays as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ItemPath(String);

impl ItemPath {
    /// The document root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Path of the member `key` of the object at this path.
    pub fn key(&self, key: &str) -> Self {
        let escaped = key.replace('~', "~0").replace('/', "~1");
        Self(format!("{}/{escaped}", self.0))
    }

    /// Path of element `index` of the array at this path.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}/{index}", self.0))
    }

    /// Append an already-escaped JSON Pointer, as reported by the schema
    /// engine relative to the node at this path.
    pub fn join_pointer(&self, pointer: &str) -> Self {
        if pointer.is_empty() {
            return self.clone();
        }
        Self(format!("{}{pointer}", self.0))
    }

    /// The raw pointer string (empty for the root).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}
