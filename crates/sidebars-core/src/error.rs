//! # Error Types: Validation Error Taxonomy
//!
//! Every failure of sidebar validation is a configuration-authoring
//! mistake that is surfaced verbatim to the author. The message is the
//! only diagnostic, so each variant carries the location of the node,
//! the field involved, and what was expected.
//!
//! ## Design
//!
//! - One variant per failure class: unknown field, unknown type tag,
//!   missing field, malformed field, shape mismatch.
//! - Validation is fail-fast: a single error, never an aggregate.
//! - `SchemaBuild` is reserved for registry defects and is never caused
//!   by user input.

use std::fmt;

use thiserror::Error;

use crate::path::ItemPath;

/// What carried an unrecognized `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTarget {
    /// A sidebar item.
    SidebarItem,
    /// The `link` of a category or category metadata file.
    CategoryLink,
}

impl fmt::Display for TypeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SidebarItem => f.write_str("sidebar item"),
            Self::CategoryLink => f.write_str("sidebar category link"),
        }
    }
}

/// Error raised when a sidebars value does not satisfy its expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SidebarValidationError {
    /// A field not declared by the matched schema is present.
    #[error("{path}: \"{field}\" is not allowed")]
    UnknownField {
        /// Location of the object carrying the field.
        path: ItemPath,
        /// The undeclared field name.
        field: String,
    },

    /// The `type` discriminator holds a value outside the recognized set.
    #[error("{path}: Unknown {target} type \"{value}\"")]
    UnknownType {
        /// Location of the item or link.
        path: ItemPath,
        /// Whether an item or a category link was being validated.
        target: TypeTarget,
        /// The offending tag value.
        value: String,
    },

    /// A mandatory field is absent.
    #[error("{path}: \"{field}\" is required")]
    MissingField {
        /// Location of the object missing the field.
        path: ItemPath,
        /// The required field name.
        field: String,
    },

    /// A field's value fails its type or pattern constraint.
    #[error("{path}: {message} (got {value})")]
    MalformedField {
        /// Location of the offending value.
        path: ItemPath,
        /// The top-level field of the object that failed.
        field: String,
        /// JSON rendering of the offending value.
        value: String,
        /// Human-readable statement of the constraint.
        message: String,
    },

    /// A node has the wrong structural shape, e.g. category `items` that
    /// is not an array.
    #[error("{path}: {message}")]
    ShapeMismatch {
        /// Location of the offending node.
        path: ItemPath,
        /// Human-readable statement of the expected shape.
        message: String,
    },

    /// A registry schema failed to compile.
    #[error("schema build error for '{schema}': {reason}")]
    SchemaBuild {
        /// Name of the schema in the registry.
        schema: String,
        /// Reason reported by the schema engine.
        reason: String,
    },
}

impl SidebarValidationError {
    /// Location of the offending node, when the error concerns user input.
    pub fn path(&self) -> Option<&ItemPath> {
        match self {
            Self::UnknownField { path, .. }
            | Self::UnknownType { path, .. }
            | Self::MissingField { path, .. }
            | Self::MalformedField { path, .. }
            | Self::ShapeMismatch { path, .. } => Some(path),
            Self::SchemaBuild { .. } => None,
        }
    }

    /// Stable machine-readable name of the failure class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "unknown-field",
            Self::UnknownType { .. } => "unknown-type",
            Self::MissingField { .. } => "missing-field",
            Self::MalformedField { .. } => "malformed-field",
            Self::ShapeMismatch { .. } => "shape-mismatch",
            Self::SchemaBuild { .. } => "schema-build",
        }
    }
}
