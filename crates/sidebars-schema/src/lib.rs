//! # sidebars-schema: Sidebar Schema Registry & Recursive Validator
//!
//! Validates documentation sidebars configurations and per-directory
//! category metadata files.
//!
//! ## Schema Registry (`registry`)
//!
//! The [`registry`] module compiles one JSON Schema per node shape: each
//! sidebar item variant, each category link variant, and the category
//! metadata file. Schemas are shallow and closed; `category.items` is a
//! bare array.
//!
//! ## Recursive Validation (`validate`)
//!
//! The [`validate`] module applies those schemas to every node of a tree
//! by explicit recursive descent, after routing the shorthand forms (bare
//! doc ids, label-to-items mappings). Entry points:
//!
//! - [`validate_sidebars`] / [`parse_sidebars`]: a whole-site config.
//! - [`validate_sidebar_item`] / [`parse_sidebar_item`]: one item tree.
//! - [`validate_category_metadata_file`]: one flat metadata record,
//!   returned normalized.
//!
//! ## Loading (`load`)
//!
//! The [`load`] module reads JSON/YAML files into values and validates
//! them in one step.
//!
//! ## Crate Policy
//!
//! - Depends only on `sidebars-core` internally.
//! - Validation never mutates its input and never injects defaults.
//! - Fail-fast: the first violation found is the one returned.

pub mod load;
pub mod registry;
pub mod validate;

pub use load::{
    is_category_metadata_file, load_category_metadata, load_document, load_sidebars,
    parse_document, DocumentFormat, LoadError, CATEGORY_METADATA_FILENAMES,
};
pub use registry::{NodeSchema, SchemaRegistry};
pub use validate::{
    parse_sidebar_item, parse_sidebars, validate_category_metadata_file, validate_sidebar_item,
    validate_sidebars, SidebarValidator,
};
