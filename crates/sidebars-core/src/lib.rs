//! # sidebars-core: Typed Model for Documentation Sidebars
//!
//! This crate defines the data model a documentation site's navigation
//! tree is narrowed into once it has been validated. It depends on nothing
//! internal; `sidebars-schema` builds these types from untrusted input.
//!
//! ## Key Design Principles
//!
//! 1. **One recursive sum type.** [`SidebarItem`] has a variant per item
//!    tag (`doc`/`ref`, `link`, `autogenerated`, `category`) plus the two
//!    shorthand forms (bare doc id, label-to-items mapping). Every consumer
//!    matches exhaustively.
//!
//! 2. **Tags are discriminators, not strings.** [`ItemKind`] and
//!    [`CategoryLinkKind`] are the only places tag strings are spelled.
//!    An unknown tag is `None`, never a silent fallback.
//!
//! 3. **Every error carries a location.** [`SidebarValidationError`]
//!    variants hold the [`ItemPath`] of the offending node so the message
//!    alone is enough for the author to find the mistake.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sidebars-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No default values are injected: absent optional fields stay `None`.

pub mod error;
pub mod item;
pub mod kind;
pub mod link;
pub mod metadata;
pub mod path;

pub use error::{SidebarValidationError, TypeTarget};
pub use item::{
    AutogeneratedItem, CategoryItem, CategoryShorthand, DocItem, DocKind, ItemBase, LinkItem,
    Sidebar, SidebarItem, SidebarsConfig,
};
pub use kind::{CategoryLinkKind, ItemKind};
pub use link::{CategoryLink, GeneratedIndex, Keywords};
pub use metadata::CategoryMetadata;
pub use path::ItemPath;
