//! # Sidebar Items
//!
//! The recursive navigation tree. [`SidebarItem`] is a native recursive
//! sum type: a category owns its children directly, so "every child is
//! itself a valid item" is a property of the type once the validator has
//! built it.
//!
//! Leaf structs derive `Deserialize` so the validator can lift an already
//! checked JSON object into them. Deserializing them directly from
//! untrusted input skips the schema checks; go through
//! `sidebars_schema::parse_sidebar_item` instead.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::kind::ItemKind;
use crate::link::CategoryLink;

/// Fields shared by every typed item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    #[serde(default)]
    pub class_name: Option<String>,
    /// Open record passed through to the theme untouched.
    #[serde(default)]
    pub custom_props: Option<Map<String, Value>>,
}

/// Tag of a document reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Doc,
    Ref,
}

/// `doc` / `ref` item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocItem {
    #[serde(rename = "type")]
    pub kind: DocKind,
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub base: ItemBase,
}

/// `link` item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub href: String,
    pub label: String,
    #[serde(default)]
    pub auto_add_base_url: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub base: ItemBase,
}

/// `autogenerated` item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutogeneratedItem {
    /// Directory relative to the docs root, without leading or trailing
    /// separator.
    pub dir_name: String,
    #[serde(flatten)]
    pub base: ItemBase,
}

/// `category` item.
///
/// `items` is not deserialized: the validator fills it with the children
/// it has validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub label: String,
    #[serde(skip)]
    pub items: Vec<SidebarItem>,
    #[serde(default)]
    pub link: Option<CategoryLink>,
    #[serde(default)]
    pub collapsed: Option<bool>,
    #[serde(default)]
    pub collapsible: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub base: ItemBase,
}

/// One entry of a shorthand category group: `{ "<label>": [items] }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShorthand {
    pub label: String,
    pub items: Vec<SidebarItem>,
}

/// One node of a sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarItem {
    /// A bare string: shorthand for a `doc` reference by id.
    DocShorthand(String),
    /// A mapping of category labels to item lists, in declaration order.
    CategoriesShorthand(Vec<CategoryShorthand>),
    Doc(DocItem),
    Link(LinkItem),
    Autogenerated(AutogeneratedItem),
    Category(CategoryItem),
}

impl SidebarItem {
    /// The `type` tag of typed items; `None` for the shorthand forms.
    pub fn kind(&self) -> Option<ItemKind> {
        match self {
            Self::DocShorthand(_) | Self::CategoriesShorthand(_) => None,
            Self::Doc(doc) => Some(match doc.kind {
                DocKind::Doc => ItemKind::Doc,
                DocKind::Ref => ItemKind::Ref,
            }),
            Self::Link(_) => Some(ItemKind::Link),
            Self::Autogenerated(_) => Some(ItemKind::Autogenerated),
            Self::Category(_) => Some(ItemKind::Category),
        }
    }

    /// Display label, when the item declares one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Doc(doc) => doc.label.as_deref(),
            Self::Link(link) => Some(&link.label),
            Self::Category(category) => Some(&category.label),
            Self::DocShorthand(_) | Self::CategoriesShorthand(_) | Self::Autogenerated(_) => None,
        }
    }

    /// Direct children, in declaration order. Shorthand groups yield the
    /// items of every group in turn.
    pub fn children(&self) -> Box<dyn Iterator<Item = &SidebarItem> + '_> {
        match self {
            Self::Category(category) => Box::new(category.items.iter()),
            Self::CategoriesShorthand(groups) => {
                Box::new(groups.iter().flat_map(|group| group.items.iter()))
            }
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Pre-order depth-first walk over this item and its descendants.
    /// `visit` receives each node with its depth (this item is depth 0).
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&SidebarItem, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&SidebarItem, usize),
    {
        visit(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }
}

/// A named sidebar. A sidebar declared as a single item is normalized to
/// a one-element list.
#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    pub name: String,
    pub items: Vec<SidebarItem>,
}

/// Whole-site sidebars configuration, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarsConfig {
    sidebars: Vec<Sidebar>,
}

impl SidebarsConfig {
    pub fn new(sidebars: Vec<Sidebar>) -> Self {
        Self { sidebars }
    }

    pub fn sidebars(&self) -> &[Sidebar] {
        &self.sidebars
    }

    /// Look up a sidebar by name.
    pub fn get(&self, name: &str) -> Option<&Sidebar> {
        self.sidebars.iter().find(|sidebar| sidebar.name == name)
    }

    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Total number of nodes across all sidebars, nested ones included.
    pub fn item_count(&self) -> usize {
        self.sidebars
            .iter()
            .flat_map(|sidebar| sidebar.items.iter())
            .map(SidebarItem::node_count)
            .sum()
    }
}
