//! # Recursive Sidebar Validation
//!
//! Full-depth validation of sidebar trees, built from the shallow per-node
//! schemas of the [`SchemaRegistry`] and an explicit recursive descent.
//!
//! ## Walk
//!
//! Depth-first, pre-order: a node's own shape (and its category link) is
//! checked before any of its children. Declaration order is preserved
//! across sidebars, items, and shorthand groups. The first failure aborts
//! the walk and is returned as-is; nothing is accumulated.
//!
//! ## Dispatch
//!
//! 1. A string is a doc id shorthand and is accepted.
//! 2. An object without a `type` key is a shorthand category group. This
//!    is decided before any schema runs; every value must be an array of
//!    items.
//! 3. Any other object dispatches on its `type` tag to the matching item
//!    schema. Categories then descend into `items`.
//!
//! The input is only borrowed. The typed tree returned by the `parse_*`
//! functions is built during the same walk.

use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use sidebars_core::{
    CategoryItem, CategoryLinkKind, CategoryMetadata, CategoryShorthand, ItemKind, ItemPath,
    Sidebar, SidebarItem, SidebarValidationError, SidebarsConfig, TypeTarget,
};

use crate::registry::SchemaRegistry;

static SHARED: OnceLock<SidebarValidator> = OnceLock::new();

/// Validator for sidebars configurations and category metadata files.
///
/// ## Thread Safety
///
/// `SidebarValidator` is `Send + Sync` and holds no mutable state; every
/// call works only on its argument.
#[derive(Debug)]
pub struct SidebarValidator {
    registry: SchemaRegistry,
}

impl SidebarValidator {
    /// Build a validator with a freshly compiled registry.
    pub fn new() -> Result<Self, SidebarValidationError> {
        Ok(Self {
            registry: SchemaRegistry::new()?,
        })
    }

    /// Process-wide validator, compiled on first use.
    pub fn shared() -> Result<&'static SidebarValidator, SidebarValidationError> {
        if let Some(validator) = SHARED.get() {
            return Ok(validator);
        }
        let validator = Self::new()?;
        Ok(SHARED.get_or_init(|| validator))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Assert that a whole-site sidebars configuration is well-formed.
    pub fn validate_sidebars(&self, sidebars: &Value) -> Result<(), SidebarValidationError> {
        self.parse_sidebars(sidebars).map(|_| ())
    }

    /// Validate a sidebars configuration and return its typed form.
    ///
    /// `sidebars` maps sidebar names to either an array of items or a
    /// single item. A single item becomes a one-element sidebar.
    pub fn parse_sidebars(&self, sidebars: &Value) -> Result<SidebarsConfig, SidebarValidationError> {
        let root = ItemPath::root();
        let Value::Object(entries) = sidebars else {
            return Err(SidebarValidationError::ShapeMismatch {
                path: root,
                message: format!(
                    "sidebars must be an object mapping sidebar names to items, got {}",
                    json_type_name(sidebars)
                ),
            });
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            tracing::debug!(sidebar = %name, "validating sidebar");
            let path = root.key(name);
            let items = match value {
                Value::Array(items) => self.parse_items(items, &path)?,
                single => vec![self.parse_item_at(single, &path)?],
            };
            parsed.push(Sidebar {
                name: name.clone(),
                items,
            });
        }
        Ok(SidebarsConfig::new(parsed))
    }

    /// Assert that a single sidebar item, and everything below it, is
    /// well-formed.
    pub fn validate_sidebar_item(&self, item: &Value) -> Result<(), SidebarValidationError> {
        self.parse_sidebar_item(item).map(|_| ())
    }

    /// Validate a single sidebar item and return its typed form.
    pub fn parse_sidebar_item(&self, item: &Value) -> Result<SidebarItem, SidebarValidationError> {
        self.parse_item_at(item, &ItemPath::root())
    }

    /// Validate one per-directory category metadata record.
    ///
    /// A numeric string `position` (e.g. `"2"`) is coerced to a number
    /// before checking. Rejected content is logged at `error` level.
    pub fn validate_category_metadata_file(
        &self,
        content: &Value,
    ) -> Result<CategoryMetadata, SidebarValidationError> {
        let result = self.parse_category_metadata(content);
        if let Err(ref error) = result {
            tracing::error!(
                content = %content,
                error = %error,
                "category metadata file does not match the expected shape"
            );
        }
        result
    }

    fn parse_category_metadata(
        &self,
        content: &Value,
    ) -> Result<CategoryMetadata, SidebarValidationError> {
        let root = ItemPath::root();
        let Value::Object(fields) = content else {
            return Err(SidebarValidationError::ShapeMismatch {
                path: root,
                message: format!(
                    "category metadata must be an object, got {}",
                    json_type_name(content)
                ),
            });
        };

        let coerced = Value::Object(coerce_position(fields));
        self.registry
            .category_metadata_schema()
            .check(&coerced, &root)?;
        if let Some(link) = fields.get("link") {
            self.check_category_link(link, &root.key("link"))?;
        }
        lift(&coerced, &root)
    }

    fn parse_items(
        &self,
        items: &[Value],
        path: &ItemPath,
    ) -> Result<Vec<SidebarItem>, SidebarValidationError> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.parse_item_at(item, &path.index(index)))
            .collect()
    }

    fn parse_item_at(
        &self,
        item: &Value,
        path: &ItemPath,
    ) -> Result<SidebarItem, SidebarValidationError> {
        match item {
            Value::String(id) => Ok(SidebarItem::DocShorthand(id.clone())),
            Value::Object(fields) if !fields.contains_key("type") => {
                self.parse_shorthand(fields, path)
            }
            Value::Object(fields) => self.parse_typed(item, fields, path),
            other => Err(SidebarValidationError::ShapeMismatch {
                path: path.clone(),
                message: format!(
                    "sidebar item must be a doc id, an item object, or a category shorthand, got {}",
                    json_type_name(other)
                ),
            }),
        }
    }

    fn parse_shorthand(
        &self,
        groups: &Map<String, Value>,
        path: &ItemPath,
    ) -> Result<SidebarItem, SidebarValidationError> {
        let mut parsed = Vec::with_capacity(groups.len());
        for (label, items) in groups {
            let group_path = path.key(label);
            let Value::Array(items) = items else {
                return Err(SidebarValidationError::ShapeMismatch {
                    path: group_path,
                    message: format!(
                        "category shorthand \"{label}\" must be an array of sidebar items, got {}",
                        json_type_name(items)
                    ),
                });
            };
            parsed.push(CategoryShorthand {
                label: label.clone(),
                items: self.parse_items(items, &group_path)?,
            });
        }
        Ok(SidebarItem::CategoriesShorthand(parsed))
    }

    fn parse_typed(
        &self,
        item: &Value,
        fields: &Map<String, Value>,
        path: &ItemPath,
    ) -> Result<SidebarItem, SidebarValidationError> {
        let tag = fields.get("type").unwrap_or(&Value::Null);
        let kind = tag.as_str().and_then(ItemKind::from_tag).ok_or_else(|| {
            SidebarValidationError::UnknownType {
                path: path.clone(),
                target: TypeTarget::SidebarItem,
                value: tag_display(tag),
            }
        })?;

        tracing::trace!(path = %path, kind = %kind, "validating sidebar item");
        self.registry.item_schema(kind).check(item, path)?;

        match kind {
            ItemKind::Doc | ItemKind::Ref => lift(item, path).map(SidebarItem::Doc),
            ItemKind::Link => lift(item, path).map(SidebarItem::Link),
            ItemKind::Autogenerated => lift(item, path).map(SidebarItem::Autogenerated),
            ItemKind::Category => self.parse_category(fields, path),
        }
    }

    fn parse_category(
        &self,
        fields: &Map<String, Value>,
        path: &ItemPath,
    ) -> Result<SidebarItem, SidebarValidationError> {
        if let Some(link) = fields.get("link") {
            self.check_category_link(link, &path.key("link"))?;
        }

        let head: Map<String, Value> = fields
            .iter()
            .filter(|(key, _)| key.as_str() != "items")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let mut category: CategoryItem = lift(&Value::Object(head), path)?;

        // The category schema has already required `items` to be an array.
        let children = fields
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        category.items = self.parse_items(children, &path.key("items"))?;

        Ok(SidebarItem::Category(category))
    }

    /// Check a category link, dispatching on its own `type` tag. `null`
    /// means "no link" and is accepted.
    fn check_category_link(
        &self,
        link: &Value,
        path: &ItemPath,
    ) -> Result<(), SidebarValidationError> {
        let fields = match link {
            Value::Null => return Ok(()),
            Value::Object(fields) => fields,
            other => {
                return Err(SidebarValidationError::MalformedField {
                    path: path.clone(),
                    field: "link".to_string(),
                    value: other.to_string(),
                    message: "\"link\" must be an object or null".to_string(),
                })
            }
        };

        let Some(tag) = fields.get("type") else {
            return Err(SidebarValidationError::MissingField {
                path: path.clone(),
                field: "type".to_string(),
            });
        };
        let kind = tag.as_str().and_then(CategoryLinkKind::from_tag).ok_or_else(|| {
            SidebarValidationError::UnknownType {
                path: path.clone(),
                target: TypeTarget::CategoryLink,
                value: tag_display(tag),
            }
        })?;

        self.registry.category_link_schema(kind).check(link, path)
    }
}

/// Deserialize an already-checked node into its typed form.
fn lift<'a, T>(value: &'a Value, path: &ItemPath) -> Result<T, SidebarValidationError>
where
    T: Deserialize<'a>,
{
    T::deserialize(value).map_err(|e| SidebarValidationError::ShapeMismatch {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Copy of a metadata record with a numeric string `position` replaced by
/// the number it spells.
fn coerce_position(fields: &Map<String, Value>) -> Map<String, Value> {
    let mut coerced = fields.clone();
    if let Some(Value::String(raw)) = fields.get("position") {
        let number = raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64);
        if let Some(number) = number {
            coerced.insert("position".to_string(), Value::Number(number));
        }
    }
    coerced
}

fn tag_display(tag: &Value) -> String {
    match tag {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Assert that a whole-site sidebars configuration is well-formed.
pub fn validate_sidebars(sidebars: &Value) -> Result<(), SidebarValidationError> {
    SidebarValidator::shared()?.validate_sidebars(sidebars)
}

/// Validate a whole-site sidebars configuration and return its typed form.
pub fn parse_sidebars(sidebars: &Value) -> Result<SidebarsConfig, SidebarValidationError> {
    SidebarValidator::shared()?.parse_sidebars(sidebars)
}

/// Assert that one sidebar item, and its whole subtree, is well-formed.
pub fn validate_sidebar_item(item: &Value) -> Result<(), SidebarValidationError> {
    SidebarValidator::shared()?.validate_sidebar_item(item)
}

/// Validate one sidebar item and return its typed form.
pub fn parse_sidebar_item(item: &Value) -> Result<SidebarItem, SidebarValidationError> {
    SidebarValidator::shared()?.parse_sidebar_item(item)
}

/// Validate one category metadata record and return it normalized.
pub fn validate_category_metadata_file(
    content: &Value,
) -> Result<CategoryMetadata, SidebarValidationError> {
    SidebarValidator::shared()?.validate_category_metadata_file(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sidebars_core::{CategoryLink, DocKind};

    fn validator() -> &'static SidebarValidator {
        SidebarValidator::shared().unwrap()
    }

    fn path(pointer: &str) -> ItemPath {
        ItemPath::root().join_pointer(pointer)
    }

    // ── Minimal items of every variant ──────────────────────────────

    #[test]
    fn minimal_items_of_every_variant_validate() {
        let items = [
            json!({"type": "doc", "id": "intro"}),
            json!({"type": "ref", "id": "intro"}),
            json!({"type": "link", "href": "https://example.com", "label": "Example"}),
            json!({"type": "autogenerated", "dirName": "guides"}),
            json!({"type": "category", "label": "Guides", "items": []}),
        ];
        for item in &items {
            validator()
                .validate_sidebar_item(item)
                .unwrap_or_else(|e| panic!("{item} should validate: {e}"));
        }
    }

    #[test]
    fn bare_string_is_doc_shorthand() {
        let item = validator().parse_sidebar_item(&json!("intro")).unwrap();
        assert_eq!(item, SidebarItem::DocShorthand("intro".to_string()));
    }

    #[test]
    fn doc_item_is_narrowed() {
        let item = validator()
            .parse_sidebar_item(&json!({"type": "ref", "id": "api", "label": "API"}))
            .unwrap();
        match item {
            SidebarItem::Doc(doc) => {
                assert_eq!(doc.kind, DocKind::Ref);
                assert_eq!(doc.id, "api");
                assert_eq!(doc.label.as_deref(), Some("API"));
            }
            other => panic!("expected doc item, got {other:?}"),
        }
    }

    // ── Unknown types ───────────────────────────────────────────────

    #[test]
    fn unknown_item_type_is_named() {
        let err = validator()
            .validate_sidebar_item(&json!({"type": "bogus", "id": "x"}))
            .unwrap_err();
        assert!(err.to_string().contains("bogus"), "message: {err}");
        assert_eq!(
            err,
            SidebarValidationError::UnknownType {
                path: ItemPath::root(),
                target: TypeTarget::SidebarItem,
                value: "bogus".to_string(),
            }
        );
    }

    #[test]
    fn non_string_item_type_is_rendered_as_json() {
        let err = validator()
            .validate_sidebar_item(&json!({"type": 7}))
            .unwrap_err();
        assert!(err.to_string().contains("\"7\""), "message: {err}");
    }

    #[test]
    fn scalar_items_are_shape_mismatches() {
        for bad in [json!(42), json!(true), json!(null), json!(["nested"])] {
            let err = validator().validate_sidebar_item(&bad).unwrap_err();
            assert_eq!(err.code(), "shape-mismatch", "{bad}: {err}");
        }
    }

    // ── Category shape ──────────────────────────────────────────────

    #[test]
    fn category_items_must_be_an_array() {
        let err = validator()
            .validate_sidebar_item(&json!({
                "type": "category",
                "label": "C",
                "items": "not-an-array"
            }))
            .unwrap_err();
        assert!(matches!(err, SidebarValidationError::ShapeMismatch { .. }), "{err}");
    }

    #[test]
    fn category_requires_label_and_items() {
        let err = validator()
            .validate_sidebar_item(&json!({"type": "category", "items": []}))
            .unwrap_err();
        assert!(matches!(&err, SidebarValidationError::MissingField { field, .. } if field == "label"));

        let err = validator()
            .validate_sidebar_item(&json!({"type": "category", "label": "C"}))
            .unwrap_err();
        assert!(matches!(&err, SidebarValidationError::MissingField { field, .. } if field == "items"));
    }

    #[test]
    fn category_collapse_flags_must_be_booleans() {
        let err = validator()
            .validate_sidebar_item(&json!({
                "type": "category",
                "label": "C",
                "items": [],
                "collapsed": "yes"
            }))
            .unwrap_err();
        assert!(err.to_string().contains("\"collapsed\" must be a boolean"), "{err}");
    }

    // ── Links ───────────────────────────────────────────────────────

    #[test]
    fn link_without_label_is_missing_field() {
        let err = validator()
            .validate_sidebar_item(&json!({"type": "link", "href": "https://example.com"}))
            .unwrap_err();
        assert_eq!(
            err,
            SidebarValidationError::MissingField {
                path: ItemPath::root(),
                field: "label".to_string(),
            }
        );
    }

    #[test]
    fn link_with_numeric_label_uses_custom_message() {
        let err = validator()
            .validate_sidebar_item(&json!({
                "type": "link",
                "href": "https://example.com",
                "label": 123
            }))
            .unwrap_err();
        assert!(err.to_string().contains("\"label\" must be a string"), "{err}");
    }

    #[test]
    fn link_accepts_relative_href() {
        let item = validator()
            .parse_sidebar_item(&json!({"type": "link", "href": "/blog", "label": "Blog"}))
            .unwrap();
        assert!(matches!(item, SidebarItem::Link(ref link) if link.href == "/blog"));
    }

    // ── Autogenerated ───────────────────────────────────────────────

    #[test]
    fn dir_name_edges() {
        for bad in ["/foo", "foo/", ""] {
            let err = validator()
                .validate_sidebar_item(&json!({"type": "autogenerated", "dirName": bad}))
                .unwrap_err();
            assert!(
                matches!(&err, SidebarValidationError::MalformedField { field, .. } if field == "dirName"),
                "{bad:?}: {err}"
            );
        }
        validator()
            .validate_sidebar_item(&json!({"type": "autogenerated", "dirName": "foo/bar"}))
            .unwrap();
    }

    // ── Shorthand ───────────────────────────────────────────────────

    #[test]
    fn shorthand_group_validates_string_leaves() {
        let item = validator()
            .parse_sidebar_item(&json!({"Category A": ["doc1", "doc2"]}))
            .unwrap();
        match item {
            SidebarItem::CategoriesShorthand(groups) => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].label, "Category A");
                assert_eq!(
                    groups[0].items,
                    vec![
                        SidebarItem::DocShorthand("doc1".to_string()),
                        SidebarItem::DocShorthand("doc2".to_string()),
                    ]
                );
            }
            other => panic!("expected shorthand group, got {other:?}"),
        }
    }

    #[test]
    fn shorthand_group_keeps_declaration_order() {
        let item = validator()
            .parse_sidebar_item(&json!({"Zeta": [], "Alpha": [], "Mid": []}))
            .unwrap();
        let SidebarItem::CategoriesShorthand(groups) = item else {
            panic!("expected shorthand group");
        };
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn shorthand_group_value_must_be_an_array() {
        let err = validator()
            .validate_sidebar_item(&json!({"Category A": "doc1"}))
            .unwrap_err();
        assert_eq!(err.code(), "shape-mismatch");
        assert_eq!(err.path(), Some(&path("/Category A")));
    }

    #[test]
    fn shorthand_runs_before_item_schemas() {
        // Would be an unknown field `label` under any item schema.
        validator()
            .validate_sidebar_item(&json!({"label": ["intro"]}))
            .unwrap();
    }

    #[test]
    fn shorthand_children_are_validated() {
        let err = validator()
            .validate_sidebar_item(&json!({"Group": ["ok", {"type": "doc"}]}))
            .unwrap_err();
        assert_eq!(
            err,
            SidebarValidationError::MissingField {
                path: path("/Group/1"),
                field: "id".to_string(),
            }
        );
    }

    // ── Recursion ───────────────────────────────────────────────────

    #[test]
    fn nested_categories_validate_in_one_call() {
        let tree = json!({
            "type": "category",
            "label": "Outer",
            "items": [{
                "type": "category",
                "label": "Inner",
                "items": [{"type": "doc", "id": "leaf"}]
            }]
        });
        let item = validator().parse_sidebar_item(&tree).unwrap();
        assert_eq!(item.node_count(), 3);
    }

    #[test]
    fn malformed_doc_at_depth_three_is_reported() {
        let tree = json!({
            "type": "category",
            "label": "Outer",
            "items": [{
                "type": "category",
                "label": "Inner",
                "items": ["fine", {"type": "doc", "id": 5}]
            }]
        });
        let err = validator().validate_sidebar_item(&tree).unwrap_err();
        match err {
            SidebarValidationError::MalformedField { path: at, field, .. } => {
                assert_eq!(at, path("/items/0/items/1/id"));
                assert_eq!(field, "id");
            }
            other => panic!("expected malformed id, got {other:?}"),
        }
    }

    #[test]
    fn parent_shape_is_checked_before_children() {
        let tree = json!({
            "type": "category",
            "label": "Outer",
            "unexpected": true,
            "items": [{"type": "bogus"}]
        });
        let err = validator().validate_sidebar_item(&tree).unwrap_err();
        assert!(
            matches!(&err, SidebarValidationError::UnknownField { field, .. } if field == "unexpected"),
            "{err}"
        );
    }

    #[test]
    fn first_failing_sibling_wins() {
        let tree = json!({
            "type": "category",
            "label": "C",
            "items": [{"type": "first-bad"}, {"type": "second-bad"}]
        });
        let err = validator().validate_sidebar_item(&tree).unwrap_err();
        assert!(err.to_string().contains("first-bad"), "{err}");
    }

    // ── Category links ──────────────────────────────────────────────

    fn category_with_link(link: Value) -> Value {
        json!({"type": "category", "label": "C", "items": [], "link": link})
    }

    #[test]
    fn category_link_variants() {
        let item = validator()
            .parse_sidebar_item(&category_with_link(json!({"type": "doc", "id": "overview"})))
            .unwrap();
        let SidebarItem::Category(category) = item else {
            panic!("expected category");
        };
        assert_eq!(category.link, Some(CategoryLink::Doc { id: "overview".to_string() }));

        validator()
            .validate_sidebar_item(&category_with_link(json!({
                "type": "generated-index",
                "title": "All guides",
                "slug": "/guides",
                "keywords": ["guides", "howto"]
            })))
            .unwrap();
        validator()
            .validate_sidebar_item(&category_with_link(Value::Null))
            .unwrap();
    }

    #[test]
    fn category_doc_link_requires_id() {
        let err = validator()
            .validate_sidebar_item(&category_with_link(json!({"type": "doc"})))
            .unwrap_err();
        assert_eq!(
            err,
            SidebarValidationError::MissingField {
                path: path("/link"),
                field: "id".to_string(),
            }
        );
    }

    #[test]
    fn generated_index_forbids_id() {
        let err = validator()
            .validate_sidebar_item(&category_with_link(json!({"type": "generated-index", "id": "x"})))
            .unwrap_err();
        assert_eq!(
            err,
            SidebarValidationError::UnknownField {
                path: path("/link"),
                field: "id".to_string(),
            }
        );
    }

    #[test]
    fn unknown_category_link_type_is_named() {
        let err = validator()
            .validate_sidebar_item(&category_with_link(json!({"type": "external"})))
            .unwrap_err();
        assert_eq!(
            err,
            SidebarValidationError::UnknownType {
                path: path("/link"),
                target: TypeTarget::CategoryLink,
                value: "external".to_string(),
            }
        );
    }

    #[test]
    fn category_link_without_type_is_missing_field() {
        let err = validator()
            .validate_sidebar_item(&category_with_link(json!({"id": "x"})))
            .unwrap_err();
        assert!(matches!(&err, SidebarValidationError::MissingField { field, .. } if field == "type"));
    }

    // ── Whole-site sidebars ─────────────────────────────────────────

    #[test]
    fn sidebars_accept_arrays_and_single_items() {
        let config = validator()
            .parse_sidebars(&json!({
                "docs": ["intro", {"type": "doc", "id": "setup"}],
                "api": {"Reference": ["api/overview"]},
                "blog": {"type": "link", "href": "/blog", "label": "Blog"}
            }))
            .unwrap();
        let names: Vec<&str> = config.sidebars().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "api", "blog"]);
        assert_eq!(config.get("docs").unwrap().items.len(), 2);
        assert_eq!(config.get("blog").unwrap().items.len(), 1);
        assert_eq!(config.item_count(), 5);
    }

    #[test]
    fn sidebars_fail_fast_in_declaration_order() {
        let err = validator()
            .validate_sidebars(&json!({
                "first": [{"type": "first-bad"}],
                "second": [{"type": "second-bad"}]
            }))
            .unwrap_err();
        assert_eq!(err.path(), Some(&path("/first/0")));
    }

    #[test]
    fn sidebars_must_be_an_object() {
        let err = validator().validate_sidebars(&json!(["intro"])).unwrap_err();
        assert_eq!(err.code(), "shape-mismatch");
        assert!(err.to_string().contains("got array"), "{err}");
    }

    // ── Category metadata files ─────────────────────────────────────

    #[test]
    fn metadata_returns_both_fields() {
        let meta = validator()
            .validate_category_metadata_file(&json!({"label": "X", "position": 2}))
            .unwrap();
        assert_eq!(meta.label.as_deref(), Some("X"));
        assert_eq!(meta.position, Some(2.0));
    }

    #[test]
    fn metadata_coerces_numeric_string_position() {
        let meta = validator()
            .validate_category_metadata_file(&json!({"position": " 2.5 "}))
            .unwrap();
        assert_eq!(meta.position, Some(2.5));
    }

    #[test]
    fn metadata_rejects_non_numeric_position() {
        let err = validator()
            .validate_category_metadata_file(&json!({"label": "X", "position": "two"}))
            .unwrap_err();
        match err {
            SidebarValidationError::MalformedField { field, value, message, .. } => {
                assert_eq!(field, "position");
                assert_eq!(value, "\"two\"");
                assert_eq!(message, "\"position\" must be a number");
            }
            other => panic!("expected malformed position, got {other:?}"),
        }
    }

    #[test]
    fn metadata_is_flat() {
        let err = validator()
            .validate_category_metadata_file(&json!({"label": "X", "items": []}))
            .unwrap_err();
        assert!(matches!(&err, SidebarValidationError::UnknownField { field, .. } if field == "items"));
    }

    #[test]
    fn metadata_link_is_dispatched() {
        let meta = validator()
            .validate_category_metadata_file(&json!({
                "label": "Guides",
                "collapsible": true,
                "className": "guides",
                "customProps": {"icon": "book"},
                "link": {"type": "generated-index", "description": "Every guide"}
            }))
            .unwrap();
        assert!(matches!(meta.link, Some(CategoryLink::GeneratedIndex(_))));
        assert_eq!(meta.collapsible, Some(true));

        let err = validator()
            .validate_category_metadata_file(&json!({"link": {"type": "doc"}}))
            .unwrap_err();
        assert_eq!(err.path(), Some(&path("/link")));
    }

    #[test]
    fn metadata_must_be_an_object() {
        let err = validator()
            .validate_category_metadata_file(&json!("label: X"))
            .unwrap_err();
        assert_eq!(err.code(), "shape-mismatch");
    }

    #[test]
    fn input_is_not_mutated() {
        let input = json!({"position": "3", "label": "Y"});
        let before = input.clone();
        validator().validate_category_metadata_file(&input).unwrap();
        assert_eq!(input, before);
    }

    // ── Base fields ─────────────────────────────────────────────────

    #[test]
    fn base_field_messages_apply_to_every_item_kind() {
        let items = [
            json!({"type": "doc", "id": "intro"}),
            json!({"type": "link", "href": "/blog", "label": "Blog"}),
            json!({"type": "category", "label": "C", "items": []}),
        ];
        for item in items {
            let mut bad_class = item.clone();
            bad_class["className"] = json!(5);
            let err = validator().validate_sidebar_item(&bad_class).unwrap_err();
            assert!(err.to_string().contains("\"className\" must be a string"), "{item}: {err}");

            let mut bad_props = item.clone();
            bad_props["customProps"] = Value::Null;
            let err = validator().validate_sidebar_item(&bad_props).unwrap_err();
            assert!(err.to_string().contains("\"customProps\" must be an object"), "{item}: {err}");
        }
    }

    // ── Concurrency ─────────────────────────────────────────────────

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn validator_and_registry_are_send_sync() {
        assert_send_sync::<SidebarValidator>();
        assert_send_sync::<SchemaRegistry>();
    }

    #[test]
    fn shared_validator_is_usable_from_many_threads() {
        let config = json!({
            "docs": ["intro", {"type": "category", "label": "C", "items": ["a", "b"]}]
        });
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| SidebarValidator::shared().unwrap().parse_sidebars(&config)))
                .collect();
            for handle in handles {
                let parsed = handle.join().unwrap().unwrap();
                assert_eq!(parsed.item_count(), 4);
            }
        });
    }

    // ── Free functions ──────────────────────────────────────────────

    #[test]
    fn free_functions_use_shared_validator() {
        validate_sidebar_item(&json!("intro")).unwrap();
        validate_sidebars(&json!({"docs": ["intro"]})).unwrap();
        assert_eq!(parse_sidebars(&json!({"docs": []})).unwrap().len(), 1);
        assert!(parse_sidebar_item(&json!({"type": "nope"})).is_err());
        assert!(validate_category_metadata_file(&json!({})).is_ok());
    }
}
