//! # Schema Registry
//!
//! One compiled JSON Schema (Draft 2020-12) per sidebar item variant, per
//! category link variant, and for category metadata files.
//!
//! ## Shallow by construction
//!
//! Each schema checks only the fields of a single node. `category.items`
//! is declared as a bare array: the element shape is enforced by the
//! recursive validator, which applies the item schemas to every child.
//! The same holds for `link` on categories and metadata files, which is
//! dispatched on its own `type` tag.
//!
//! ## Closed records
//!
//! Every schema sets `additionalProperties: false`. Only `customProps`
//! is an open object. No schema declares `default`: absent fields stay
//! absent in the validated output.
//!
//! ## Diagnostics
//!
//! The engine may report several violations for one node. [`NodeSchema::check`]
//! keeps exactly one, by priority: missing field, then malformed field,
//! then unknown field. Field-level wording comes from a per-schema message
//! table (e.g. `"label" must be a string`) and falls back to the engine's
//! own message.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use serde_json::{json, Map, Value};
use url::Url;

use sidebars_core::{CategoryLinkKind, ItemKind, ItemPath, SidebarValidationError};

/// `autogenerated.dirName`: non-empty, no leading or trailing separator.
pub const DIR_NAME_PATTERN: &str = r"^[^/\\](?:.*[^/\\])?$";

/// Name of the custom format applied to `link.href`.
pub const HREF_FORMAT: &str = "href";

/// Base URL relative references are resolved against when checking `href`.
const HREF_BASE: &str = "https://localhost/";

/// Human-readable message replacing the engine's wording for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldMessage {
    pub field: &'static str,
    pub message: &'static str,
    /// Report as a shape mismatch rather than a malformed field.
    pub shape: bool,
}

const fn malformed(field: &'static str, message: &'static str) -> FieldMessage {
    FieldMessage { field, message, shape: false }
}

const fn shape(field: &'static str, message: &'static str) -> FieldMessage {
    FieldMessage { field, message, shape: true }
}

const BASE_MESSAGES: &[FieldMessage] = &[
    malformed("className", "\"className\" must be a string"),
    malformed("customProps", "\"customProps\" must be an object"),
];

const DOC_MESSAGES: &[FieldMessage] = &[
    malformed("id", "\"id\" must be a string"),
    malformed("label", "\"label\" must be a string"),
];

const LINK_MESSAGES: &[FieldMessage] = &[
    malformed("href", "\"href\" must be a valid URI reference"),
    malformed("label", "\"label\" must be a string"),
    malformed("autoAddBaseUrl", "\"autoAddBaseUrl\" must be a boolean"),
    malformed("description", "\"description\" must be a string"),
];

const AUTOGENERATED_MESSAGES: &[FieldMessage] = &[malformed(
    "dirName",
    "\"dirName\" must be a dir path relative to the docs folder root, and should not start or end with slash",
)];

const CATEGORY_MESSAGES: &[FieldMessage] = &[
    malformed("label", "\"label\" must be a string"),
    shape("items", "\"items\" must be an array"),
    malformed("link", "\"link\" must be an object or null"),
    malformed("collapsed", "\"collapsed\" must be a boolean"),
    malformed("collapsible", "\"collapsible\" must be a boolean"),
    malformed("description", "\"description\" must be a string"),
];

const LINK_DOC_MESSAGES: &[FieldMessage] = &[malformed("id", "\"id\" must be a string")];

const GENERATED_INDEX_MESSAGES: &[FieldMessage] = &[
    malformed("slug", "\"slug\" must be a string"),
    malformed("title", "\"title\" must be a string"),
    malformed("description", "\"description\" must be a string"),
    malformed("image", "\"image\" must be a string"),
    malformed("keywords", "\"keywords\" must be a string or an array of strings"),
];

const METADATA_MESSAGES: &[FieldMessage] = &[
    malformed("label", "\"label\" must be a string"),
    malformed("position", "\"position\" must be a number"),
    malformed("collapsed", "\"collapsed\" must be a boolean"),
    malformed("collapsible", "\"collapsible\" must be a boolean"),
    malformed("className", "\"className\" must be a string"),
    malformed("link", "\"link\" must be an object or null"),
    malformed("customProps", "\"customProps\" must be an object"),
];

/// A compiled schema for one node shape, with its message table.
pub struct NodeSchema {
    name: &'static str,
    definition: Value,
    validator: Validator,
    messages: Vec<FieldMessage>,
}

impl fmt::Debug for NodeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSchema")
            .field("name", &self.name)
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

impl NodeSchema {
    fn compile(
        name: &'static str,
        definition: Value,
        messages: Vec<FieldMessage>,
    ) -> Result<Self, SidebarValidationError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.with_format(HREF_FORMAT, is_valid_href);
        opts.should_validate_formats(true);

        let validator = opts
            .build(&definition)
            .map_err(|e| SidebarValidationError::SchemaBuild {
                schema: name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            name,
            definition,
            validator,
            messages,
        })
    }

    /// Registry name of this schema (e.g. `"category"`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The JSON Schema document this validator was compiled from.
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// Check a single node against this schema.
    ///
    /// `path` is the location of `instance` in the whole document; the
    /// returned error extends it with the engine's relative location.
    pub fn check(&self, instance: &Value, path: &ItemPath) -> Result<(), SidebarValidationError> {
        let mut selected: Option<(u8, SidebarValidationError)> = None;

        for error in self.validator.iter_errors(instance) {
            let candidate = self.classify(&error, path);
            let rank = priority(&candidate);
            if selected.as_ref().map_or(true, |(best, _)| rank < *best) {
                selected = Some((rank, candidate));
            }
        }

        match selected {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }

    fn message_for(&self, field: &str) -> Option<&FieldMessage> {
        self.messages.iter().find(|m| m.field == field)
    }

    fn classify(&self, error: &ValidationError<'_>, path: &ItemPath) -> SidebarValidationError {
        let pointer = error.instance_path.to_string();
        let location = path.join_pointer(&pointer);

        match &error.kind {
            ValidationErrorKind::Required { property } => SidebarValidationError::MissingField {
                path: location,
                field: property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string()),
            },
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                SidebarValidationError::UnknownField {
                    path: location,
                    field: unexpected.first().cloned().unwrap_or_default(),
                }
            }
            _ => {
                let field = top_level_field(&pointer);
                match self.message_for(&field) {
                    Some(m) if m.shape => SidebarValidationError::ShapeMismatch {
                        path: location,
                        message: m.message.to_string(),
                    },
                    Some(m) => SidebarValidationError::MalformedField {
                        path: location,
                        field,
                        value: error.instance.to_string(),
                        message: m.message.to_string(),
                    },
                    None => SidebarValidationError::MalformedField {
                        path: location,
                        field,
                        value: error.instance.to_string(),
                        message: error.to_string(),
                    },
                }
            }
        }
    }
}

fn priority(error: &SidebarValidationError) -> u8 {
    match error {
        SidebarValidationError::MissingField { .. } => 0,
        SidebarValidationError::MalformedField { .. }
        | SidebarValidationError::ShapeMismatch { .. } => 1,
        _ => 2,
    }
}

/// First segment of a JSON Pointer, unescaped.
fn top_level_field(pointer: &str) -> String {
    pointer
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .replace("~1", "/")
        .replace("~0", "~")
}

/// Whether `href` is a URI reference: an absolute URI that parses, or a
/// relative reference that resolves against a base.
pub fn is_valid_href(href: &str) -> bool {
    if href.is_empty() || href.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    if has_scheme(href) {
        Url::parse(href).is_ok()
    } else {
        Url::parse(HREF_BASE).and_then(|base| base.join(href)).is_ok()
    }
}

fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn base_properties() -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("className".into(), json!({"type": "string"}));
    props.insert("customProps".into(), json!({"type": "object"}));
    props
}

/// Closed object schema over `properties`, with `required` fields.
fn closed_object(properties: Map<String, Value>, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": required,
        "additionalProperties": false,
    })
}

/// Item schema: base fields, the `type` tag, and the variant's own fields.
fn item_schema(tag: Value, own: Value, required: &[&str]) -> Value {
    let mut props = base_properties();
    props.insert("type".into(), tag);
    if let Value::Object(own) = own {
        props.extend(own);
    }
    let mut all_required = vec!["type"];
    all_required.extend_from_slice(required);
    closed_object(props, &all_required)
}

fn with_base(messages: &[FieldMessage]) -> Vec<FieldMessage> {
    [BASE_MESSAGES, messages].concat()
}

fn doc_schema() -> Value {
    item_schema(
        json!({"enum": ["doc", "ref"]}),
        json!({
            "id": {"type": "string"},
            "label": {"type": "string"},
        }),
        &["id"],
    )
}

fn link_schema() -> Value {
    item_schema(
        json!({"const": "link"}),
        json!({
            "href": {"type": "string", "format": HREF_FORMAT},
            "label": {"type": "string"},
            "autoAddBaseUrl": {"type": "boolean"},
            "description": {"type": "string"},
        }),
        &["href", "label"],
    )
}

fn autogenerated_schema() -> Value {
    item_schema(
        json!({"const": "autogenerated"}),
        json!({
            "dirName": {"type": "string", "pattern": DIR_NAME_PATTERN},
        }),
        &["dirName"],
    )
}

fn category_schema() -> Value {
    item_schema(
        json!({"const": "category"}),
        json!({
            "label": {"type": "string"},
            "items": {"type": "array"},
            "link": {"type": ["object", "null"]},
            "collapsed": {"type": "boolean"},
            "collapsible": {"type": "boolean"},
            "description": {"type": "string"},
        }),
        &["label", "items"],
    )
}

fn category_link_doc_schema() -> Value {
    let mut props = Map::new();
    props.insert("type".into(), json!({"const": "doc"}));
    props.insert("id".into(), json!({"type": "string"}));
    closed_object(props, &["type", "id"])
}

fn category_link_generated_index_schema() -> Value {
    let mut props = Map::new();
    props.insert("type".into(), json!({"const": "generated-index"}));
    for field in ["slug", "title", "description", "image"] {
        props.insert(field.into(), json!({"type": "string"}));
    }
    props.insert(
        "keywords".into(),
        json!({
            "anyOf": [
                {"type": "string"},
                {"type": "array", "items": {"type": "string"}},
            ]
        }),
    );
    closed_object(props, &["type"])
}

fn category_metadata_schema() -> Value {
    let mut props = base_properties();
    props.insert("label".into(), json!({"type": "string"}));
    props.insert("position".into(), json!({"type": "number"}));
    props.insert("collapsed".into(), json!({"type": "boolean"}));
    props.insert("collapsible".into(), json!({"type": "boolean"}));
    props.insert("link".into(), json!({"type": ["object", "null"]}));
    closed_object(props, &[])
}

/// All compiled sidebar schemas.
///
/// Immutable after construction and `Send + Sync`; build once and share.
#[derive(Debug)]
pub struct SchemaRegistry {
    doc: NodeSchema,
    link: NodeSchema,
    autogenerated: NodeSchema,
    category: NodeSchema,
    category_link_doc: NodeSchema,
    category_link_generated_index: NodeSchema,
    category_metadata: NodeSchema,
}

impl SchemaRegistry {
    /// Compile every schema.
    ///
    /// # Errors
    ///
    /// Returns `SidebarValidationError::SchemaBuild` if a schema does not
    /// compile. This is a defect in the registry, not in user input.
    pub fn new() -> Result<Self, SidebarValidationError> {
        Ok(Self {
            doc: NodeSchema::compile("doc", doc_schema(), with_base(DOC_MESSAGES))?,
            link: NodeSchema::compile("link", link_schema(), with_base(LINK_MESSAGES))?,
            autogenerated: NodeSchema::compile(
                "autogenerated",
                autogenerated_schema(),
                with_base(AUTOGENERATED_MESSAGES),
            )?,
            category: NodeSchema::compile(
                "category",
                category_schema(),
                with_base(CATEGORY_MESSAGES),
            )?,
            category_link_doc: NodeSchema::compile(
                "category-link.doc",
                category_link_doc_schema(),
                LINK_DOC_MESSAGES.to_vec(),
            )?,
            category_link_generated_index: NodeSchema::compile(
                "category-link.generated-index",
                category_link_generated_index_schema(),
                GENERATED_INDEX_MESSAGES.to_vec(),
            )?,
            category_metadata: NodeSchema::compile(
                "category-metadata",
                category_metadata_schema(),
                METADATA_MESSAGES.to_vec(),
            )?,
        })
    }

    /// Schema for a sidebar item of the given kind. `doc` and `ref` share one.
    pub fn item_schema(&self, kind: ItemKind) -> &NodeSchema {
        match kind {
            ItemKind::Doc | ItemKind::Ref => &self.doc,
            ItemKind::Link => &self.link,
            ItemKind::Autogenerated => &self.autogenerated,
            ItemKind::Category => &self.category,
        }
    }

    /// Schema for a category link of the given kind.
    pub fn category_link_schema(&self, kind: CategoryLinkKind) -> &NodeSchema {
        match kind {
            CategoryLinkKind::Doc => &self.category_link_doc,
            CategoryLinkKind::GeneratedIndex => &self.category_link_generated_index,
        }
    }

    /// Schema for a per-directory category metadata file.
    pub fn category_metadata_schema(&self) -> &NodeSchema {
        &self.category_metadata
    }

    /// Every schema in the registry.
    pub fn schemas(&self) -> [&NodeSchema; 7] {
        [
            &self.doc,
            &self.link,
            &self.autogenerated,
            &self.category,
            &self.category_link_doc,
            &self.category_link_generated_index,
            &self.category_metadata,
        ]
    }
}
