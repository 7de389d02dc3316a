//! Schema validation of raw configuration documents.
//!
//! [`SchemaValidator::validate`] is the only way to obtain a
//! [`ValidatedDocument`], and `DefaultsMerger::normalize` only accepts one,
//! so an unvalidated document can never reach the renderer.
//!
//! Validation walks the whole document and reports every violation it
//! finds, ordered by [`SchemaCheck`] precedence:
//!
//! 1. required top-level key (`name` for modules, `id` for pages)
//! 2. field `type` is a known field type
//! 3. media fields carry `options.media_group`
//! 4. feature `type` is a known feature type
//! 5. per-feature required option keys
//! 6. everything else (attribute types, item shapes, reserved keys)

use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{
    entities::{
        configuration::{Conversion, MenuOptions, SeoOptions, SlugOptions},
        render_context::TIMESTAMP_VARIABLE,
    },
    error::{DomainError, SchemaCheck, SchemaError, SchemaViolation},
    value_objects::{FeatureKind, FieldKind, GeneratorKind},
};

/// Validates raw input documents for one generator kind.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Check `document` against the schema of `kind`.
    ///
    /// Pure: no I/O, `document` is not modified.
    ///
    /// # Errors
    /// `DomainError::Schema` with every violated constraint.
    pub fn validate(kind: GeneratorKind, document: &Value) -> Result<ValidatedDocument, DomainError> {
        let Some(root) = document.as_object() else {
            return Err(SchemaError::new(vec![SchemaViolation::new(
                SchemaCheck::RequiredKey,
                "",
                format!(
                    "configuration must be a JSON object, found {}",
                    type_name(document)
                ),
            )])
            .into());
        };

        let mut checker = Checker::default();
        checker.root(kind, root);
        if !checker.violations.is_empty() {
            return Err(SchemaError::new(checker.violations).into());
        }

        typed(kind, document)
            .map_err(|e| SchemaError::new(vec![SchemaViolation::new(SchemaCheck::AttributeType, "", e.to_string())]).into())
    }
}

/// A document that passed [`SchemaValidator::validate`], in typed form.
///
/// Optional attributes are still optional here; filling them in is the
/// job of `DefaultsMerger`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDocument {
    pub(crate) kind: GeneratorKind,
    pub(crate) name: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) fields: Vec<RawField>,
    pub(crate) features: Vec<RawFeature>,
    pub(crate) extra: Map<String, Value>,
}

impl ValidatedDocument {
    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    /// The value of the kind's required identifier key.
    pub fn identifier(&self) -> &str {
        let identifier = match self.kind {
            GeneratorKind::Module => &self.name,
            GeneratorKind::Page => &self.id,
        };
        identifier.as_deref().unwrap_or_default()
    }
}

// ── Typed input shapes ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    fields: Vec<RawFieldEntry>,
    #[serde(default)]
    features: Vec<RawFeatureEntry>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawFieldEntry {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    rules: RawRules,
    #[serde(default)]
    show_on_admin_index: Option<bool>,
    #[serde(rename = "type")]
    kind: FieldKind,
    #[serde(default)]
    options: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawField {
    pub(crate) name: String,
    pub(crate) label: Option<String>,
    pub(crate) rules: RawRules,
    pub(crate) show_on_admin_index: Option<bool>,
    pub(crate) field_type: RawFieldType,
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct RawRules {
    #[serde(default)]
    pub(crate) required: Option<bool>,
    #[serde(default)]
    pub(crate) nullable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawFieldType {
    Text,
    Textarea,
    Editor,
    Date,
    Media { options: RawMediaFieldOptions },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct RawMediaFieldOptions {
    pub(crate) media_group: String,
    #[serde(default)]
    pub(crate) conversions: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeatureEntry {
    #[serde(rename = "type")]
    kind: FeatureKind,
    #[serde(default)]
    options: Option<Value>,
}

/// A feature whose options have the shape of its type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawFeature {
    Sort(RawSortOptions),
    Slug(SlugOptions),
    Seo(SeoOptions),
    Media(RawMediaOptions),
    Draft(RawDraftOptions),
    Menu(MenuOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct RawSortOptions {
    #[serde(default)]
    pub(crate) order_column_name: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct RawMediaOptions {
    pub(crate) media_groups: Vec<RawMediaGroup>,
    #[serde(default)]
    pub(crate) conversions: Option<Vec<Conversion>>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct RawMediaGroup {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) conversions: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct RawDraftOptions {
    #[serde(default)]
    pub(crate) published_at_column_name: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

fn typed(kind: GeneratorKind, document: &Value) -> Result<ValidatedDocument, serde_json::Error> {
    let raw: RawDocument = serde_json::from_value(document.clone())?;
    let fields = raw
        .fields
        .into_iter()
        .map(typed_field)
        .collect::<Result<Vec<_>, _>>()?;
    let features = raw
        .features
        .into_iter()
        .map(typed_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedDocument {
        kind,
        name: raw.name,
        id: raw.id,
        fields,
        features,
        extra: raw.extra,
    })
}

fn typed_field(entry: RawFieldEntry) -> Result<RawField, serde_json::Error> {
    let field_type = match entry.kind {
        FieldKind::Text => RawFieldType::Text,
        FieldKind::Textarea => RawFieldType::Textarea,
        FieldKind::Editor => RawFieldType::Editor,
        FieldKind::Date => RawFieldType::Date,
        FieldKind::Media => RawFieldType::Media {
            options: serde_json::from_value(entry.options.unwrap_or(Value::Null))?,
        },
    };

    Ok(RawField {
        name: entry.name,
        label: entry.label,
        rules: entry.rules,
        show_on_admin_index: entry.show_on_admin_index,
        field_type,
        extra: entry.extra,
    })
}

fn typed_feature(entry: RawFeatureEntry) -> Result<RawFeature, serde_json::Error> {
    let options = entry.options.unwrap_or_else(|| Value::Object(Map::new()));
    Ok(match entry.kind {
        FeatureKind::Sort => RawFeature::Sort(serde_json::from_value(options)?),
        FeatureKind::Slug => RawFeature::Slug(serde_json::from_value(options)?),
        FeatureKind::Seo => RawFeature::Seo(serde_json::from_value(options)?),
        FeatureKind::Media => RawFeature::Media(serde_json::from_value(options)?),
        FeatureKind::Draft => RawFeature::Draft(serde_json::from_value(options)?),
        FeatureKind::Menu => RawFeature::Menu(serde_json::from_value(options)?),
    })
}

// ── Checks ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Presence {
    /// Absence is reported under the given check.
    Required(SchemaCheck),
    Optional,
}

#[derive(Debug, Default)]
struct Checker {
    violations: Vec<SchemaViolation>,
}

impl Checker {
    fn push(&mut self, check: SchemaCheck, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(SchemaViolation::new(check, path, message));
    }

    fn root(&mut self, kind: GeneratorKind, root: &Map<String, Value>) {
        for key in ["name", "id"] {
            let presence = if key == kind.identifier_key() {
                Presence::Required(SchemaCheck::RequiredKey)
            } else {
                Presence::Optional
            };
            self.string(root, key, "", presence);
        }

        if root.contains_key(TIMESTAMP_VARIABLE) {
            self.push(
                SchemaCheck::AttributeType,
                TIMESTAMP_VARIABLE,
                format!("'{TIMESTAMP_VARIABLE}' is reserved for destination paths"),
            );
        }

        self.fields(root.get("fields"));
        self.features(kind, root.get("features"));
    }

    fn fields(&mut self, value: Option<&Value>) {
        let Some(value) = value else { return };
        let Some(items) = value.as_array() else {
            self.push(
                SchemaCheck::AttributeType,
                "fields",
                format!("must be an array, found {}", type_name(value)),
            );
            return;
        };

        for (i, item) in items.iter().enumerate() {
            let path = format!("fields[{i}]");
            let Some(field) = item.as_object() else {
                self.push(
                    SchemaCheck::AttributeType,
                    path,
                    format!("must be an object, found {}", type_name(item)),
                );
                continue;
            };

            self.string(field, "name", &path, Presence::Required(SchemaCheck::RequiredKey));
            self.string(field, "label", &path, Presence::Optional);
            self.boolean(field, "show_on_admin_index", &path);
            self.rules(field.get("rules"), &path);

            match self.field_kind(field, &path) {
                Some(FieldKind::Media) => self.media_field_options(field.get("options"), &path),
                Some(FieldKind::Text | FieldKind::Textarea | FieldKind::Editor | FieldKind::Date) => {
                    if field.contains_key("options") {
                        self.push(
                            SchemaCheck::AttributeType,
                            join(&path, "options"),
                            "only media fields take options",
                        );
                    }
                }
                None => {}
            }
        }
    }

    fn field_kind(&mut self, field: &Map<String, Value>, path: &str) -> Option<FieldKind> {
        let at = join(path, "type");
        match field.get("type") {
            None => {
                self.push(SchemaCheck::FieldType, path, "missing required key 'type'");
                None
            }
            Some(Value::String(s)) => match FieldKind::from_str(s) {
                Ok(kind) => Some(kind),
                Err(e) => {
                    self.push(
                        SchemaCheck::FieldType,
                        at,
                        format!("{e}, expected one of: text, textarea, editor, date, media"),
                    );
                    None
                }
            },
            Some(other) => {
                self.push(
                    SchemaCheck::FieldType,
                    at,
                    format!("must be a string, found {}", type_name(other)),
                );
                None
            }
        }
    }

    fn rules(&mut self, value: Option<&Value>, path: &str) {
        let at = join(path, "rules");
        match value {
            None => {}
            Some(Value::Object(rules)) => {
                self.boolean(rules, "required", &at);
                self.boolean(rules, "nullable", &at);
            }
            Some(other) => self.push(
                SchemaCheck::AttributeType,
                at,
                format!("must be an object, found {}", type_name(other)),
            ),
        }
    }

    fn media_field_options(&mut self, value: Option<&Value>, path: &str) {
        let at = join(path, "options");
        match value {
            Some(Value::Object(options)) => {
                self.string(
                    options,
                    "media_group",
                    &at,
                    Presence::Required(SchemaCheck::FieldOptions),
                );
                self.string_list(options, "conversions", &at);
            }
            None => self.push(
                SchemaCheck::FieldOptions,
                path,
                "media fields require 'options' with a 'media_group'",
            ),
            Some(other) => self.push(
                SchemaCheck::FieldOptions,
                at,
                format!("must be an object, found {}", type_name(other)),
            ),
        }
    }

    fn features(&mut self, kind: GeneratorKind, value: Option<&Value>) {
        let Some(value) = value else { return };
        let Some(items) = value.as_array() else {
            self.push(
                SchemaCheck::AttributeType,
                "features",
                format!("must be an array, found {}", type_name(value)),
            );
            return;
        };

        if !kind.supports_features() {
            if !items.is_empty() {
                self.push(
                    SchemaCheck::AttributeType,
                    "features",
                    format!("{kind} configurations do not support features"),
                );
            }
            return;
        }

        let no_options = Map::new();
        for (i, item) in items.iter().enumerate() {
            let path = format!("features[{i}]");
            let Some(feature) = item.as_object() else {
                self.push(
                    SchemaCheck::AttributeType,
                    path,
                    format!("must be an object, found {}", type_name(item)),
                );
                continue;
            };

            let Some(feature_kind) = self.feature_kind(feature, &path) else {
                continue;
            };

            let at = join(&path, "options");
            let options = match feature.get("options") {
                None => &no_options,
                Some(Value::Object(options)) => options,
                Some(other) => {
                    self.push(
                        SchemaCheck::AttributeType,
                        at,
                        format!("must be an object, found {}", type_name(other)),
                    );
                    continue;
                }
            };

            let required = Presence::Required(SchemaCheck::FeatureOptions);
            match feature_kind {
                FeatureKind::Sort => {
                    self.string(options, "order_column_name", &at, Presence::Optional);
                }
                FeatureKind::Slug => {
                    self.string(options, "generate_from_field", &at, required);
                    self.string(options, "save_to_field", &at, required);
                }
                FeatureKind::Seo => {}
                FeatureKind::Media => self.media_feature_options(options, &at),
                FeatureKind::Draft => {
                    self.string(options, "published_at_column_name", &at, Presence::Optional);
                }
                FeatureKind::Menu => {
                    self.string(options, "url_field", &at, required);
                    self.string(options, "label_field", &at, required);
                    self.string(options, "search_query_field", &at, required);
                }
            }
        }
    }

    fn feature_kind(&mut self, feature: &Map<String, Value>, path: &str) -> Option<FeatureKind> {
        let at = join(path, "type");
        match feature.get("type") {
            None => {
                self.push(SchemaCheck::FeatureType, path, "missing required key 'type'");
                None
            }
            Some(Value::String(s)) => match FeatureKind::from_str(s) {
                Ok(kind) => Some(kind),
                Err(e) => {
                    self.push(
                        SchemaCheck::FeatureType,
                        at,
                        format!("{e}, expected one of: sort, slug, seo, media, draft, menu"),
                    );
                    None
                }
            },
            Some(other) => {
                self.push(
                    SchemaCheck::FeatureType,
                    at,
                    format!("must be a string, found {}", type_name(other)),
                );
                None
            }
        }
    }

    fn media_feature_options(&mut self, options: &Map<String, Value>, path: &str) {
        let groups_at = join(path, "media_groups");
        match options.get("media_groups") {
            None => self.push(
                SchemaCheck::FeatureOptions,
                path,
                "missing required key 'media_groups'",
            ),
            Some(Value::Array(groups)) => {
                for (j, group) in groups.iter().enumerate() {
                    let at = format!("{groups_at}[{j}]");
                    match group.as_object() {
                        Some(group) => {
                            self.string(
                                group,
                                "name",
                                &at,
                                Presence::Required(SchemaCheck::FeatureOptions),
                            );
                            self.string_list(group, "conversions", &at);
                        }
                        None => self.push(
                            SchemaCheck::AttributeType,
                            at,
                            format!("must be an object, found {}", type_name(group)),
                        ),
                    }
                }
            }
            Some(other) => self.push(
                SchemaCheck::AttributeType,
                groups_at,
                format!("must be an array, found {}", type_name(other)),
            ),
        }

        let conversions_at = join(path, "conversions");
        match options.get("conversions") {
            None => {}
            Some(Value::Array(conversions)) => {
                for (j, conversion) in conversions.iter().enumerate() {
                    let at = format!("{conversions_at}[{j}]");
                    match conversion.as_object() {
                        Some(conversion) => {
                            let required = Presence::Required(SchemaCheck::AttributeType);
                            self.string(conversion, "name", &at, required);
                            self.integer(conversion, "width", &at);
                            self.integer(conversion, "height", &at);
                        }
                        None => self.push(
                            SchemaCheck::AttributeType,
                            at,
                            format!("must be an object, found {}", type_name(conversion)),
                        ),
                    }
                }
            }
            Some(other) => self.push(
                SchemaCheck::AttributeType,
                conversions_at,
                format!("must be an array, found {}", type_name(other)),
            ),
        }
    }

    // ── Leaf checks ──

    fn string(&mut self, obj: &Map<String, Value>, key: &str, path: &str, presence: Presence) {
        match (obj.get(key), presence) {
            (Some(Value::String(_)), _) => {}
            (Some(other), _) => self.push(
                SchemaCheck::AttributeType,
                join(path, key),
                format!("must be a string, found {}", type_name(other)),
            ),
            (None, Presence::Required(check)) => {
                self.push(check, path, format!("missing required key '{key}'"));
            }
            (None, Presence::Optional) => {}
        }
    }

    fn boolean(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        match obj.get(key) {
            None | Some(Value::Bool(_)) => {}
            Some(other) => self.push(
                SchemaCheck::AttributeType,
                join(path, key),
                format!("must be a boolean, found {}", type_name(other)),
            ),
        }
    }

    fn integer(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        match obj.get(key) {
            Some(value) if value.as_i64().is_some() => {}
            Some(other) => self.push(
                SchemaCheck::AttributeType,
                join(path, key),
                format!("must be an integer, found {}", type_name(other)),
            ),
            None => self.push(
                SchemaCheck::AttributeType,
                path,
                format!("missing required key '{key}'"),
            ),
        }
    }

    fn string_list(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        let at = join(path, key);
        match obj.get(key) {
            None => {}
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.push(
                            SchemaCheck::AttributeType,
                            format!("{at}[{i}]"),
                            format!("must be a string, found {}", type_name(item)),
                        );
                    }
                }
            }
            Some(other) => self.push(
                SchemaCheck::AttributeType,
                at,
                format!("must be an array, found {}", type_name(other)),
            ),
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
