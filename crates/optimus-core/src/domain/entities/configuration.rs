//! The normalized configuration: the sole data context of a generation run.
//!
//! Every optional attribute has been filled in by `DefaultsMerger`, so
//! templates can rely on each key below being present. The serialized form
//! of a [`Configuration`] is itself a valid input document, which is what
//! makes normalization idempotent.
//!
//! ```text
//! Configuration
//! ├── name, id?            identifiers
//! ├── fields[]             Field { name, label, rules, show_on_admin_index?, type (+options), ... }
//! ├── features[]           Feature { type, options { ... } }  (module only)
//! └── ...                  any extra top-level keys, passed through untouched
//! ```
//!
//! Keys the schema does not know are kept at every level that accepts them
//! (top level, fields, field and feature options) and serialized back in
//! place, so templates see the user's data as written.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::{FeatureKind, FieldKind};

/// Default column for the sort feature.
pub const DEFAULT_ORDER_COLUMN: &str = "order";

/// Default column for the draft feature.
pub const DEFAULT_PUBLISHED_AT_COLUMN: &str = "published_at";

// ── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    /// Resource name (module) or display name (page).
    pub name: String,

    /// Page identifier. Modules may carry one as plain data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default)]
    pub features: Vec<Feature>,

    /// Unrecognised top-level keys, visible to templates as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Configuration {
    /// True iff some feature has the given type.
    pub fn has_feature(&self, kind: FeatureKind) -> bool {
        self.features.iter().any(|f| f.kind() == kind)
    }

    /// First feature of the given type.
    pub fn feature(&self, kind: FeatureKind) -> Option<&Feature> {
        self.features.iter().find(|f| f.kind() == kind)
    }

    /// Feature types in declaration order, duplicates included.
    pub fn feature_kinds(&self) -> Vec<FeatureKind> {
        self.features.iter().map(Feature::kind).collect()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The configuration as template data.
    pub fn to_value(&self) -> Value {
        // Every map key is a String and every leaf a JSON scalar, so
        // serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub label: String,

    #[serde(default)]
    pub rules: Rules,

    /// Always set for modules, never defaulted for pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_on_admin_index: Option<bool>,

    /// `type` and, for media fields, `options`.
    #[serde(flatten)]
    pub field_type: FieldType,

    /// Unrecognised field keys, e.g. `placeholder`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        self.field_type.kind()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub nullable: bool,
}

/// Field type, carrying options exactly when the type needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Editor,
    Date,
    Media { options: MediaFieldOptions },
}

impl FieldType {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text => FieldKind::Text,
            Self::Textarea => FieldKind::Textarea,
            Self::Editor => FieldKind::Editor,
            Self::Date => FieldKind::Date,
            Self::Media { .. } => FieldKind::Media,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFieldOptions {
    pub media_group: String,
    #[serde(default)]
    pub conversions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Feature ───────────────────────────────────────────────────────────────────

/// A module feature with its fully-defaulted options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum Feature {
    Sort(SortOptions),
    Slug(SlugOptions),
    Seo(SeoOptions),
    Media(MediaOptions),
    Draft(DraftOptions),
    Menu(MenuOptions),
}

impl Feature {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Sort(_) => FeatureKind::Sort,
            Self::Slug(_) => FeatureKind::Slug,
            Self::Seo(_) => FeatureKind::Seo,
            Self::Media(_) => FeatureKind::Media,
            Self::Draft(_) => FeatureKind::Draft,
            Self::Menu(_) => FeatureKind::Menu,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub order_column_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            order_column_name: DEFAULT_ORDER_COLUMN.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugOptions {
    pub generate_from_field: String,
    pub save_to_field: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Seo has no options of its own; serializes as `{}` plus any extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoOptions {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaOptions {
    pub media_groups: Vec<MediaGroup>,
    #[serde(default)]
    pub conversions: Vec<Conversion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaGroup {
    pub name: String,
    #[serde(default)]
    pub conversions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image conversion registered by the media feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub name: String,
    pub width: i64,
    pub height: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOptions {
    pub published_at_column_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for DraftOptions {
    fn default() -> Self {
        Self {
            published_at_column_name: DEFAULT_PUBLISHED_AT_COLUMN.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOptions {
    pub url_field: String,
    pub label_field: String,
    pub search_query_field: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Configuration {
        Configuration {
            name: "blog post".into(),
            id: None,
            fields: vec![Field {
                name: "cover".into(),
                label: "Cover".into(),
                rules: Rules::default(),
                show_on_admin_index: Some(false),
                field_type: FieldType::Media {
                    options: MediaFieldOptions {
                        media_group: "covers".into(),
                        conversions: vec![],
                        extra: Map::new(),
                    },
                },
                extra: Map::new(),
            }],
            features: vec![
                Feature::Sort(SortOptions::default()),
                Feature::Seo(SeoOptions::default()),
            ],
            extra: Map::new(),
        }
    }

    #[test]
    fn serializes_in_input_document_shape() {
        let value = sample().to_value();
        assert_eq!(value["fields"][0]["type"], "media");
        assert_eq!(value["fields"][0]["options"]["media_group"], "covers");
        assert_eq!(
            value["features"][0],
            json!({"type": "sort", "options": {"order_column_name": "order"}})
        );
        assert_eq!(value["features"][1], json!({"type": "seo", "options": {}}));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn has_feature_checks_types() {
        let config = sample();
        assert!(config.has_feature(FeatureKind::Sort));
        assert!(!config.has_feature(FeatureKind::Draft));
        assert_eq!(
            config.feature_kinds(),
            vec![FeatureKind::Sort, FeatureKind::Seo]
        );
    }

    #[test]
    fn extra_keys_are_flattened() {
        let mut config = sample();
        config.extra.insert("icon".into(), json!("newspaper"));
        assert_eq!(config.to_value()["icon"], "newspaper");
    }

    #[test]
    fn nested_extras_serialize_in_place() {
        let mut config = sample();
        config.fields[0].extra.insert("placeholder".into(), json!("Pick one"));
        if let Feature::Sort(options) = &mut config.features[0] {
            options.extra.insert("direction".into(), json!("desc"));
        }

        let value = config.to_value();
        assert_eq!(value["fields"][0]["placeholder"], "Pick one");
        assert_eq!(value["fields"][0]["type"], "media");
        assert_eq!(
            value["features"][0]["options"],
            json!({"order_column_name": "order", "direction": "desc"})
        );
    }

    #[test]
    fn field_lookup_by_name() {
        let config = sample();
        assert_eq!(config.field("cover").map(Field::kind), Some(FieldKind::Media));
        assert!(config.field("missing").is_none());
    }
}
