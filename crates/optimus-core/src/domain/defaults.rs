//! Default filling: [`ValidatedDocument`] → [`Configuration`].

use crate::domain::{
    case,
    entities::configuration::{
        Configuration, DEFAULT_ORDER_COLUMN, DEFAULT_PUBLISHED_AT_COLUMN, DraftOptions, Feature,
        Field, FieldType, MediaFieldOptions, MediaGroup, MediaOptions, Rules, SortOptions,
    },
    validation::{RawFeature, RawField, RawFieldType, ValidatedDocument},
    value_objects::GeneratorKind,
};

/// Fills every omitted optional attribute with its canonical default.
///
/// | Attribute                              | Default                      |
/// |----------------------------------------|------------------------------|
/// | `fields`, `features`                   | `[]`                         |
/// | `name` (page)                          | title-cased `id`             |
/// | `fields[].label`                       | the field's `name`           |
/// | `fields[].rules.required` / `nullable` | `false`                      |
/// | `fields[].show_on_admin_index` (module)| `false`                      |
/// | media field `options.conversions`      | `[]`                         |
/// | sort `order_column_name`               | `"order"`                    |
/// | draft `published_at_column_name`       | `"published_at"`             |
/// | media `conversions`, group `conversions` | `[]`                       |
/// | seo `options`                          | `{}`                         |
///
/// Keys the schema does not know are copied through unchanged.
///
/// Normalizing is idempotent: serializing a normalized configuration and
/// running it through validation and normalization again yields an equal
/// configuration.
pub struct DefaultsMerger;

impl DefaultsMerger {
    /// Build the normalized configuration. The document is not modified.
    pub fn normalize(document: &ValidatedDocument) -> Configuration {
        let kind = document.kind;

        let name = match (&document.name, &document.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => case::title(id),
            (None, None) => String::new(),
        };

        Configuration {
            name,
            id: document.id.clone(),
            fields: document
                .fields
                .iter()
                .map(|field| Self::field(kind, field))
                .collect(),
            features: document.features.iter().map(Self::feature).collect(),
            extra: document.extra.clone(),
        }
    }

    fn field(kind: GeneratorKind, raw: &RawField) -> Field {
        let show_on_admin_index = match kind {
            GeneratorKind::Module => Some(raw.show_on_admin_index.unwrap_or(false)),
            GeneratorKind::Page => raw.show_on_admin_index,
        };

        let field_type = match &raw.field_type {
            RawFieldType::Text => FieldType::Text,
            RawFieldType::Textarea => FieldType::Textarea,
            RawFieldType::Editor => FieldType::Editor,
            RawFieldType::Date => FieldType::Date,
            RawFieldType::Media { options } => FieldType::Media {
                options: MediaFieldOptions {
                    media_group: options.media_group.clone(),
                    conversions: options.conversions.clone().unwrap_or_default(),
                    extra: options.extra.clone(),
                },
            },
        };

        Field {
            name: raw.name.clone(),
            label: raw.label.clone().unwrap_or_else(|| raw.name.clone()),
            rules: Rules {
                required: raw.rules.required.unwrap_or(false),
                nullable: raw.rules.nullable.unwrap_or(false),
            },
            show_on_admin_index,
            field_type,
            extra: raw.extra.clone(),
        }
    }

    fn feature(raw: &RawFeature) -> Feature {
        match raw {
            RawFeature::Sort(options) => Feature::Sort(SortOptions {
                order_column_name: options
                    .order_column_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ORDER_COLUMN.to_string()),
                extra: options.extra.clone(),
            }),
            RawFeature::Slug(options) => Feature::Slug(options.clone()),
            RawFeature::Seo(options) => Feature::Seo(options.clone()),
            RawFeature::Media(options) => Feature::Media(MediaOptions {
                media_groups: options
                    .media_groups
                    .iter()
                    .map(|group| MediaGroup {
                        name: group.name.clone(),
                        conversions: group.conversions.clone().unwrap_or_default(),
                        extra: group.extra.clone(),
                    })
                    .collect(),
                conversions: options.conversions.clone().unwrap_or_default(),
                extra: options.extra.clone(),
            }),
            RawFeature::Draft(options) => Feature::Draft(DraftOptions {
                published_at_column_name: options
                    .published_at_column_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PUBLISHED_AT_COLUMN.to_string()),
                extra: options.extra.clone(),
            }),
            RawFeature::Menu(options) => Feature::Menu(options.clone()),
        }
    }
}
