//! Domain value objects: GeneratorKind, FieldKind, FeatureKind.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO capability logic. Trait/parent tables and the declared file
//! sets live in `capabilities.rs`. This file's only job is to define the
//! types, their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. The compiler then points at every `match` in `validation.rs` and
//!    `defaults.rs` that has to learn about it
//! 4. Add a capability entry in `capabilities.rs` if the variant maps to
//!    model traits or parents

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── GeneratorKind ────────────────────────────────────────────────────────────

/// Which generator a run uses. Discriminates the schema, the defaults, and
/// the declared file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// A CRUD resource: backend model/controller/resource/migration plus
    /// frontend routes and views.
    Module,
    /// A single content-page type with its own field set.
    Page,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 2] = [Self::Module, Self::Page];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Page => "page",
        }
    }

    /// The top-level key the input document must carry.
    pub const fn identifier_key(&self) -> &'static str {
        match self {
            Self::Module => "name",
            Self::Page => "id",
        }
    }

    /// Whether documents of this kind may declare `features`.
    pub const fn supports_features(&self) -> bool {
        matches!(self, Self::Module)
    }

    /// Directory under the templates root holding this kind's sources.
    ///
    /// Delegates to `capabilities::find_generator`.
    pub fn template_subdirectory(self) -> &'static str {
        crate::domain::capabilities::find_generator(self).subdirectory
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "module" | "generate:module" => Ok(Self::Module),
            "page" | "page-template" | "generate:page" => Ok(Self::Page),
            other => Err(DomainError::UnknownGenerator(other.to_string())),
        }
    }
}

// ── FieldKind ─────────────────────────────────────────────────────────────────

/// The `type` of a scaffolded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Editor,
    Date,
    Media,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        Self::Text,
        Self::Textarea,
        Self::Editor,
        Self::Date,
        Self::Media,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Editor => "editor",
            Self::Date => "date",
            Self::Media => "media",
        }
    }

    /// Whether a field of this kind carries an `options` object.
    pub const fn requires_options(self) -> bool {
        matches!(self, Self::Media)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = DomainError;

    /// Exact match only: the schema enum is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownFieldType(s.to_string()))
    }
}

// ── FeatureKind ───────────────────────────────────────────────────────────────

/// The `type` of a module feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Sort,
    Slug,
    Seo,
    Media,
    Draft,
    Menu,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 6] = [
        Self::Sort,
        Self::Slug,
        Self::Seo,
        Self::Media,
        Self::Draft,
        Self::Menu,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sort => "sort",
            Self::Slug => "slug",
            Self::Seo => "seo",
            Self::Media => "media",
            Self::Draft => "draft",
            Self::Menu => "menu",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownFeatureType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_kind_parses_original_command_names() {
        assert_eq!(
            GeneratorKind::from_str("generate:module").unwrap(),
            GeneratorKind::Module
        );
        assert_eq!(GeneratorKind::from_str("PAGE").unwrap(), GeneratorKind::Page);
        assert!(GeneratorKind::from_str("widget").is_err());
    }

    #[test]
    fn field_kind_is_case_sensitive() {
        assert_eq!(FieldKind::from_str("media").unwrap(), FieldKind::Media);
        assert!(matches!(
            FieldKind::from_str("Media"),
            Err(DomainError::UnknownFieldType(_))
        ));
    }

    #[test]
    fn every_kind_round_trips_through_as_str() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::from_str(kind.as_str()).unwrap(), kind);
        }
        for kind in FeatureKind::ALL {
            assert_eq!(FeatureKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn only_media_fields_require_options() {
        let with_options: Vec<_> = FieldKind::ALL
            .into_iter()
            .filter(|k| k.requires_options())
            .collect();
        assert_eq!(with_options, vec![FieldKind::Media]);
    }

    #[test]
    fn identifier_key_per_kind() {
        assert_eq!(GeneratorKind::Module.identifier_key(), "name");
        assert_eq!(GeneratorKind::Page.identifier_key(), "id");
        assert!(!GeneratorKind::Page.supports_features());
    }
}
