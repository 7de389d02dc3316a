//! Generator and feature capability registries.
//!
//! # Design Rationale
//!
//! Everything a template needs to know about a feature beyond its options
//! (which model trait it pulls in, which parent interfaces the model
//! implements) and everything a generator declares (its template
//! subdirectory, the files it creates, the markers it fills) is described
//! exactly once here. Lookups are table scans over a handful of entries.
//!
//! # Adding a New Feature
//!
//! 1. Add a variant to `FeatureKind` in `value_objects.rs`
//! 2. Handle it in the `match`es of `validation.rs` and `defaults.rs`
//!    (the compiler will point at them)
//! 3. Add one [`FeatureDef`] entry to [`FEATURE_REGISTRY`]

use crate::domain::entities::generator::{MarkerSpec, TemplateSpec};
use crate::domain::value_objects::{FeatureKind, GeneratorKind};

/// Separator used when joining trait and parent names for templates.
pub const MIXIN_SEPARATOR: &str = ",";

// ── Feature definitions ───────────────────────────────────────────────────────

/// Model mixins contributed by one feature.
#[derive(Debug, Clone, Copy)]
pub struct FeatureDef {
    pub kind: FeatureKind,

    /// Trait the generated model uses when the feature is present.
    pub model_trait: &'static str,

    /// Interfaces the generated model implements when the feature is present.
    pub model_parents: &'static [&'static str],
}

/// Single source of truth for feature mixins.
///
/// Ordering IS semantic: `get_model_traits()` and `get_model_parents()` list
/// names in registry order.
pub static FEATURE_REGISTRY: &[FeatureDef] = &[
    FeatureDef {
        kind: FeatureKind::Draft,
        model_trait: "Draftable",
        model_parents: &[],
    },
    FeatureDef {
        kind: FeatureKind::Slug,
        model_trait: "HasSlug",
        model_parents: &[],
    },
    FeatureDef {
        kind: FeatureKind::Media,
        model_trait: "HasMedia",
        model_parents: &[],
    },
    FeatureDef {
        kind: FeatureKind::Seo,
        model_trait: "HasSeoFields",
        model_parents: &[],
    },
    FeatureDef {
        kind: FeatureKind::Menu,
        model_trait: "LinkableTrait",
        model_parents: &["Linkable", "SynchronisesMenuItemUrls"],
    },
    FeatureDef {
        kind: FeatureKind::Sort,
        model_trait: "SortableTrait",
        model_parents: &["Sortable"],
    },
];

/// Traits for a model whose configuration has the given features, joined
/// with [`MIXIN_SEPARATOR`]. Duplicated features contribute once.
pub fn model_traits(present: &[FeatureKind]) -> String {
    FEATURE_REGISTRY
        .iter()
        .filter(|def| present.contains(&def.kind))
        .map(|def| def.model_trait)
        .collect::<Vec<_>>()
        .join(MIXIN_SEPARATOR)
}

/// Parent interfaces for a model with the given features, joined with
/// [`MIXIN_SEPARATOR`].
pub fn model_parents(present: &[FeatureKind]) -> String {
    FEATURE_REGISTRY
        .iter()
        .filter(|def| present.contains(&def.kind))
        .flat_map(|def| def.model_parents.iter().copied())
        .collect::<Vec<_>>()
        .join(MIXIN_SEPARATOR)
}

// ── Generator definitions ─────────────────────────────────────────────────────

/// The declared file set of one generator.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorDef {
    pub kind: GeneratorKind,

    /// Directory under the templates root holding this generator's sources.
    pub subdirectory: &'static str,

    pub templates: &'static [TemplateSpec],
    pub markers: &'static [MarkerSpec],
}

const SERVICE_PROVIDER: &str = "app/Providers/OptimusServiceProvider.php";
const ROUTER: &str = "resources/js/back/router/index.js";

pub static MODULE_GENERATOR: GeneratorDef = GeneratorDef {
    kind: GeneratorKind::Module,
    subdirectory: "module",
    templates: &[
        TemplateSpec::new(
            "back/Controller.php.j2",
            "app/Http/Controllers/Back/Api/{{ name | plural | pascal }}Controller.php",
        ),
        TemplateSpec::new(
            "back/Model.php.j2",
            "app/Models/{{ name | singular | pascal }}.php",
        ),
        TemplateSpec::new(
            "back/Resource.php.j2",
            "app/Http/Resources/{{ name | singular | pascal }}Resource.php",
        ),
        TemplateSpec::new(
            "back/Migration.php.j2",
            "database/migrations/{{ timestamp }}_create_{{ name | plural | snake }}_table.php",
        ),
        TemplateSpec::new(
            "front/api.js.j2",
            "resources/js/back/modules/{{ name | plural | kebab }}/routes/api.js",
        ),
        TemplateSpec::new(
            "front/app.js.j2",
            "resources/js/back/modules/{{ name | plural | kebab }}/routes/app.js",
        ),
        TemplateSpec::new(
            "front/Create.vue.j2",
            "resources/js/back/modules/{{ name | plural | kebab }}/views/Create.vue",
        ),
        TemplateSpec::new(
            "front/Edit.vue.j2",
            "resources/js/back/modules/{{ name | plural | kebab }}/views/Edit.vue",
        ),
        TemplateSpec::new(
            "front/Index.vue.j2",
            "resources/js/back/modules/{{ name | plural | kebab }}/views/Index.vue",
        ),
        TemplateSpec::new(
            "front/Form.vue.j2",
            "resources/js/back/modules/{{ name | plural | kebab }}/views/partials/Form.vue",
        ),
    ],
    markers: &[
        MarkerSpec::new("back/dynamic/Routes.php.j2", "routes", "routes/admin.php"),
        MarkerSpec::new(
            "back/dynamic/OptimusImports.php.j2",
            "imports",
            SERVICE_PROVIDER,
        ),
        MarkerSpec::new(
            "back/dynamic/OptimusLinkableTypes.php.j2",
            "linkable-types",
            SERVICE_PROVIDER,
        ),
        MarkerSpec::new(
            "back/dynamic/OptimusMediaConversions.php.j2",
            "media-conversions",
            SERVICE_PROVIDER,
        ),
        MarkerSpec::new(
            "front/dynamic/Dashboard.vue.j2",
            "navigation",
            "resources/js/back/components/ui/Dashboard.vue",
        ),
        MarkerSpec::new("front/dynamic/RouterImports.js.j2", "imports", ROUTER),
        MarkerSpec::new("front/dynamic/RouterRoutes.js.j2", "routes", ROUTER),
    ],
};

pub static PAGE_GENERATOR: GeneratorDef = GeneratorDef {
    kind: GeneratorKind::Page,
    subdirectory: "page",
    templates: &[
        TemplateSpec::new(
            "back/Template.php.j2",
            "app/PageTemplates/{{ name | pascal }}Template.php",
        ),
        TemplateSpec::new(
            "front/Form.vue.j2",
            "resources/js/back/modules/pages/views/templates/{{ name | pascal }}.vue",
        ),
    ],
    markers: &[
        MarkerSpec::new(
            "back/dynamic/OptimusImports.php.j2",
            "imports",
            SERVICE_PROVIDER,
        ),
        MarkerSpec::new(
            "back/dynamic/OptimusPageTemplates.php.j2",
            "page-templates",
            SERVICE_PROVIDER,
        ),
    ],
};

pub static GENERATOR_REGISTRY: &[&GeneratorDef] = &[&MODULE_GENERATOR, &PAGE_GENERATOR];

/// The definition for a generator kind. Every kind is registered.
pub fn find_generator(kind: GeneratorKind) -> &'static GeneratorDef {
    match kind {
        GeneratorKind::Module => &MODULE_GENERATOR,
        GeneratorKind::Page => &PAGE_GENERATOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::marker::is_valid_tag;
    use std::path::Path;

    #[test]
    fn assert_registry_integrity() {
        for kind in FeatureKind::ALL {
            let count = FEATURE_REGISTRY.iter().filter(|d| d.kind == kind).count();
            assert_eq!(count, 1, "{kind} must be registered exactly once");
        }

        for def in GENERATOR_REGISTRY {
            assert!(std::ptr::eq(find_generator(def.kind), *def));
            for spec in def.templates {
                assert!(spec.source.ends_with(".j2"), "{spec}");
                assert!(!Path::new(spec.destination).is_absolute(), "{spec}");
            }
            for spec in def.markers {
                assert!(is_valid_tag(spec.tag), "{spec}");
                assert!(!Path::new(spec.destination).is_absolute(), "{spec}");
            }
        }
    }

    #[test]
    fn traits_follow_registry_order() {
        let present = [FeatureKind::Sort, FeatureKind::Draft, FeatureKind::Seo];
        assert_eq!(model_traits(&present), "Draftable,HasSeoFields,SortableTrait");
    }

    #[test]
    fn parents_for_menu_and_sort() {
        let present = [FeatureKind::Sort, FeatureKind::Menu];
        assert_eq!(
            model_parents(&present),
            "Linkable,SynchronisesMenuItemUrls,Sortable"
        );
        assert_eq!(model_parents(&[FeatureKind::Slug]), "");
    }

    #[test]
    fn no_features_means_no_mixins() {
        assert_eq!(model_traits(&[]), "");
        assert_eq!(model_parents(&[]), "");
    }

    #[test]
    fn subdirectories() {
        assert_eq!(GeneratorKind::Module.template_subdirectory(), "module");
        assert_eq!(GeneratorKind::Page.template_subdirectory(), "page");
    }
}
