//! Jinja template renderer backed by minijinja.
//!
//! Templates see the normalized configuration as top-level variables
//! (`name`, `fields`, `features`, ...). On top of the stock Jinja syntax the
//! environment registers:
//!
//! | Kind     | Name                                                      |
//! |----------|-----------------------------------------------------------|
//! | filter   | `plural`, `singular`, `camel`, `kebab`, `snake`, `pascal` |
//! | function | `has_feature(type)`                                       |
//! | function | `in_array(value, sequence)`                               |
//! | function | `get_model_traits()`, `get_model_parents()`               |
//!
//! Printing, iterating or indexing undefined data is an error, so a template
//! that reaches for data the configuration does not carry fails instead of
//! rendering blanks. Testing it (`{% if field.options %}`) is allowed and
//! yields false.

use minijinja::{Environment, Error, UndefinedBehavior, Value};
use tracing::trace;

use optimus_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{CaseStyle, RenderContext},
    error::{OptimusError, OptimusResult},
};

/// Name under which destination path templates are reported in errors.
const PATH_TEMPLATE_NAME: &str = "<destination>";

/// minijinja-backed [`TemplateRenderer`].
///
/// An environment is assembled per call from the context, so the case
/// filters share the run's memoizing converter and the helpers answer for
/// the run's configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct JinjaRenderer;

impl JinjaRenderer {
    pub fn new() -> Self {
        Self
    }

    fn environment(context: &RenderContext) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::SemiStrict);

        for style in CaseStyle::ALL {
            let cases = context.cases().clone();
            env.add_filter(style.filter_name(), move |text: String| -> String {
                cases.convert(style, &text)
            });
        }

        let ctx = context.clone();
        env.add_function("has_feature", move |kind: String| -> bool {
            ctx.has_feature(&kind)
        });
        env.add_function("in_array", in_array);

        let traits = context.model_traits();
        env.add_function("get_model_traits", move || -> String { traits.clone() });
        let parents = context.model_parents();
        env.add_function("get_model_parents", move || -> String { parents.clone() });

        env
    }
}

impl TemplateRenderer for JinjaRenderer {
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> OptimusResult<String> {
        trace!(template = name, "Rendering body");
        Self::environment(context)
            .render_named_str(name, source, context.data())
            .map_err(|e| rendering_failed(name, &e))
    }

    fn render_path(&self, template: &str, context: &RenderContext) -> OptimusResult<String> {
        Self::environment(context)
            .render_named_str(PATH_TEMPLATE_NAME, template, context.path_data())
            .map_err(|e| rendering_failed(template, &e))
    }
}

/// `in_array(value, sequence)`: membership by value equality.
fn in_array(value: Value, sequence: Value) -> Result<bool, Error> {
    for item in sequence.try_iter()? {
        if item == value {
            return Ok(true);
        }
    }
    Ok(false)
}

fn rendering_failed(template: &str, e: &Error) -> OptimusError {
    let mut reason = e.to_string();
    if let Some(detail) = e.detail() {
        if !reason.contains(detail) {
            reason = format!("{reason} ({detail})");
        }
    }
    ApplicationError::RenderingFailed {
        template: template.to_string(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use optimus_core::domain::{Configuration, GeneratorKind, normalize_document};
    use serde_json::json;

    fn context(document: serde_json::Value) -> RenderContext {
        let config: Configuration = normalize_document(GeneratorKind::Module, &document).unwrap();
        RenderContext::new(config).with_timestamp("2024_05_06_070809")
    }

    fn render(source: &str, ctx: &RenderContext) -> OptimusResult<String> {
        JinjaRenderer::new().render("test.j2", source, ctx)
    }

    #[test]
    fn case_filters_chain_left_to_right() {
        let ctx = context(json!({"name": "blog post"}));
        assert_eq!(
            render("{{ name | plural | pascal }}", &ctx).unwrap(),
            "blogposts"
        );
        assert_eq!(render("{{ name | plural | kebab }}", &ctx).unwrap(), "blog-posts");
        assert_eq!(render("{{ name | snake }}", &ctx).unwrap(), "blog_post");
        assert_eq!(render("{{ name | camel }}", &ctx).unwrap(), "blogPost");
        assert_eq!(render("{{ name | plural | singular }}", &ctx).unwrap(), "blog post");
    }

    #[test]
    fn filters_share_the_context_cache() {
        let ctx = context(json!({"name": "post"}));
        render("{{ name | kebab }}{{ name | kebab }}", &ctx).unwrap();
        assert_eq!(ctx.cases().cached_len(), 1);
    }

    #[test]
    fn has_feature_and_model_helpers() {
        let ctx = context(json!({
            "name": "post",
            "features": [
                {"type": "sort"},
                {"type": "menu", "options": {
                    "url_field": "slug",
                    "label_field": "title",
                    "search_query_field": "title"
                }}
            ]
        }));

        let source = "{% if has_feature('sort') %}sorted{% endif %}\
                      {% if has_feature('media') %}media{% endif %}\
                      {% if has_feature('nonsense') %}x{% endif %}";
        assert_eq!(render(source, &ctx).unwrap(), "sorted");
        assert_eq!(
            render("{{ get_model_traits() }}|{{ get_model_parents() }}", &ctx).unwrap(),
            "LinkableTrait,SortableTrait|Linkable,SynchronisesMenuItemUrls,Sortable"
        );
    }

    #[test]
    fn in_array_uses_value_equality() {
        let ctx = context(json!({"name": "post"}));
        assert_eq!(
            render("{{ in_array('b', ['a', 'b']) }} {{ in_array(3, [1, 2]) }}", &ctx).unwrap(),
            "true false"
        );
        assert!(render("{{ in_array('a', 1) }}", &ctx).is_err());
    }

    #[test]
    fn loops_over_fields() {
        let ctx = context(json!({
            "name": "post",
            "fields": [
                {"name": "title", "type": "text"},
                {"name": "body", "type": "editor", "label": "Content"}
            ]
        }));
        let source = "{% for field in fields %}\n{{ field.name }}={{ field.label }};\n{% endfor %}\n";
        assert_eq!(render(source, &ctx).unwrap(), "title=title;\nbody=Content;\n");
    }

    #[test]
    fn optional_attributes_can_be_tested() {
        let ctx = context(json!({
            "name": "post",
            "fields": [
                {"name": "title", "type": "text"},
                {"name": "cover", "type": "media", "options": {"media_group": "covers"}}
            ]
        }));
        let source = "{% for field in fields %}\
                      {% if field.options %}{{ field.options.media_group }}{% else %}{{ field.name }}{% endif %};\
                      {% endfor %}";
        assert_eq!(render(source, &ctx).unwrap(), "title;covers;");
    }

    #[test]
    fn field_extras_reach_templates() {
        let ctx = context(json!({
            "name": "post",
            "fields": [{"name": "title", "type": "text", "placeholder": "Your title"}]
        }));
        assert_eq!(
            render("{{ fields[0].placeholder }}", &ctx).unwrap(),
            "Your title"
        );
    }

    #[test]
    fn undefined_data_is_an_error() {
        let ctx = context(json!({"name": "post"}));
        assert!(render("{% for x in missing %}{% endfor %}", &ctx).is_err());
        assert!(render("{{ missing.attribute }}", &ctx).is_err());
        let err = render("{{ missing }}", &ctx).unwrap_err();
        assert!(matches!(
            err,
            OptimusError::Application(ApplicationError::RenderingFailed { ref template, .. })
                if template == "test.j2"
        ));
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let ctx = context(json!({"name": "post"}));
        assert!(render("{{ name | shout }}", &ctx).is_err());
    }

    #[test]
    fn timestamp_is_only_visible_to_paths() {
        let ctx = context(json!({"name": "post"}));
        let renderer = JinjaRenderer::new();
        assert_eq!(
            renderer
                .render_path("{{ timestamp }}_create_{{ name | plural | snake }}_table.php", &ctx)
                .unwrap(),
            "2024_05_06_070809_create_posts_table.php"
        );
        assert!(render("{{ timestamp }}", &ctx).is_err());
    }

    #[test]
    fn rendering_is_deterministic() {
        let ctx = context(json!({"name": "news item", "features": [{"type": "draft"}]}));
        let source = "{{ name | plural | pascal }} {{ get_model_traits() }}";
        assert_eq!(render(source, &ctx).unwrap(), render(source, &ctx).unwrap());
    }
}
