//! End-to-end generation runs through the real adapters.

use std::{fs, path::Path};

use serde_json::json;

use optimus_adapters::{
    DirectoryTemplateStore, InMemoryStore, JinjaRenderer, LocalFilesystem, MemoryFilesystem,
};
use optimus_core::{
    application::{ApplicationError, GeneratorService},
    domain::{DomainError, FileOutcome, GeneratorKind},
    error::OptimusError,
};

const TIMESTAMP: &str = "2024_05_06_070809";

const PROVIDER: &str = "app/Providers/OptimusServiceProvider.php";
const PROVIDER_TEXT: &str = "<?php\n\
use App\\Models\\Page;\n\
/*--OPTIMUS-CLI:imports--*/\n\
\n\
class OptimusServiceProvider\n\
{\n\
    protected $linkableTypes = [\n\
        /*--OPTIMUS-CLI:linkable-types--*/\n\
    ];\n\
    protected $mediaConversions = [\n\
        /*--OPTIMUS-CLI:media-conversions--*/\n\
    ];\n\
    protected $pageTemplates = [\n\
        /*--OPTIMUS-CLI:page-templates--*/\n\
    ];\n\
}\n";

/// A store holding a small template for every declared source.
fn store() -> InMemoryStore {
    let store = InMemoryStore::new();
    for kind in GeneratorKind::ALL {
        for source in kind.sources() {
            let text = match (kind, source) {
                (GeneratorKind::Module, "back/Model.php.j2") => {
                    "class {{ name | singular | pascal }} implements {{ get_model_parents() }}\n{\n    use {{ get_model_traits() }};\n{% for field in fields %}\n    // {{ field.name }}: {{ field.type }}\n{% endfor %}\n}\n"
                }
                (GeneratorKind::Module, "back/dynamic/Routes.php.j2") => {
                    "Route::apiResource('{{ name | plural | kebab }}', {{ name | plural | pascal }}Controller::class);"
                }
                (GeneratorKind::Page, "back/Template.php.j2") => {
                    "class {{ name | pascal }}Template {}\n"
                }
                (GeneratorKind::Page, "back/dynamic/OptimusPageTemplates.php.j2") => {
                    "{{ name | pascal }}Template::class,\n        /*--OPTIMUS-CLI:page-templates--*/"
                }
                _ => "// {{ name }}\n",
            };
            store.insert(kind, source, text).unwrap();
        }
    }
    store
}

fn service(store: InMemoryStore, fs: &MemoryFilesystem) -> GeneratorService {
    GeneratorService::new(
        Box::new(store),
        Box::new(JinjaRenderer::new()),
        Box::new(fs.clone()),
    )
    .with_timestamp(TIMESTAMP)
}

fn project() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file(Path::new("/p").join(PROVIDER), PROVIDER_TEXT)
        .with_file("/p/routes/admin.php", "<?php\n/*--OPTIMUS-CLI:routes--*/\n")
        .with_file(
            "/p/resources/js/back/components/ui/Dashboard.vue",
            "<nav>\n<!--OPTIMUS-CLI:navigation-->\n</nav>\n",
        )
        .with_file(
            "/p/resources/js/back/router/index.js",
            "/*--OPTIMUS-CLI:imports--*/\nconst routes = [\n/*--OPTIMUS-CLI:routes--*/\n];\n",
        )
}

#[test]
fn page_about_us_renders_pascal_paths() {
    let fs = project();
    let report = service(store(), &fs)
        .run(GeneratorKind::Page, &json!({"id": "about-us"}), Path::new("/p"))
        .unwrap();

    assert!(!report.has_failures(), "{:?}", report.outcomes);
    assert_eq!(
        fs.read_file("/p/app/PageTemplates/AboutUsTemplate.php").as_deref(),
        Some("class AboutUsTemplate {}")
    );
    assert!(
        fs.read_file("/p/resources/js/back/modules/pages/views/templates/AboutUs.vue")
            .is_some()
    );

    // The re-emitted marker keeps the provider open for the next page.
    let provider = fs.read_file(Path::new("/p").join(PROVIDER)).unwrap();
    assert!(provider.contains("AboutUsTemplate::class,\n        /*--OPTIMUS-CLI:page-templates--*/"));
    assert!(!provider.contains("/*--OPTIMUS-CLI:imports--*/"));
}

#[test]
fn module_run_patches_every_marker() {
    let fs = project();
    let report = service(store(), &fs)
        .run(
            GeneratorKind::Module,
            &json!({
                "name": "Blog Post",
                "fields": [{"name": "title", "type": "text"}],
                "features": [{"type": "sort"}, {"type": "draft"}]
            }),
            Path::new("/p"),
        )
        .unwrap();

    let summary = report.summary();
    assert_eq!((summary.written, summary.patched, summary.failed), (10, 7, 0));

    assert_eq!(
        fs.read_file("/p/app/Models/BlogPost.php").as_deref(),
        Some(
            "class BlogPost implements Sortable\n{\n    use Draftable,SortableTrait;\n    // title: text\n}"
        )
    );
    assert_eq!(
        fs.read_file("/p/routes/admin.php").as_deref(),
        Some("<?php\nRoute::apiResource('blog-posts', BlogPostsController::class);\n")
    );
    assert!(
        fs.read_file("/p/resources/js/back/modules/blog-posts/views/partials/Form.vue")
            .is_some()
    );
}

#[test]
fn migration_path_embeds_the_run_timestamp() {
    let fs = project();
    let report = service(store(), &fs)
        .run(GeneratorKind::Module, &json!({"name": "Blog Post"}), Path::new("/p"))
        .unwrap();

    let expected = format!("database/migrations/{TIMESTAMP}_create_blog_posts_table.php");
    assert!(report.outcomes.iter().any(|o| o.path() == Path::new(&expected)));
    assert!(fs.read_file(Path::new("/p").join(&expected)).is_some());
}

#[test]
fn schema_failure_performs_zero_writes() {
    let fs = project();
    let err = service(store(), &fs)
        .run(
            GeneratorKind::Module,
            &json!({"name": "post", "fields": [{"name": "x", "type": "colour"}]}),
            Path::new("/p"),
        )
        .unwrap_err();

    assert!(matches!(err, OptimusError::Domain(DomainError::Schema(_))));
    assert_eq!(fs.write_count(), 0);
}

#[test]
fn broken_marker_does_not_stop_later_markers() {
    let fs = MemoryFilesystem::new()
        .with_file(Path::new("/p").join(PROVIDER), PROVIDER_TEXT)
        .with_file(
            "/p/resources/js/back/components/ui/Dashboard.vue",
            "<!--OPTIMUS-CLI:navigation-->",
        )
        .with_file(
            "/p/resources/js/back/router/index.js",
            "/*--OPTIMUS-CLI:imports--*/\n/*--OPTIMUS-CLI:routes--*/\n",
        );

    let report = service(store(), &fs)
        .run(GeneratorKind::Module, &json!({"name": "post"}), Path::new("/p"))
        .unwrap();

    let failed: Vec<&FileOutcome> = report.outcomes.iter().filter(|o| o.is_failure()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].path(), Path::new("routes/admin.php"));
    assert_eq!(report.summary().patched, 6);
}

#[test]
fn rerun_skips_existing_files() {
    let fs = project();
    let service = service(store(), &fs);
    let doc = json!({"id": "home"});

    service.run(GeneratorKind::Page, &doc, Path::new("/p")).unwrap();
    let before = fs.read_file("/p/app/PageTemplates/HomeTemplate.php");

    let second = service.run(GeneratorKind::Page, &doc, Path::new("/p")).unwrap();
    assert_eq!(second.summary().skipped, 2);
    assert_eq!(fs.read_file("/p/app/PageTemplates/HomeTemplate.php"), before);
}

#[test]
fn template_error_fails_only_that_file() {
    let fs = project();
    let store = store()
        .with_template(GeneratorKind::Page, "front/Form.vue.j2", "{{ name | shout }}");

    let report = service(store, &fs)
        .run(GeneratorKind::Page, &json!({"id": "home"}), Path::new("/p"))
        .unwrap();

    assert!(matches!(
        &report.outcomes[1],
        FileOutcome::Failed { reason, .. } if reason.contains("front/Form.vue.j2")
    ));
    assert_eq!(report.summary().written, 1);
    assert_eq!(report.summary().patched, 2);
}

#[test]
fn destinations_outside_the_project_fail() {
    let fs = project();
    let report = service(store(), &fs)
        .run(
            GeneratorKind::Page,
            &json!({"id": "evil", "name": "../../../Evil"}),
            Path::new("/p"),
        )
        .unwrap();

    for outcome in &report.outcomes[..2] {
        assert!(matches!(
            outcome,
            FileOutcome::Failed { reason, .. } if reason.contains("escapes the project root")
        ));
    }
    assert_eq!(report.summary().patched, 2);
    assert!(fs.list_files().iter().all(|path| !path.to_string_lossy().contains("Evil")));
}

#[test]
fn missing_template_source_is_reported() {
    let fs = project();
    let report = service(InMemoryStore::new(), &fs)
        .run(GeneratorKind::Page, &json!({"id": "home"}), Path::new("/p"))
        .unwrap();

    assert_eq!(report.summary().failed, 4);
    assert!(report.outcomes[0].to_string().contains("Template not found"));
}

#[test]
fn directory_store_and_local_filesystem() {
    let templates = tempfile::tempdir().unwrap();
    let page = templates.path().join("page");
    fs::create_dir_all(page.join("back/dynamic")).unwrap();
    fs::create_dir_all(page.join("front")).unwrap();
    fs::write(page.join("back/Template.php.j2"), "<?php // {{ name }}\n").unwrap();
    fs::write(page.join("front/Form.vue.j2"), "<template>{{ id }}</template>\n").unwrap();
    fs::write(page.join("back/dynamic/OptimusImports.php.j2"), "use App\\PageTemplates\\{{ name | pascal }}Template;").unwrap();
    fs::write(
        page.join("back/dynamic/OptimusPageTemplates.php.j2"),
        "{{ name | pascal }}Template::class,",
    )
    .unwrap();

    let project = tempfile::tempdir().unwrap();
    fs::create_dir_all(project.path().join("app/Providers")).unwrap();
    fs::write(project.path().join(PROVIDER), PROVIDER_TEXT).unwrap();

    let service = GeneratorService::new(
        Box::new(DirectoryTemplateStore::new(templates.path())),
        Box::new(JinjaRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let report = service
        .run(GeneratorKind::Page, &json!({"id": "faq_page"}), project.path())
        .unwrap();

    assert!(!report.has_failures(), "{:?}", report.outcomes);
    assert_eq!(
        fs::read_to_string(project.path().join("app/PageTemplates/FaqPageTemplate.php")).unwrap(),
        "<?php // Faq Page"
    );
    let provider = fs::read_to_string(project.path().join(PROVIDER)).unwrap();
    assert!(provider.contains("use App\\PageTemplates\\FaqPageTemplate;"));
    assert!(provider.contains("FaqPageTemplate::class,"));
}

#[test]
fn unreadable_input_and_bad_json() {
    let fs = MemoryFilesystem::new().with_file("/cfg/bad.json", "{ nope");
    let service = service(store(), &fs);

    let missing = service
        .run_file(GeneratorKind::Page, Path::new("/cfg/none.json"), Path::new("/p"))
        .unwrap_err();
    assert!(matches!(
        missing,
        OptimusError::Application(ApplicationError::InputNotFound { .. })
    ));

    let bad = service
        .run_file(GeneratorKind::Page, Path::new("/cfg/bad.json"), Path::new("/p"))
        .unwrap_err();
    assert!(matches!(
        bad,
        OptimusError::Application(ApplicationError::InputParseError { .. })
    ));
}
