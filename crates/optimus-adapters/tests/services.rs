//! File side effects of the application services over the in-memory adapters.

use std::path::Path;

use serde_json::json;

use optimus_adapters::{InMemoryStore, JinjaRenderer, MemoryFilesystem};
use optimus_core::{
    application::{
        ApplicationError, EmitOutcome, FileEmitter, GeneratorService, MarkerInjector,
        ports::Filesystem,
    },
    domain::{DomainError, FileOutcome, GeneratorKind},
    error::OptimusError,
};

const ROUTES: &str = "<?php\n\nRoute::get('/', Home::class);\n/*--OPTIMUS-CLI:routes--*/\n";

// ── FileEmitter ──────────────────────────────────────────────────────────────

#[test]
fn emit_creates_parent_directories() {
    let fs = MemoryFilesystem::new();
    let outcome = FileEmitter::new(&fs)
        .emit_new(Path::new("/project/app/Models/Post.php"), "<?php")
        .unwrap();

    assert_eq!(outcome, EmitOutcome::Written);
    assert!(fs.is_dir(Path::new("/project/app/Models")));
    assert_eq!(fs.read_file("/project/app/Models/Post.php").as_deref(), Some("<?php"));
}

#[test]
fn second_emit_is_skipped_and_keeps_first_content() {
    let fs = MemoryFilesystem::new();
    let emitter = FileEmitter::new(&fs);
    let path = Path::new("/project/a.txt");

    assert_eq!(emitter.emit_new(path, "first").unwrap(), EmitOutcome::Written);
    let second = emitter.emit_new(path, "second").unwrap();

    assert!(matches!(second, EmitOutcome::Skipped { .. }));
    assert_eq!(fs.read_file("/project/a.txt").as_deref(), Some("first"));
    assert_eq!(fs.write_count(), 1);
}

// ── MarkerInjector ───────────────────────────────────────────────────────────

#[test]
fn inject_replaces_the_marker_only() {
    let fs = MemoryFilesystem::new().with_file("/p/routes/admin.php", ROUTES);
    MarkerInjector::new(&fs)
        .inject(
            Path::new("/p/routes/admin.php"),
            "routes",
            "Route::apiResource('posts', PostsController::class);",
        )
        .unwrap();

    let patched = fs.read_file("/p/routes/admin.php").unwrap();
    assert_eq!(
        patched,
        "<?php\n\nRoute::get('/', Home::class);\nRoute::apiResource('posts', PostsController::class);\n"
    );
    assert!(!patched.contains("OPTIMUS-CLI:routes"));
}

#[test]
fn inject_reports_missing_directory_first() {
    let fs = MemoryFilesystem::new();
    let err = MarkerInjector::new(&fs)
        .inject(Path::new("/p/routes/admin.php"), "routes", "x")
        .unwrap_err();
    assert_eq!(
        err,
        OptimusError::Application(ApplicationError::MissingDestinationDirectory {
            path: "/p/routes".into()
        })
    );
}

#[test]
fn inject_reports_missing_file() {
    let fs = MemoryFilesystem::new().with_dir("/p/routes");
    let err = MarkerInjector::new(&fs)
        .inject(Path::new("/p/routes/admin.php"), "routes", "x")
        .unwrap_err();
    assert!(matches!(
        err,
        OptimusError::Application(ApplicationError::MissingDestinationFile { .. })
    ));
}

#[test]
fn reinjection_reports_marker_not_found_and_keeps_bytes() {
    let fs = MemoryFilesystem::new().with_file("/p/routes/admin.php", ROUTES);
    let injector = MarkerInjector::new(&fs);
    let path = Path::new("/p/routes/admin.php");

    injector.inject(path, "routes", "A").unwrap();
    let after_first = fs.read_file(path);

    let err = injector.inject(path, "routes", "B").unwrap_err();
    assert_eq!(
        err,
        OptimusError::Domain(DomainError::MarkerNotFound {
            tag: "routes".into()
        })
    );
    assert_eq!(fs.read_file(path), after_first);
}

#[test]
fn duplicate_marker_leaves_file_unchanged() {
    let text = "/*--OPTIMUS-CLI:routes--*/\n<!--OPTIMUS-CLI:routes-->\n";
    let fs = MemoryFilesystem::new().with_file("/p/x.vue", text);
    let err = MarkerInjector::new(&fs)
        .inject(Path::new("/p/x.vue"), "routes", "X")
        .unwrap_err();
    assert!(matches!(
        err,
        OptimusError::Domain(DomainError::DuplicateMarker { occurrences: 2, .. })
    ));
    assert_eq!(fs.read_file("/p/x.vue").as_deref(), Some(text));
    assert_eq!(fs.write_count(), 0);
}

// ── GeneratorService ─────────────────────────────────────────────────────────

fn echo_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    for kind in GeneratorKind::ALL {
        for source in kind.sources() {
            store
                .insert(kind, source, format!("// {source} for {{{{ name }}}}"))
                .unwrap();
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
    .with_timestamp("2024_05_06_070809")
}

#[test]
fn rerun_fails_consumed_markers() {
    let fs = MemoryFilesystem::new().with_file(
        "/p/app/Providers/OptimusServiceProvider.php",
        "/*--OPTIMUS-CLI:imports--*/\n/*--OPTIMUS-CLI:page-templates--*/\n",
    );
    let service = service(echo_store(), &fs);
    let doc = json!({"id": "home"});

    let first = service.run(GeneratorKind::Page, &doc, Path::new("/p")).unwrap();
    assert_eq!(first.summary().patched, 2);

    let second = service.run(GeneratorKind::Page, &doc, Path::new("/p")).unwrap();
    let summary = second.summary();
    assert_eq!((summary.skipped, summary.failed), (2, 2));
    assert!(matches!(
        &second.outcomes[2],
        FileOutcome::Failed { reason, .. } if reason.contains("imports")
    ));
}

#[test]
fn template_status_reports_missing_sources() {
    let store = InMemoryStore::new();
    for source in GeneratorKind::Page.sources() {
        if source != "front/Form.vue.j2" {
            store.insert(GeneratorKind::Page, source, "x").unwrap();
        }
    }

    let status = service(store, &MemoryFilesystem::new()).template_status(GeneratorKind::Page);
    assert_eq!(status.len(), 4);
    let missing: Vec<_> = status.iter().filter(|s| !s.available).collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].source, "front/Form.vue.j2");
}
