//! Template store reading sources from a directory tree.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── module/
//! │   ├── back/
//! │   │   ├── Model.php.j2
//! │   │   └── dynamic/
//! │   │       └── Routes.php.j2
//! │   └── front/
//! │       └── Index.vue.j2
//! └── page/
//!     ├── back/Template.php.j2
//!     └── front/Form.vue.j2
//! ```
//!
//! Each generator reads from its own subdirectory; a source such as
//! `back/Model.php.j2` is resolved relative to it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use optimus_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::GeneratorKind,
    error::OptimusResult,
};

/// Extension every template source carries.
const TEMPLATE_EXTENSION: &str = "j2";

/// [`TemplateStore`] over a templates root on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
}

impl DirectoryTemplateStore {
    /// Create a store rooted at `root`. The directory does not need to exist
    /// yet; lookups against a missing root report `TemplateNotFound`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of one source.
    pub fn path_of(&self, kind: GeneratorKind, source: &str) -> PathBuf {
        self.root.join(kind.template_subdirectory()).join(source)
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn load(&self, kind: GeneratorKind, source: &str) -> OptimusResult<String> {
        let path = self.path_of(kind, source);
        debug!(path = %path.display(), "Loading template");

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::TemplateNotFound { path }.into(),
            _ => ApplicationError::FilesystemError {
                path,
                reason: format!("Failed to read template: {e}"),
            }
            .into(),
        })
    }

    fn contains(&self, kind: GeneratorKind, source: &str) -> bool {
        self.path_of(kind, source).is_file()
    }

    fn locate(&self, kind: GeneratorKind, source: &str) -> String {
        self.path_of(kind, source).display().to_string()
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self, kind: GeneratorKind) -> OptimusResult<Vec<String>> {
        let dir = self.root.join(kind.template_subdirectory());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut sources = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: dir.clone(),
                reason: format!("directory walk error: {e}"),
            })?;

            if !entry.file_type().is_file()
                || entry.path().extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }

            if let Ok(relative) = entry.path().strip_prefix(&dir) {
                sources.push(normalize_path(relative));
            }
        }

        sources.sort();
        debug!(count = sources.len(), "Listed templates");
        Ok(sources)
    }
}

/// Relative path with forward slashes on every platform.
fn normalize_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use optimus_core::error::OptimusError;

    fn seeded() -> (tempfile::TempDir, DirectoryTemplateStore) {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page");
        fs::create_dir_all(page.join("back")).unwrap();
        fs::create_dir_all(page.join("front")).unwrap();
        fs::write(page.join("back/Template.php.j2"), "<?php // {{ name }}").unwrap();
        fs::write(page.join("front/Form.vue.j2"), "<template/>").unwrap();
        fs::write(page.join("README.md"), "not a template").unwrap();

        let store = DirectoryTemplateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn loads_relative_to_generator_subdirectory() {
        let (_dir, store) = seeded();
        assert_eq!(
            store.load(GeneratorKind::Page, "back/Template.php.j2").unwrap(),
            "<?php // {{ name }}"
        );
        assert!(store.contains(GeneratorKind::Page, "front/Form.vue.j2"));
        assert!(!store.contains(GeneratorKind::Module, "front/Form.vue.j2"));
    }

    #[test]
    fn missing_source_is_template_not_found() {
        let (_dir, store) = seeded();
        let err = store.load(GeneratorKind::Module, "back/Model.php.j2").unwrap_err();
        assert_eq!(
            err,
            OptimusError::Application(ApplicationError::TemplateNotFound {
                path: store.path_of(GeneratorKind::Module, "back/Model.php.j2"),
            })
        );
    }

    #[test]
    fn list_returns_sorted_template_sources() {
        let (_dir, store) = seeded();
        assert_eq!(
            store.list(GeneratorKind::Page).unwrap(),
            vec!["back/Template.php.j2".to_string(), "front/Form.vue.j2".to_string()]
        );
        assert!(store.list(GeneratorKind::Module).unwrap().is_empty());
    }
}
