//! In-memory template store.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use optimus_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::GeneratorKind,
    error::OptimusResult,
};

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<(GeneratorKind, String), String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_template(
        self,
        kind: GeneratorKind,
        source: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        // A poisoned lock only happens after a panic elsewhere; the builder
        // then returns the store unchanged.
        let _ = self.insert(kind, source, text);
        self
    }

    /// Add or replace one source.
    pub fn insert(
        &self,
        kind: GeneratorKind,
        source: impl Into<String>,
        text: impl Into<String>,
    ) -> OptimusResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert((kind, source.into()), text.into());
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn load(&self, kind: GeneratorKind, source: &str) -> OptimusResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .get(&(kind, source.to_string()))
            .cloned()
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    path: self.locate(kind, source).into(),
                }
                .into()
            })
    }

    fn contains(&self, kind: GeneratorKind, source: &str) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(&(kind, source.to_string())))
            .unwrap_or(false)
    }

    fn locate(&self, kind: GeneratorKind, source: &str) -> String {
        format!("memory:{}/{}", kind.template_subdirectory(), source)
    }

    fn list(&self, kind: GeneratorKind) -> OptimusResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut sources: Vec<String> = inner
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, source)| source.clone())
            .collect();
        sources.sort();
        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_load() {
        let store = InMemoryStore::new()
            .with_template(GeneratorKind::Page, "back/Template.php.j2", "page")
            .with_template(GeneratorKind::Module, "back/Template.php.j2", "module");

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.load(GeneratorKind::Page, "back/Template.php.j2").unwrap(),
            "page"
        );
        assert_eq!(store.list(GeneratorKind::Module).unwrap(), vec!["back/Template.php.j2"]);
    }

    #[test]
    fn missing_source_reports_its_location() {
        let err = InMemoryStore::new()
            .load(GeneratorKind::Module, "back/Model.php.j2")
            .unwrap_err();
        assert!(err.to_string().contains("memory:module/back/Model.php.j2"));
    }
}
