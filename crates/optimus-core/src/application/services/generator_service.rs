//! Generator Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Validate and normalize the input document (fatal on failure, no I/O)
//! 2. For each declared template: render path and body, emit a new file
//! 3. For each declared marker: render path and body, inject into an existing file
//! 4. Return the per-file report
//!
//! Steps 2 and 3 never abort the run: a failing entry is recorded and the
//! next one is processed. Writes of earlier entries are not rolled back.

use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
        services::{EmitOutcome, FileEmitter, MarkerInjector},
    },
    domain::{
        Configuration, FileOutcome, GeneratorKind, MarkerSpec, RenderContext, RunReport,
        TemplateSpec, normalize_document,
    },
    error::{OptimusError, OptimusResult},
};

/// Availability of one declared template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStatus {
    pub source: &'static str,
    pub location: String,
    pub available: bool,
}

/// Main generation service.
pub struct GeneratorService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    timestamp: Option<String>,
}

impl GeneratorService {
    /// Create a new generator service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use optimus_core::application::GeneratorService;
    ///
    /// let service = GeneratorService::new(
    ///     Box::new(store),      // impl TemplateStore
    ///     Box::new(renderer),   // impl TemplateRenderer
    ///     Box::new(filesystem), // impl Filesystem
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            timestamp: None,
        }
    }

    /// Use a fixed run timestamp instead of the current time.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Read a JSON configuration file through the filesystem port.
    ///
    /// # Errors
    /// - `InputNotFound` if the file cannot be read
    /// - `InputParseError` if it is not well-formed JSON
    pub fn read_document(&self, path: &Path) -> OptimusResult<Value> {
        if !self.filesystem.is_file(path) {
            return Err(ApplicationError::InputNotFound {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into());
        }

        let text = self.filesystem.read_to_string(path).map_err(|e| {
            OptimusError::from(ApplicationError::InputNotFound {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;

        serde_json::from_str(&text).map_err(|e| {
            ApplicationError::InputParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Run a generator from a configuration file.
    pub fn run_file(
        &self,
        kind: GeneratorKind,
        config_path: &Path,
        project_root: &Path,
    ) -> OptimusResult<RunReport> {
        let document = self.read_document(config_path)?;
        self.run(kind, &document, project_root)
    }

    /// Run a generator from a parsed document.
    ///
    /// # Errors
    /// Only schema errors; they are returned before any file is touched.
    /// Per-file failures are reported as `FileOutcome::Failed`.
    #[instrument(skip_all, fields(kind = %kind, root = %project_root.display()))]
    pub fn run(
        &self,
        kind: GeneratorKind,
        document: &Value,
        project_root: &Path,
    ) -> OptimusResult<RunReport> {
        let config = normalize_document(kind, document)?;
        info!(name = %config.name, "Configuration validated");
        Ok(self.generate(kind, config, project_root))
    }

    /// Render and write the declared file set for an already normalized
    /// configuration.
    pub fn generate(
        &self,
        kind: GeneratorKind,
        config: Configuration,
        project_root: &Path,
    ) -> RunReport {
        let mut context = RenderContext::new(config);
        if let Some(timestamp) = &self.timestamp {
            context = context.with_timestamp(timestamp.clone());
        }

        let mut report = RunReport::new(kind);

        for spec in kind.templates() {
            let outcome = self.emit_template(kind, spec, &context, project_root);
            log_outcome(&outcome);
            report.push(outcome);
        }

        for spec in kind.markers() {
            let outcome = self.inject_marker(kind, spec, &context, project_root);
            log_outcome(&outcome);
            report.push(outcome);
        }

        info!(summary = %report.summary(), "Generation finished");
        report
    }

    /// Which declared template sources the store can provide.
    pub fn template_status(&self, kind: GeneratorKind) -> Vec<TemplateStatus> {
        kind.sources()
            .into_iter()
            .map(|source| TemplateStatus {
                source,
                location: self.store.locate(kind, source),
                available: self.store.contains(kind, source),
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn emit_template(
        &self,
        kind: GeneratorKind,
        spec: &TemplateSpec,
        context: &RenderContext,
        root: &Path,
    ) -> FileOutcome {
        let (path, content) = match self.render_entry(kind, spec.source, spec.destination, context)
        {
            Ok(rendered) => rendered,
            Err((path, e)) => {
                return FileOutcome::Failed {
                    path,
                    reason: e.to_string(),
                };
            }
        };

        match FileEmitter::new(self.filesystem.as_ref()).emit_new(&root.join(&path), &content) {
            Ok(EmitOutcome::Written) => FileOutcome::Written { path },
            Ok(EmitOutcome::Skipped { reason }) => FileOutcome::Skipped { path, reason },
            Err(e) => FileOutcome::Failed {
                path,
                reason: e.to_string(),
            },
        }
    }

    fn inject_marker(
        &self,
        kind: GeneratorKind,
        spec: &MarkerSpec,
        context: &RenderContext,
        root: &Path,
    ) -> FileOutcome {
        match self.render_entry(kind, spec.source, spec.destination, context) {
            Ok((path, content)) => {
                match MarkerInjector::new(self.filesystem.as_ref()).inject(
                    &root.join(&path),
                    spec.tag,
                    &content,
                ) {
                    Ok(()) => FileOutcome::Patched {
                        path,
                        tag: spec.tag.to_string(),
                    },
                    Err(e) => FileOutcome::Failed {
                        path,
                        reason: e.to_string(),
                    },
                }
            }
            Err((path, e)) => FileOutcome::Failed {
                path,
                reason: e.to_string(),
            },
        }
    }

    /// Render the destination path, then the body. On failure, returns the
    /// best known path (rendered if that step succeeded) with the error.
    ///
    /// A rendered path must stay below the project root: absolute paths and
    /// `..` components fail the entry before its template is loaded.
    fn render_entry(
        &self,
        kind: GeneratorKind,
        source: &str,
        destination: &str,
        context: &RenderContext,
    ) -> Result<(PathBuf, String), (PathBuf, OptimusError)> {
        let path = self
            .renderer
            .render_path(destination, context)
            .map(PathBuf::from)
            .map_err(|e| (PathBuf::from(destination), e))?;

        if !is_confined(&path) {
            let error = ApplicationError::DestinationOutsideProject { path: path.clone() };
            return Err((path, error.into()));
        }

        debug!(source, path = %path.display(), "Rendering template");

        let body = self
            .store
            .load(kind, source)
            .and_then(|text| self.renderer.render(source, &text, context))
            .map_err(|e| (path.clone(), e))?;

        Ok((path, body))
    }
}

/// Whether `path` resolves below whatever root it is joined onto.
fn is_confined(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

fn log_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Written { .. } | FileOutcome::Patched { .. } => info!("{outcome}"),
        FileOutcome::Skipped { .. } | FileOutcome::Failed { .. } => warn!("{outcome}"),
    }
}
