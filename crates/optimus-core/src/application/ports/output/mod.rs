//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `optimus-adapters` crate provides implementations.

use crate::domain::{GeneratorKind, RenderContext};
use crate::error::OptimusResult;
use std::path::Path;

/// Port for filesystem operations on the destination project.
///
/// Implemented by:
/// - `optimus_adapters::filesystem::LocalFilesystem` (production)
/// - `optimus_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> OptimusResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> OptimusResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> OptimusResult<String>;

    /// Check if path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template source lookup.
///
/// Sources are addressed by generator kind plus a path relative to that
/// kind's subdirectory, e.g. `(Module, "back/Model.php.j2")`.
///
/// Implemented by:
/// - `optimus_adapters::template_store::DirectoryTemplateStore` (templates root on disk)
/// - `optimus_adapters::template_store::InMemoryStore` (testing, embedding)
pub trait TemplateStore: Send + Sync {
    /// Load the source text of one template.
    ///
    /// # Errors
    /// `ApplicationError::TemplateNotFound` if the source does not exist.
    fn load(&self, kind: GeneratorKind, source: &str) -> OptimusResult<String>;

    /// Whether the source exists.
    fn contains(&self, kind: GeneratorKind, source: &str) -> bool;

    /// Human-readable location of a source (a path for directory stores).
    fn locate(&self, kind: GeneratorKind, source: &str) -> String;

    /// Every source available for `kind`, sorted.
    fn list(&self, kind: GeneratorKind) -> OptimusResult<Vec<String>>;
}

/// Port for template evaluation.
///
/// The renderer exposes the context's configuration as template data, the
/// six case filters (`plural`, `singular`, `camel`, `kebab`, `snake`,
/// `pascal`) and the helpers `has_feature`, `in_array`, `get_model_traits`
/// and `get_model_parents`.
///
/// Implemented by:
/// - `optimus_adapters::renderer::JinjaRenderer` (minijinja)
pub trait TemplateRenderer: Send + Sync {
    /// Render a template body.
    ///
    /// `name` identifies the template in error messages. Output is
    /// deterministic for a given source and context.
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> OptimusResult<String>;

    /// Render a destination path template. Unlike [`render`], the context's
    /// `timestamp` is available.
    ///
    /// [`render`]: TemplateRenderer::render
    fn render_path(&self, template: &str, context: &RenderContext) -> OptimusResult<String>;
}
