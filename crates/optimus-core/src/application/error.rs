//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not schema or
//! marker rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The configuration file cannot be located or read.
    #[error("Cannot read configuration {path}: {reason}")]
    InputNotFound { path: PathBuf, reason: String },

    /// The configuration file is not well-formed JSON.
    #[error("Cannot parse configuration {path}: {reason}")]
    InputParseError { path: PathBuf, reason: String },

    /// A declared template source is missing from the template store.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// A template could not be evaluated against the configuration.
    #[error("Template rendering failed for {template}: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The directory that should contain a marker file does not exist.
    #[error("Destination directory does not exist: {path}")]
    MissingDestinationDirectory { path: PathBuf },

    /// The file that should contain a marker does not exist.
    #[error("Destination file does not exist: {path}")]
    MissingDestinationFile { path: PathBuf },

    /// A rendered destination path leaves the project root.
    #[error("Destination escapes the project root: {path}")]
    DestinationOutsideProject { path: PathBuf },

    /// Store access failed (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InputNotFound { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
            ],
            Self::InputParseError { .. } => vec![
                "The configuration must be a single JSON object".into(),
                "Run `optimus validate <kind> <file>` to check it".into(),
            ],
            Self::TemplateNotFound { path } => vec![
                format!("Expected template at: {}", path.display()),
                "Point --templates (or templates.root) at your templates directory".into(),
                "Run `optimus templates <kind>` to see which sources are missing".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "The template uses data or a helper the configuration does not provide".into(),
                "Available filters: plural, singular, camel, kebab, snake, pascal".into(),
                "Available helpers: has_feature, in_array, get_model_traits, get_model_parents"
                    .into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::MissingDestinationDirectory { path } | Self::MissingDestinationFile { path } => {
                vec![
                    format!("Expected an existing file at: {}", path.display()),
                    "Run the generator from the project root or pass --root".into(),
                ]
            }
            Self::DestinationOutsideProject { .. } => vec![
                "Destination paths must be relative and must not contain '..'".into(),
                "Check the configuration values used in the destination (e.g. name, id)".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputNotFound { .. }
            | Self::TemplateNotFound { .. }
            | Self::MissingDestinationDirectory { .. }
            | Self::MissingDestinationFile { .. } => ErrorCategory::NotFound,
            Self::InputParseError { .. } | Self::DestinationOutsideProject { .. } => {
                ErrorCategory::Validation
            }
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
