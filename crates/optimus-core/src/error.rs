//! Unified error handling for Optimus Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Optimus Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimusError {
    /// Errors from the domain layer (schema and marker violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (input, templates, filesystem).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl OptimusError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Run `optimus config list` to inspect the effective settings".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Optimus".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error aborts a whole run rather than one file entry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::Schema(_))
                | Self::Application(
                    ApplicationError::InputNotFound { .. } | ApplicationError::InputParseError { .. }
                )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type OptimusResult<T> = Result<T, OptimusError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Turn any error into an internal error with a message prefix.
    fn context(self, msg: impl Into<String>) -> OptimusResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> OptimusResult<T> {
        self.map_err(|e| OptimusError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
