//! Application layer for Optimus.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`GeneratorService`, `FileEmitter`,
//!   `MarkerInjector`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! schema or marker rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{EmitOutcome, FileEmitter, GeneratorService, MarkerInjector};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
