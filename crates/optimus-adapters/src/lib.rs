//! Infrastructure adapters for Optimus.
//!
//! This crate implements the ports defined in `optimus-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::JinjaRenderer;
pub use template_store::{DirectoryTemplateStore, InMemoryStore};
