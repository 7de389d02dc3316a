// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Optimus.
//!
//! Pure logic over configuration documents: validation, default filling,
//! case conversion, the generators' declared file sets and marker scanning.
//! Template evaluation and all I/O are reached through the ports of the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: everything is synchronous
//! - **No I/O**: no filesystem, process or network calls
//! - **Immutable entities**: a normalized `Configuration` is never mutated
//! - **Exhaustive variants**: field and feature types are tagged enums, so
//!   adding one fails to compile until validation and defaults handle it

// Public API - what the world sees
pub mod capabilities;
pub mod case;
pub mod defaults;
pub mod entities;
pub mod error;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use case::{CaseConverter, CaseStyle};
pub use defaults::DefaultsMerger;
pub use entities::{
    Configuration, Feature, Field, FieldType, FileOutcome, MarkerSpec, RenderContext, RunReport,
    RunSummary, TemplateSpec,
};
pub use error::{DomainError, ErrorCategory, SchemaCheck, SchemaError, SchemaViolation};
pub use validation::{SchemaValidator, ValidatedDocument};
pub use value_objects::{FeatureKind, FieldKind, GeneratorKind};

/// Validate and normalize in one step.
pub fn normalize_document(
    kind: GeneratorKind,
    document: &serde_json::Value,
) -> Result<Configuration, DomainError> {
    let validated = SchemaValidator::validate(kind, document)?;
    Ok(DefaultsMerger::normalize(&validated))
}
