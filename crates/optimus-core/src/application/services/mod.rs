//! Application services - orchestrate use cases.
//!
//! `GeneratorService` drives a whole run; `FileEmitter` and
//! `MarkerInjector` perform the two kinds of file side effect.

pub mod file_emitter;
pub mod generator_service;
pub mod marker_injector;

pub use file_emitter::{EmitOutcome, FileEmitter};
pub use generator_service::{GeneratorService, TemplateStatus};
pub use marker_injector::MarkerInjector;
