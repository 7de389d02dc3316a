//! Optimus Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Optimus
//! module and page-template generators, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           optimus-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GeneratorService, FileEmitter,         │
//! │  MarkerInjector)                        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Store, Filesystem, Render)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     optimus-adapters (Infrastructure)   │
//! │ (DirectoryTemplateStore, JinjaRenderer, │
//! │  LocalFilesystem, ...)                  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (SchemaValidator, DefaultsMerger,       │
//! │  Configuration, GeneratorKind, markers) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use optimus_core::prelude::*;
//!
//! let service = GeneratorService::new(store, renderer, filesystem);
//! let report = service.run_file(GeneratorKind::Module, "post.json".as_ref(), ".".as_ref())?;
//! for outcome in &report.outcomes {
//!     println!("{outcome}");
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GeneratorService,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        CaseConverter, Configuration, DefaultsMerger, FeatureKind, FieldKind, FileOutcome,
        GeneratorKind, RenderContext, RunReport, SchemaValidator,
    };
    pub use crate::error::{OptimusError, OptimusResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
