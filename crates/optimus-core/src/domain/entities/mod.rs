pub mod configuration;
pub mod generator;
pub mod marker;
pub mod outcome;
pub mod render_context;

pub use configuration::{Configuration, Feature, Field, FieldType};
pub use generator::{MarkerSpec, TemplateSpec};
pub use outcome::{FileOutcome, RunReport, RunSummary};
pub use render_context::RenderContext;
