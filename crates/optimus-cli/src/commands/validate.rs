//! Implementation of `optimus validate`.

use optimus_core::{
    domain::{GeneratorKind, normalize_document},
    error::OptimusError,
};

use crate::{
    cli::{OutputFormat, ValidateArgs},
    commands::generate::build_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Validate a configuration file and print it with defaults applied.
///
/// Nothing is rendered or written.
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let kind = GeneratorKind::from(args.kind);

    let document = build_service(&config.templates.root).read_document(&args.config)?;
    let normalized = normalize_document(kind, &document).map_err(OptimusError::from)?;

    output.json(&normalized)?;
    if output.format() == OutputFormat::Human {
        output.success(&format!(
            "{} is a valid {} configuration",
            args.config.display(),
            kind
        ))?;
    }

    Ok(())
}
