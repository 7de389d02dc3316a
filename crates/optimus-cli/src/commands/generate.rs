//! Implementation of `optimus generate module|page`.
//!
//! Responsibility: resolve the template and project roots, wire the
//! adapters into a `GeneratorService`, print the report and run the
//! configured formatters. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use optimus_adapters::{DirectoryTemplateStore, JinjaRenderer, LocalFilesystem};
use optimus_core::{application::GeneratorService, domain::GeneratorKind};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    postprocess::PostProcessor,
};

/// Execute a generate command.
///
/// Dispatch sequence:
/// 1. Resolve roots (flag, else configuration, relative to the working directory)
/// 2. Read, validate and normalize the configuration file (fatal on failure)
/// 3. Render every declared template and marker
/// 4. Print one line per file outcome
/// 5. Run formatters over the changed files unless disabled
/// 6. Fail with exit code 1 if any entry failed
#[instrument(skip_all, fields(kind = %kind, config = %args.config.display()))]
pub fn execute(
    kind: GeneratorKind,
    args: GenerateArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read working directory")?;
    let templates_root = args
        .templates
        .unwrap_or_else(|| AppConfig::resolve(&cwd, &config.templates.root));
    let project_root = args
        .root
        .unwrap_or_else(|| AppConfig::resolve(&cwd, &config.project.root));

    if !templates_root.is_dir() {
        warn!(root = %templates_root.display(), "Templates root does not exist");
    }

    let service = build_service(&templates_root);

    let json = output.format() == OutputFormat::Json;
    if !json {
        output.header(&format!(
            "Generating {} from {}",
            kind,
            args.config.display()
        ))?;
    }

    let report = service.run_file(kind, &args.config, &project_root)?;
    output.report(&report)?;

    if config.post_process.enabled && !args.no_format {
        let changed: Vec<PathBuf> = report.changed_paths().into_iter().cloned().collect();
        if !changed.is_empty() {
            let processor = PostProcessor::new(&config.post_process);
            for failure in processor.run(&project_root, &changed) {
                failure.log();
                output.warning(&failure.to_string())?;
            }
        }
    }

    let summary = report.summary();
    if summary.failed > 0 {
        return Err(CliError::GenerationFailed {
            failed: summary.failed,
            total: report.outcomes.len(),
        });
    }

    info!(%summary, "Generation completed");
    if !json {
        output.success(&format!("{} generated", kind))?;
    }
    Ok(())
}

/// Production adapters: templates from disk, minijinja, `std::fs`.
pub fn build_service(templates_root: &Path) -> GeneratorService {
    GeneratorService::new(
        Box::new(DirectoryTemplateStore::new(templates_root)),
        Box::new(JinjaRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
}
