//! Implementation of `optimus templates`.

use serde_json::json;

use optimus_adapters::DirectoryTemplateStore;
use optimus_core::{application::ports::TemplateStore, domain::GeneratorKind};

use crate::{
    cli::{OutputFormat, TemplatesArgs},
    commands::generate::build_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// List the template sources a generator declares and whether each exists
/// under the templates root. Sources on disk that no entry uses are listed
/// after them.
pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let kind = GeneratorKind::from(args.kind);
    let root = args.templates.unwrap_or(config.templates.root);

    let statuses = build_service(&root).template_status(kind);
    let unused: Vec<String> = DirectoryTemplateStore::new(&root)
        .list(kind)?
        .into_iter()
        .filter(|source| !statuses.iter().any(|s| s.source == source.as_str()))
        .collect();

    if output.format() == OutputFormat::Json {
        let declared: Vec<_> = statuses
            .iter()
            .map(|s| {
                json!({
                    "source": s.source,
                    "location": s.location,
                    "available": s.available,
                })
            })
            .collect();
        output.json(&json!({ "kind": kind, "templates": declared, "unused": unused }))?;
        return Ok(());
    }

    output.header(&format!("Templates for {} ({})", kind, root.display()))?;
    for status in &statuses {
        if status.available {
            output.success(status.source)?;
        } else {
            output.error(&format!("{} (missing: {})", status.source, status.location))?;
        }
    }
    for source in &unused {
        output.info(&format!("{source} (not used by the generator)"))?;
    }

    let missing = statuses.iter().filter(|s| !s.available).count();
    if missing > 0 {
        output.warning(&format!("{missing} of {} templates missing", statuses.len()))?;
    }

    Ok(())
}
