//! External formatters run after a generation.
//!
//! Command lines are split on whitespace and spawned directly, never through
//! a shell. Their stdout and stderr are discarded; only the exit status is
//! inspected.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, instrument};

use crate::{
    config::PostProcessConfig,
    error::{CliError, CliResult},
};

/// Runs the configured formatters over a finished run.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    commands: Vec<String>,
    per_file: BTreeMap<String, String>,
}

impl PostProcessor {
    pub fn new(config: &PostProcessConfig) -> Self {
        Self {
            commands: config.commands.clone(),
            per_file: config.per_file.clone(),
        }
    }

    /// Run the per-file formatters over `changed` (relative to `root`), then
    /// the project-wide commands in `root`.
    ///
    /// Every command runs even if an earlier one failed; the failures are
    /// returned for reporting.
    #[instrument(skip_all, fields(root = %root.display(), files = changed.len()))]
    pub fn run(&self, root: &Path, changed: &[PathBuf]) -> Vec<CliError> {
        let mut failures = Vec::new();

        for path in changed {
            let Some(line) = self.formatter_for(path) else {
                continue;
            };
            let target = root.join(path);
            if let Err(e) = run_command(line, root, Some(&target)) {
                failures.push(e);
            }
        }

        for line in &self.commands {
            if let Err(e) = run_command(line, root, None) {
                failures.push(e);
            }
        }

        failures
    }

    /// The per-file command line for `path`'s extension, if any.
    pub fn formatter_for(&self, path: &Path) -> Option<&str> {
        let extension = path.extension()?.to_str()?;
        self.per_file.get(extension).map(String::as_str)
    }
}

fn run_command(line: &str, cwd: &Path, file: Option<&Path>) -> CliResult<()> {
    let mut parts = line.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(CliError::InvalidInput {
            message: "empty post-processing command".into(),
            source: None,
        });
    };

    let mut command = Command::new(program);
    command
        .args(parts)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(file) = file {
        command.arg(file);
    }

    let rendered = match file {
        Some(file) => format!("{line} {}", file.display()),
        None => line.to_string(),
    };
    debug!(command = %rendered, "Running formatter");

    let status = command.status().map_err(|e| CliError::ExternalCommandFailed {
        command: rendered.clone(),
        source: Some(Box::new(e)),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::ExternalCommandFailed {
            command: rendered,
            source: Some(Box::new(io::Error::other(format!("exited with {status}")))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor(commands: &[&str]) -> PostProcessor {
        PostProcessor::new(&PostProcessConfig {
            enabled: true,
            commands: commands.iter().map(|c| c.to_string()).collect(),
            per_file: BTreeMap::from([("php".to_string(), "prettier --write".to_string())]),
        })
    }

    #[test]
    fn formatter_is_chosen_by_extension() {
        let p = processor(&[]);
        assert_eq!(
            p.formatter_for(Path::new("app/Models/Post.php")),
            Some("prettier --write")
        );
        assert_eq!(p.formatter_for(Path::new("resources/js/Index.vue")), None);
        assert_eq!(p.formatter_for(Path::new("Makefile")), None);
    }

    #[test]
    fn missing_program_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let failures = processor(&["optimus-test-no-such-formatter --fix", "   "])
            .run(dir.path(), &[]);

        assert_eq!(failures.len(), 2);
        assert!(matches!(
            &failures[0],
            CliError::ExternalCommandFailed { command, .. }
                if command == "optimus-test-no-such-formatter --fix"
        ));
        assert!(matches!(&failures[1], CliError::InvalidInput { .. }));
    }

    #[test]
    fn per_file_command_gets_the_path_appended() {
        let dir = tempfile::tempdir().unwrap();
        let p = PostProcessor::new(&PostProcessConfig {
            enabled: true,
            commands: vec![],
            per_file: BTreeMap::from([(
                "php".to_string(),
                "optimus-test-no-such-formatter --write".to_string(),
            )]),
        });

        let failures = p.run(dir.path(), &[PathBuf::from("app/Models/Post.php")]);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].to_string().ends_with("app/Models/Post.php"));
    }
}
