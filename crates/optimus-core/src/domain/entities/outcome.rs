//! Per-file outcomes of a generation run.

use std::{fmt, path::PathBuf};

use serde::Serialize;

use crate::domain::value_objects::GeneratorKind;

/// What happened to one declared template or marker entry.
///
/// `path` is relative to the project root. For entries whose destination
/// could not be rendered it is the unrendered destination template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    /// A new file was created.
    Written { path: PathBuf },

    /// The destination already existed and was left untouched.
    Skipped { path: PathBuf, reason: String },

    /// A marker in an existing file was replaced.
    Patched { path: PathBuf, tag: String },

    /// The entry could not be processed; later entries still ran.
    Failed { path: PathBuf, reason: String },
}

impl FileOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Written { path }
            | Self::Skipped { path, .. }
            | Self::Patched { path, .. }
            | Self::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Whether the file on disk changed.
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Written { .. } | Self::Patched { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Written { .. } => "written",
            Self::Skipped { .. } => "skipped",
            Self::Patched { .. } => "patched",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written { path } => write!(f, "Written {}", path.display()),
            Self::Skipped { path, reason } => write!(f, "Skipped {}: {reason}", path.display()),
            Self::Patched { path, tag } => write!(f, "Patched {} [{tag}]", path.display()),
            Self::Failed { path, reason } => write!(f, "Failed {}: {reason}", path.display()),
        }
    }
}

/// Ordered outcomes of one run: templates first, then markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub kind: GeneratorKind,
    pub outcomes: Vec<FileOutcome>,
}

/// Outcome counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
    pub patched: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn new(kind: GeneratorKind) -> Self {
        Self {
            kind,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for outcome in &self.outcomes {
            match outcome {
                FileOutcome::Written { .. } => summary.written += 1,
                FileOutcome::Skipped { .. } => summary.skipped += 1,
                FileOutcome::Patched { .. } => summary.patched += 1,
                FileOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(FileOutcome::is_failure)
    }

    /// Paths of files created or patched, in run order, without repeats.
    pub fn changed_paths(&self) -> Vec<&PathBuf> {
        let mut paths: Vec<&PathBuf> = Vec::new();
        for outcome in self.outcomes.iter().filter(|o| o.is_change()) {
            if !paths.contains(&outcome.path()) {
                paths.push(outcome.path());
            }
        }
        paths
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} written, {} patched, {} skipped, {} failed",
            self.written, self.patched, self.skipped, self.failed
        )
    }
}
