//! New-file emission that never overwrites.

use std::path::Path;

use tracing::debug;

use crate::{application::ports::Filesystem, error::OptimusResult};

/// Result of [`FileEmitter::emit_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    Written,
    /// The destination already existed; nothing was written.
    Skipped { reason: String },
}

/// Writes rendered templates to brand-new files.
///
/// An existing destination is never touched, so hand-edited or previously
/// generated files survive re-running a generator.
pub struct FileEmitter<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> FileEmitter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Create `destination` with `content`, creating missing parent
    /// directories first.
    ///
    /// # Errors
    /// Filesystem failures while creating directories or writing.
    pub fn emit_new(&self, destination: &Path, content: &str) -> OptimusResult<EmitOutcome> {
        if self.filesystem.exists(destination) {
            debug!(path = %destination.display(), "Destination exists, skipping");
            return Ok(EmitOutcome::Skipped {
                reason: "file already exists".into(),
            });
        }

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !self.filesystem.is_dir(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }

        self.filesystem.write_file(destination, content)?;
        Ok(EmitOutcome::Written)
    }
}
