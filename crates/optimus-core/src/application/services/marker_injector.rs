//! In-place marker replacement in existing files.

use std::path::Path;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::entities::marker,
    error::OptimusResult,
};

/// Replaces a single marker token in an existing file with rendered content.
///
/// Preconditions are checked in order and each failure leaves the file
/// untouched:
///
/// 1. the destination's directory exists (`MissingDestinationDirectory`)
/// 2. the destination file exists (`MissingDestinationFile`)
/// 3. the file holds exactly one marker for the tag, in either syntax
///    (`MarkerNotFound` / `DuplicateMarker`)
///
/// The file is then rewritten in full with only the marker token replaced.
pub struct MarkerInjector<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> MarkerInjector<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    pub fn inject(&self, destination: &Path, tag: &str, content: &str) -> OptimusResult<()> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !self.filesystem.is_dir(parent) {
                return Err(ApplicationError::MissingDestinationDirectory {
                    path: parent.to_path_buf(),
                }
                .into());
            }
        }

        if !self.filesystem.is_file(destination) {
            return Err(ApplicationError::MissingDestinationFile {
                path: destination.to_path_buf(),
            }
            .into());
        }

        let text = self.filesystem.read_to_string(destination)?;
        let patched = marker::replace_marker(&text, tag, content)?;
        self.filesystem.write_file(destination, &patched)
    }
}
