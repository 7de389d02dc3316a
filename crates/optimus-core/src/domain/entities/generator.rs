//! Declared file sets of the generators.
//!
//! Each [`GeneratorKind`] owns two static, ordered lists:
//!
//! - [`TemplateSpec`]s: a template source rendered into a brand-new file.
//! - [`MarkerSpec`]s: a template source rendered into an existing file at
//!   a named marker.
//!
//! Both destination strings are themselves small templates, rendered against
//! the normalized configuration before use. The lists are data; the
//! orchestration lives in `application::services::GeneratorService`.

use std::fmt;

use crate::domain::{capabilities, value_objects::GeneratorKind};

/// A template rendered into a new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSpec {
    /// Path of the template source, relative to the generator's subdirectory.
    pub source: &'static str,
    /// Destination path template, relative to the project root.
    pub destination: &'static str,
}

impl TemplateSpec {
    pub const fn new(source: &'static str, destination: &'static str) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl fmt::Display for TemplateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// A template rendered into an existing file, replacing one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpec {
    pub source: &'static str,
    /// Marker tag, matching `[\w-]+`.
    pub tag: &'static str,
    /// Destination path template, relative to the project root.
    pub destination: &'static str,
}

impl MarkerSpec {
    pub const fn new(source: &'static str, tag: &'static str, destination: &'static str) -> Self {
        Self {
            source,
            tag,
            destination,
        }
    }
}

impl fmt::Display for MarkerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} [{}]", self.source, self.destination, self.tag)
    }
}

impl GeneratorKind {
    /// New-file templates, in emission order.
    pub fn templates(self) -> &'static [TemplateSpec] {
        capabilities::find_generator(self).templates
    }

    /// Marker injections, in injection order.
    pub fn markers(self) -> &'static [MarkerSpec] {
        capabilities::find_generator(self).markers
    }

    /// Every template source this generator reads, new-file ones first.
    /// Sources shared by several entries are listed once.
    pub fn sources(self) -> Vec<&'static str> {
        let mut sources: Vec<&'static str> = Vec::new();
        let all = self
            .templates()
            .iter()
            .map(|t| t.source)
            .chain(self.markers().iter().map(|m| m.source));
        for source in all {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
        sources
    }
}
