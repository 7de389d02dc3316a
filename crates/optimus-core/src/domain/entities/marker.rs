//! Marker tokens in existing destination files.
//!
//! Two spellings of the same marker are recognised, one per comment syntax:
//!
//! ```text
//! /*--OPTIMUS-CLI:routes--*/      code comments (PHP, JS)
//! <!--OPTIMUS-CLI:routes-->       markup comments (Vue, HTML)
//! ```
//!
//! A tag names exactly one injection point per file. Replacing a marker
//! consumes it, so injecting the same tag twice reports `MarkerNotFound`.

use std::{fmt, ops::Range, sync::OnceLock};

use regex::Regex;

use crate::domain::error::DomainError;

/// Namespace prefix inside every marker token.
pub const MARKER_NAMESPACE: &str = "OPTIMUS-CLI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSyntax {
    /// `/*--OPTIMUS-CLI:tag--*/`
    Code,
    /// `<!--OPTIMUS-CLI:tag-->`
    Markup,
}

impl MarkerSyntax {
    /// The full marker token for `tag` in this syntax.
    pub fn token(self, tag: &str) -> String {
        match self {
            Self::Code => format!("/*--{MARKER_NAMESPACE}:{tag}--*/"),
            Self::Markup => format!("<!--{MARKER_NAMESPACE}:{tag}-->"),
        }
    }
}

/// One marker token found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    pub tag: String,
    pub syntax: MarkerSyntax,
    /// Byte range of the whole token.
    pub range: Range<usize>,
}

impl fmt::Display for MarkerMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.syntax.token(&self.tag), self.range.start)
    }
}

fn marker_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"/\*--OPTIMUS-CLI:([\w-]+)--\*/|<!--OPTIMUS-CLI:([\w-]+)-->")
            .expect("marker pattern is a valid regex")
    })
}

fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[\w-]+$").expect("tag pattern is a valid regex"))
}

/// Whether `tag` can appear in a marker token.
pub fn is_valid_tag(tag: &str) -> bool {
    tag_regex().is_match(tag)
}

/// Every marker token in `text`, in file order, across both syntaxes.
pub fn scan(text: &str) -> Vec<MarkerMatch> {
    marker_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (tag, syntax) = match (caps.get(1), caps.get(2)) {
                (Some(tag), _) => (tag, MarkerSyntax::Code),
                (None, Some(tag)) => (tag, MarkerSyntax::Markup),
                (None, None) => return None,
            };
            Some(MarkerMatch {
                tag: tag.as_str().to_string(),
                syntax,
                range: whole.range(),
            })
        })
        .collect()
}

/// Locate the single marker for `tag`.
///
/// # Errors
/// - `InvalidMarkerTag` if `tag` does not match `[\w-]+`
/// - `MarkerNotFound` if no marker carries `tag`
/// - `DuplicateMarker` if more than one does, in either syntax
pub fn find_unique(text: &str, tag: &str) -> Result<MarkerMatch, DomainError> {
    if !is_valid_tag(tag) {
        return Err(DomainError::InvalidMarkerTag {
            tag: tag.to_string(),
        });
    }

    let mut found: Vec<MarkerMatch> = scan(text).into_iter().filter(|m| m.tag == tag).collect();

    match found.len() {
        0 => Err(DomainError::MarkerNotFound {
            tag: tag.to_string(),
        }),
        1 => Ok(found.remove(0)),
        occurrences => Err(DomainError::DuplicateMarker {
            tag: tag.to_string(),
            occurrences,
        }),
    }
}

/// Replace the single marker for `tag` with `content`; every other byte of
/// `text` is kept.
pub fn replace_marker(text: &str, tag: &str, content: &str) -> Result<String, DomainError> {
    let found = find_unique(text, tag)?;

    let mut out = String::with_capacity(text.len() - found.range.len() + content.len());
    out.push_str(&text[..found.range.start]);
    out.push_str(content);
    out.push_str(&text[found.range.end..]);
    Ok(out)
}
