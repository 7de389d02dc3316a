//! Case conversion filters used by templates and destination paths.
//!
//! The transforms are deliberately literal about separators: only single
//! spaces are treated as word boundaries, and `pascal` keeps the original
//! casing of every word. Templates rely on this, e.g. a module named
//! `"Blog Post"` produces the class name `BlogPost` while `"blog post"`
//! produces `blogpost`.
//!
//! | Filter     | `"Blog Post"`   |
//! |------------|-----------------|
//! | `plural`   | `"Blog Posts"`  |
//! | `singular` | `"Blog Post"`   |
//! | `camel`    | `"blogPost"`    |
//! | `kebab`    | `"blog-post"`   |
//! | `snake`    | `"blog_post"`   |
//! | `pascal`   | `"BlogPost"`    |

use std::{collections::HashMap, fmt, sync::Mutex};

/// One of the six text filters exposed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStyle {
    Plural,
    Singular,
    Camel,
    Kebab,
    Snake,
    Pascal,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 6] = [
        Self::Plural,
        Self::Singular,
        Self::Camel,
        Self::Kebab,
        Self::Snake,
        Self::Pascal,
    ];

    /// The filter name templates use, e.g. `{{ name | plural }}`.
    pub const fn filter_name(&self) -> &'static str {
        match self {
            Self::Plural => "plural",
            Self::Singular => "singular",
            Self::Camel => "camel",
            Self::Kebab => "kebab",
            Self::Snake => "snake",
            Self::Pascal => "pascal",
        }
    }

    /// Apply the transform without touching any cache.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Plural => pluralizer::pluralize(text, 2, false),
            Self::Singular => pluralizer::pluralize(text, 1, false),
            Self::Camel => camel(text),
            Self::Kebab => text.to_lowercase().replace(' ', "-"),
            Self::Snake => text.to_lowercase().replace(' ', "_"),
            Self::Pascal => text.replace(' ', ""),
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filter_name())
    }
}

/// Memoizing case converter.
///
/// One instance is built per generation run and dropped with it. The same
/// identifier is typically converted dozens of times across a module's
/// templates, so results are cached per `(style, input)`.
#[derive(Debug, Default)]
pub struct CaseConverter {
    cache: Mutex<HashMap<(CaseStyle, String), String>>,
}

impl CaseConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plural(&self, text: &str) -> String {
        self.convert(CaseStyle::Plural, text)
    }

    pub fn singular(&self, text: &str) -> String {
        self.convert(CaseStyle::Singular, text)
    }

    pub fn camel(&self, text: &str) -> String {
        self.convert(CaseStyle::Camel, text)
    }

    pub fn kebab(&self, text: &str) -> String {
        self.convert(CaseStyle::Kebab, text)
    }

    pub fn snake(&self, text: &str) -> String {
        self.convert(CaseStyle::Snake, text)
    }

    pub fn pascal(&self, text: &str) -> String {
        self.convert(CaseStyle::Pascal, text)
    }

    /// Convert `text`, consulting the cache first.
    ///
    /// A poisoned lock only disables caching; the result is still computed.
    pub fn convert(&self, style: CaseStyle, text: &str) -> String {
        let key = (style, text.to_owned());

        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }

        let converted = style.apply(text);

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, converted.clone());
        }

        converted
    }

    /// Number of memoized conversions.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

/// Lowercase everything, then capitalize every word after the first.
fn camel(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut words = lower.split(' ');

    let mut out = words.next().unwrap_or_default().to_owned();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Title-case an identifier: `-` and `_` become spaces, the first letter of
/// every alphabetic run is uppercased and the rest lowercased.
///
/// `"about-us"` → `"About Us"`, `"faq_page"` → `"Faq Page"`.
pub fn title(text: &str) -> String {
    let spaced = text.replace(['-', '_'], " ");

    let mut out = String::with_capacity(spaced.len());
    let mut in_word = false;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
