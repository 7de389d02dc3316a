// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::fmt;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (outcomes keep them in the run report)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid configuration: {0}")]
    Schema(#[from] SchemaError),

    #[error("unknown generator '{0}'")]
    UnknownGenerator(String),

    #[error("unknown field type '{0}'")]
    UnknownFieldType(String),

    #[error("unknown feature type '{0}'")]
    UnknownFeatureType(String),

    // ========================================================================
    // Marker Errors
    // ========================================================================
    #[error("Could not find marker tag '{tag}'")]
    MarkerNotFound { tag: String },

    #[error("Duplicate marker tag '{tag}' ({occurrences} occurrences)")]
    DuplicateMarker { tag: String, occurrences: usize },

    #[error("Invalid marker tag '{tag}': tags may only contain word characters and '-'")]
    InvalidMarkerTag { tag: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Schema(schema) => {
                let mut out: Vec<String> = schema
                    .violations()
                    .iter()
                    .map(|v| format!("  • {v}"))
                    .collect();
                out.insert(0, "Fix the following in your configuration file:".into());
                out
            }
            Self::UnknownGenerator(_) => vec!["Supported generators: module, page".into()],
            Self::UnknownFieldType(_) => {
                vec!["Supported field types: text, textarea, editor, date, media".into()]
            }
            Self::UnknownFeatureType(_) => {
                vec!["Supported feature types: sort, slug, seo, media, draft, menu".into()]
            }
            Self::MarkerNotFound { tag } => vec![
                format!("Add the marker /*--OPTIMUS-CLI:{tag}--*/ or <!--OPTIMUS-CLI:{tag}--> to the file"),
                "If the generator already ran, the marker has been consumed".into(),
            ],
            Self::DuplicateMarker { tag, .. } => vec![format!(
                "Keep exactly one OPTIMUS-CLI:{tag} marker in the file"
            )],
            Self::InvalidMarkerTag { .. } => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Schema(_)
            | Self::UnknownGenerator(_)
            | Self::UnknownFieldType(_)
            | Self::UnknownFeatureType(_)
            | Self::DuplicateMarker { .. } => ErrorCategory::Validation,
            Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidMarkerTag { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

// ============================================================================
// Schema violations
// ============================================================================

/// Which check produced a violation. Declaration order is reporting
/// precedence: violations are sorted by this before anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaCheck {
    /// `name` (module) or `id` (page) present at the top level.
    RequiredKey,
    /// A field's `type` is one of the enumerated values.
    FieldType,
    /// A media field carries `options.media_group`.
    FieldOptions,
    /// A feature's `type` is one of the enumerated values.
    FeatureType,
    /// A feature carries its variant-specific required options.
    FeatureOptions,
    /// Any remaining shape rule (attribute types, array items).
    AttributeType,
}

/// One violated schema constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub check: SchemaCheck,
    /// Location in the document, e.g. `fields[2].options.media_group`.
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(check: SchemaCheck, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every constraint a document violated, in reporting order.
///
/// Never empty: the validator only builds one when something failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    violations: Vec<SchemaViolation>,
}

impl SchemaError {
    /// Sort by check precedence; the sort is stable so document order is
    /// kept inside each check.
    pub(crate) fn new(mut violations: Vec<SchemaViolation>) -> Self {
        debug_assert!(!violations.is_empty());
        violations.sort_by_key(|v| v.check);
        Self { violations }
    }

    /// The highest-precedence violation.
    pub fn first(&self) -> &SchemaViolation {
        &self.violations[0]
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        match self.violations.len() {
            1 => Ok(()),
            n => write!(f, " (and {} more)", n - 1),
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_orders_by_check_precedence() {
        let err = SchemaError::new(vec![
            SchemaViolation::new(SchemaCheck::FeatureType, "features[0].type", "bad"),
            SchemaViolation::new(SchemaCheck::RequiredKey, "", "missing required key 'name'"),
        ]);
        assert_eq!(err.first().check, SchemaCheck::RequiredKey);
        assert_eq!(
            err.to_string(),
            "missing required key 'name' (and 1 more)"
        );
    }

    #[test]
    fn schema_suggestions_list_every_violation() {
        let err = DomainError::Schema(SchemaError::new(vec![
            SchemaViolation::new(SchemaCheck::FieldType, "fields[0].type", "a"),
            SchemaViolation::new(SchemaCheck::FieldType, "fields[1].type", "b"),
        ]));
        assert_eq!(err.suggestions().len(), 3);
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn marker_not_found_mentions_both_syntaxes() {
        let err = DomainError::MarkerNotFound {
            tag: "routes".into(),
        };
        let hints = err.suggestions();
        assert!(hints[0].contains("/*--OPTIMUS-CLI:routes--*/"));
        assert!(hints[0].contains("<!--OPTIMUS-CLI:routes-->"));
    }
}
