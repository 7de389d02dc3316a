//! Data and helpers handed to the template renderer.

use std::{str::FromStr, sync::Arc};

use chrono::Utc;
use serde_json::Value;

use crate::domain::{
    capabilities,
    case::CaseConverter,
    entities::configuration::Configuration,
    value_objects::FeatureKind,
};

/// `strftime` format of the run timestamp used in migration filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// Name of the timestamp variable in path templates.
pub const TIMESTAMP_VARIABLE: &str = "timestamp";

/// Everything one run renders against.
///
/// A **Value Object**: built once from the normalized configuration and
/// read-only afterwards. Cloning is cheap: the configuration, its serialized
/// form and the case converter are shared, so the renderer's filters and
/// helpers can hold a clone and the case cache lives exactly as long as the
/// run.
///
/// ## Helpers
///
/// | Template call          | Method              |
/// |------------------------|---------------------|
/// | `has_feature("sort")`  | [`has_feature`]     |
/// | `get_model_traits()`   | [`model_traits`]    |
/// | `get_model_parents()`  | [`model_parents`]   |
///
/// [`has_feature`]: RenderContext::has_feature
/// [`model_traits`]: RenderContext::model_traits
/// [`model_parents`]: RenderContext::model_parents
#[derive(Debug, Clone)]
pub struct RenderContext {
    config: Arc<Configuration>,
    data: Arc<Value>,
    cases: Arc<CaseConverter>,
    timestamp: String,
}

impl RenderContext {
    /// Create a context stamped with the current UTC time.
    pub fn new(config: Configuration) -> Self {
        let data = Arc::new(config.to_value());
        Self {
            config: Arc::new(config),
            data,
            cases: Arc::new(CaseConverter::new()),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Replace the run timestamp, e.g. to make paths reproducible.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The configuration as template data. Never contains the timestamp.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The configuration plus `timestamp`, for destination path templates.
    ///
    /// `timestamp` is a reserved top-level key; validation rejects documents
    /// that set it.
    pub fn path_data(&self) -> Value {
        let mut data = Value::clone(&self.data);
        if let Value::Object(map) = &mut data {
            map.insert(
                TIMESTAMP_VARIABLE.to_string(),
                Value::String(self.timestamp.clone()),
            );
        }
        data
    }

    pub fn cases(&self) -> &Arc<CaseConverter> {
        &self.cases
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// True iff some feature has type `kind`. Unknown types are never present.
    pub fn has_feature(&self, kind: &str) -> bool {
        FeatureKind::from_str(kind)
            .map(|kind| self.config.has_feature(kind))
            .unwrap_or(false)
    }

    pub fn model_traits(&self) -> String {
        capabilities::model_traits(&self.config.feature_kinds())
    }

    pub fn model_parents(&self) -> String {
        capabilities::model_parents(&self.config.feature_kinds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::configuration::{Feature, SortOptions};
    use serde_json::Map;

    fn context() -> RenderContext {
        RenderContext::new(Configuration {
            name: "blog post".into(),
            id: None,
            fields: vec![],
            features: vec![Feature::Sort(SortOptions::default())],
            extra: Map::new(),
        })
    }

    #[test]
    fn timestamp_only_in_path_data() {
        let ctx = context().with_timestamp("2024_01_02_030405");
        assert!(ctx.data().get("timestamp").is_none());
        assert_eq!(ctx.path_data()["timestamp"], "2024_01_02_030405");
        assert_eq!(ctx.path_data()["name"], "blog post");
    }

    #[test]
    fn default_timestamp_has_migration_shape() {
        let ctx = context();
        assert_eq!(ctx.timestamp().len(), "2024_01_02_030405".len());
        assert_eq!(ctx.timestamp().matches('_').count(), 3);
    }

    #[test]
    fn helpers_reflect_features() {
        let ctx = context();
        assert!(ctx.has_feature("sort"));
        assert!(!ctx.has_feature("draft"));
        assert!(!ctx.has_feature("widgets"));
        assert_eq!(ctx.model_traits(), "SortableTrait");
        assert_eq!(ctx.model_parents(), "Sortable");
    }
}
