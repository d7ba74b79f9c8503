//! Immutable samples handed to exporters.

use std::fmt;
use std::sync::Arc;

use crate::metric::{MetricsCategory, Tags};

/// Lazy value accessor, evaluated when the exporter reads the sample.
pub type ValueFn = Arc<dyn Fn() -> u64 + Send + Sync>;

/// One gauge sample.
///
/// The value is read live from the aggregator cell on every call to
/// [`MetricSample::value`], not frozen at construction.
#[derive(Clone)]
pub struct MetricSample {
    name: String,
    description: &'static str,
    tags: Tags,
    category: MetricsCategory,
    value: ValueFn,
}

impl MetricSample {
    pub fn gauge(
        name: String,
        description: &'static str,
        tags: Tags,
        category: MetricsCategory,
        value: ValueFn,
    ) -> Self {
        Self { name, description, tags, category, value }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &'static str { self.description }
    pub fn tags(&self) -> &Tags { &self.tags }
    pub fn category(&self) -> MetricsCategory { self.category }

    /// Read the current value.
    pub fn value(&self) -> u64 {
        (self.value)()
    }
}

impl fmt::Debug for MetricSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricSample")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("category", &self.category)
            .field("value", &self.value())
            .finish()
    }
}
