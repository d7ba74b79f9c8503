//! Metric key abstraction shared by all samplers.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::event::MetricsKey;

/// Sample labels. Ordered so rendered output is deterministic.
pub type Tags = BTreeMap<String, String>;

/// Category a sample is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricsCategory {
    Requests,
    Rt,
}

impl MetricsCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricsCategory::Requests => "REQUESTS",
            MetricsCategory::Rt => "RT",
        }
    }
}

/// Identity every counter and RT cell is indexed by.
///
/// Implementations are immutable values: equality and hashing by value. They
/// are cloned into maps on first observation and never mutated afterwards.
pub trait Metric: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Labels copied into every sample emitted for this key.
    fn tags(&self) -> Tags;

    /// Concrete sample name of `family` for this key.
    fn sample_name(&self, family: MetricsKey) -> String;
}
