//! Method metric key.

use std::sync::Arc;

use rpcmetrics_core::{Metric, MetricsKey, Tags};

use crate::invocation::{Invocation, Side};

pub const TAG_APPLICATION_NAME: &str = "application.name";
pub const TAG_INTERFACE: &str = "interface";
pub const TAG_METHOD: &str = "method";
pub const TAG_GROUP: &str = "group";
pub const TAG_VERSION: &str = "version";

/// Tag names set by [`MethodMetric`] itself.
pub const RESERVED_TAGS: [&str; 5] = [
    TAG_APPLICATION_NAME,
    TAG_INTERFACE,
    TAG_METHOD,
    TAG_GROUP,
    TAG_VERSION,
];

/// Per-collector identity shared by every key it creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Application {
    name: Arc<str>,
    extra_tags: Arc<Tags>,
}

impl Application {
    pub fn new(name: &str, extra_tags: Tags) -> Self {
        Self {
            name: Arc::from(name),
            extra_tags: Arc::new(extra_tags),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Identity of one method on one side of the call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodMetric {
    application: Application,
    interface: Arc<str>,
    method: Arc<str>,
    group: Option<Arc<str>>,
    version: Option<Arc<str>>,
    side: Side,
}

impl MethodMetric {
    pub fn new(application: &Application, inv: &Invocation) -> Self {
        Self {
            application: application.clone(),
            interface: Arc::from(inv.interface.as_str()),
            method: Arc::from(inv.method.as_str()),
            group: inv.group.as_deref().map(Arc::from),
            version: inv.version.as_deref().map(Arc::from),
            side: inv.side,
        }
    }

    pub fn application_name(&self) -> &str { self.application.name() }
    pub fn interface(&self) -> &str { &self.interface }
    pub fn method(&self) -> &str { &self.method }
    pub fn group(&self) -> Option<&str> { self.group.as_deref() }
    pub fn version(&self) -> Option<&str> { self.version.as_deref() }
    pub fn side(&self) -> Side { self.side }
}

impl Metric for MethodMetric {
    /// Group and version are always present (empty when unset) so every
    /// family keeps one label set.
    fn tags(&self) -> Tags {
        let mut tags = (*self.application.extra_tags).clone();
        tags.insert(TAG_APPLICATION_NAME.into(), self.application.name().into());
        tags.insert(TAG_INTERFACE.into(), self.interface.to_string());
        tags.insert(TAG_METHOD.into(), self.method.to_string());
        tags.insert(TAG_GROUP.into(), self.group().unwrap_or_default().into());
        tags.insert(TAG_VERSION.into(), self.version().unwrap_or_default().into());
        tags
    }

    fn sample_name(&self, family: MetricsKey) -> String {
        family.name_by_type(self.side.as_str())
    }
}
