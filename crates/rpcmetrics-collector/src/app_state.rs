//! Shared application state for the collector HTTP surface.

use std::sync::Arc;

use crate::collector::DefaultMetricsCollector;
use crate::config::CollectorConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: CollectorConfig,
    collector: Arc<DefaultMetricsCollector>,
}

impl AppState {
    pub fn new(cfg: CollectorConfig) -> Self {
        let collector = Arc::new(DefaultMetricsCollector::from_config(&cfg));
        tracing::info!(
            application = %cfg.application,
            enabled = cfg.metrics.enabled,
            listeners = ?collector.event_multicaster().listener_names(),
            "collector ready"
        );
        Self {
            inner: Arc::new(AppStateInner { cfg, collector }),
        }
    }

    pub fn cfg(&self) -> &CollectorConfig {
        &self.inner.cfg
    }

    pub fn collector(&self) -> Arc<DefaultMetricsCollector> {
        Arc::clone(&self.inner.collector)
    }
}
