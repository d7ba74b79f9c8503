//! Default metrics collector: the facade RPC filters talk to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rpcmetrics_core::{EventType, MetricSample, MetricsSampler, Tags};

use crate::config::CollectorConfig;
use crate::event::{EventMulticaster, LoggingListener};
use crate::invocation::{Invocation, Outcome};
use crate::sampler::MethodMetricsSampler;

/// Per-application collector of method request metrics.
///
/// Writes are no-ops while collection is disabled; `collect` then returns
/// nothing, but counters recorded earlier are kept.
pub struct DefaultMetricsCollector {
    collect_enabled: AtomicBool,
    multicaster: Arc<EventMulticaster>,
    sampler: MethodMetricsSampler,
}

impl DefaultMetricsCollector {
    pub fn new(application: &str, extra_tags: Tags) -> Self {
        let multicaster = Arc::new(EventMulticaster::new());
        Self {
            collect_enabled: AtomicBool::new(true),
            sampler: MethodMetricsSampler::new(application, extra_tags, Arc::clone(&multicaster)),
            multicaster,
        }
    }

    pub fn from_config(cfg: &CollectorConfig) -> Self {
        let collector = Self::new(&cfg.application, cfg.metrics.extra_tags.clone());
        collector.set_collect_enabled(cfg.metrics.enabled);
        if cfg.metrics.log_events {
            collector.multicaster.add_listener(Arc::new(LoggingListener));
        }
        collector
    }

    pub fn application_name(&self) -> &str {
        self.sampler.application_name()
    }

    pub fn event_multicaster(&self) -> Arc<EventMulticaster> {
        Arc::clone(&self.multicaster)
    }

    pub fn sampler(&self) -> &MethodMetricsSampler {
        &self.sampler
    }

    pub fn set_collect_enabled(&self, enabled: bool) {
        self.collect_enabled.store(enabled, Ordering::Relaxed);
        tracing::info!(application = self.application_name(), enabled, "metrics collection toggled");
    }

    pub fn is_collect_enabled(&self) -> bool {
        self.collect_enabled.load(Ordering::Relaxed)
    }

    pub fn increase_total_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::Total);
    }

    pub fn increase_succeed_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::Succeed);
    }

    pub fn increase_unknown_failed_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::UnknownFailed);
    }

    pub fn increase_processing_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::Processing);
    }

    pub fn business_failed_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::BusinessFailed);
    }

    pub fn timeout_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::RequestTimeout);
    }

    pub fn limit_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::RequestLimit);
    }

    pub fn total_failed_requests(&self, inv: &Invocation) {
        self.inc(inv, EventType::TotalFailed);
    }

    pub fn add_rt(&self, inv: &Invocation, rt: u64) {
        if self.is_collect_enabled() {
            self.sampler.add_rt(inv, rt);
        }
    }

    /// Call entered the filter.
    pub fn on_invoke(&self, inv: &Invocation) {
        self.increase_total_requests(inv);
        self.increase_processing_requests(inv);
    }

    /// Call left the filter. RT is recorded for every outcome.
    pub fn on_complete(&self, inv: &Invocation, outcome: Outcome, elapsed: Duration) {
        self.inc(inv, outcome.event_type());
        if outcome.is_failure() {
            self.total_failed_requests(inv);
        }
        self.add_rt(inv, u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
    }

    /// Current samples; empty while collection is disabled.
    pub fn collect(&self) -> Vec<MetricSample> {
        if !self.is_collect_enabled() {
            return Vec::new();
        }
        self.sampler.sample()
    }

    fn inc(&self, inv: &Invocation, event: EventType) {
        if self.is_collect_enabled() {
            self.sampler.inc(inv, event);
        }
    }
}
