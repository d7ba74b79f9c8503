//! Method metrics sampler: the core engine keyed by [`MethodMetric`].

use std::sync::Arc;

use rpcmetrics_core::sampler::CounterMap;
use rpcmetrics_core::{
    EventType, GenericSampler, MetricSample, MetricsSampler, RtStats, SamplerConfig, Tags,
    STANDARD_COUNTERS,
};

use crate::event::{EventMulticaster, MetricsEvent};
use crate::invocation::Invocation;
use crate::method::{Application, MethodMetric};

/// Counts request outcomes and RT per method, publishing each update to the
/// event bus.
pub struct MethodMetricsSampler {
    application: Application,
    inner: GenericSampler<Invocation, EventType, MethodMetric>,
}

impl MethodMetricsSampler {
    pub fn new(application: &str, extra_tags: Tags, multicaster: Arc<EventMulticaster>) -> Self {
        let application = Application::new(application, extra_tags);

        let count_app = application.clone();
        let count_bus = Arc::clone(&multicaster);
        let count = SamplerConfig::new(move |inv: &Invocation| MethodMetric::new(&count_app, inv))
            .with_handler(move |metric: &MethodMetric, event: &EventType| {
                count_bus.publish(MetricsEvent::Request { metric: metric.clone(), event: *event });
                Ok(())
            });

        let rt_app = application.clone();
        let rt = SamplerConfig::new(move |inv: &Invocation| MethodMetric::new(&rt_app, inv))
            .with_handler(move |metric: &MethodMetric, rt: &u64| {
                multicaster.publish(MetricsEvent::Rt { metric: metric.clone(), rt: *rt });
                Ok(())
            });

        Self {
            application,
            inner: GenericSampler::new(count, rt),
        }
    }

    pub fn application_name(&self) -> &str {
        self.application.name()
    }

    /// Key an invocation maps to.
    pub fn metric_of(&self, inv: &Invocation) -> MethodMetric {
        MethodMetric::new(&self.application, inv)
    }

    pub fn inc(&self, inv: &Invocation, event: EventType) -> u64 {
        self.inner.increment(event, inv)
    }

    pub fn add_rt(&self, inv: &Invocation, rt: u64) {
        self.inner.record_rt(inv, rt);
    }

    pub fn get_count(&self, event: EventType) -> Option<Arc<CounterMap<MethodMetric>>> {
        self.inner.get_count(event)
    }

    pub fn count(&self, inv: &Invocation, event: EventType) -> u64 {
        self.inner.counts().get(&self.metric_of(inv), event).unwrap_or(0)
    }

    pub fn rt_stats(&self, inv: &Invocation) -> Option<RtStats> {
        self.inner.rt().stats(&self.metric_of(inv))
    }
}

impl MetricsSampler for MethodMetricsSampler {
    fn sample(&self) -> Vec<MetricSample> {
        self.inner.emit(&STANDARD_COUNTERS)
    }
}
