//! Count and RT aggregators behind one sampler, with fixed emit order.

use std::sync::Arc;

use crate::event::{EventType, MetricsKey, STANDARD_COUNTERS};
use crate::metric::Metric;
use crate::sample::MetricSample;

use super::{
    CountAggregator, CounterMap, EventKind, KeyFactory, MetricsSampler, RtAggregator,
    SamplerConfig,
};

/// Counter + RT engine over an arbitrary source type.
///
/// `S` is whatever an event is derived from (an invocation, a registry
/// notification, ...), `E` the counted event type, and `M` the key. The two
/// lanes each get their own key factory and post-update handler.
pub struct GenericSampler<S, E, M> {
    counts: CountAggregator<M, E>,
    rt: RtAggregator<M>,
    count_key: KeyFactory<S, M>,
    rt_key: KeyFactory<S, M>,
}

impl<S, E: EventKind, M: Metric> GenericSampler<S, E, M> {
    pub fn new(count: SamplerConfig<S, M, E>, rt: SamplerConfig<S, M, u64>) -> Self {
        Self {
            counts: CountAggregator::new(count.handler),
            rt: RtAggregator::new(rt.handler),
            count_key: count.key_factory,
            rt_key: rt.key_factory,
        }
    }

    pub fn increment(&self, event: E, source: &S) -> u64 {
        let key = (self.count_key)(source);
        self.counts.increment(key, event)
    }

    pub fn record_rt(&self, source: &S, rt: u64) {
        let key = (self.rt_key)(source);
        self.rt.record(key, rt);
    }

    pub fn get_count(&self, event: E) -> Option<Arc<CounterMap<M>>> {
        self.counts.get_count(event)
    }

    pub fn counts(&self) -> &CountAggregator<M, E> {
        &self.counts
    }

    pub fn rt(&self) -> &RtAggregator<M> {
        &self.rt
    }

    /// Counter samples for `families` in the given order, then RT samples.
    pub fn emit(&self, families: &[(E, MetricsKey)]) -> Vec<MetricSample> {
        let mut out = Vec::new();
        for &(event, family) in families {
            out.extend(self.counts.collect(event, family));
        }
        out.extend(self.rt.sample());
        out
    }
}

impl<S, M: Metric> MetricsSampler for GenericSampler<S, EventType, M> {
    fn sample(&self) -> Vec<MetricSample> {
        self.emit(&STANDARD_COUNTERS)
    }
}
