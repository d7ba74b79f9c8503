//! Per-(event type, key) request counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::event::MetricsKey;
use crate::metric::{Metric, MetricsCategory};
use crate::sample::MetricSample;

use super::{notify, EventKind, Handler};

/// Live counters of one event type, keyed by metric.
pub type CounterMap<M> = DashMap<M, Arc<AtomicU64>>;

/// Keyed counter engine: one atomic per (key, event type) pair.
pub struct CountAggregator<M, E> {
    counts: DashMap<E, Arc<CounterMap<M>>>,
    handler: Option<Handler<M, E>>,
}

impl<M: Metric, E: EventKind> Default for CountAggregator<M, E> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<M: Metric, E: EventKind> CountAggregator<M, E> {
    pub fn new(handler: Option<Handler<M, E>>) -> Self {
        Self {
            counts: DashMap::new(),
            handler,
        }
    }

    /// Add one to (key, event), then run the handler.
    /// Returns the value this call produced.
    pub fn increment(&self, key: M, event: E) -> u64 {
        let counter = self.counter(&key, event);
        let value = counter.fetch_add(1, Ordering::Relaxed) + 1;
        notify(self.handler.as_ref(), &key, &event, "count");
        value
    }

    /// Live mapping for `event`, or `None` if it was never incremented.
    pub fn get_count(&self, event: E) -> Option<Arc<CounterMap<M>>> {
        self.counts
            .get(&event)
            .map(|r| Arc::clone(r.value()))
            .filter(|m| !m.is_empty())
    }

    /// Current value of one counter.
    pub fn get(&self, key: &M, event: E) -> Option<u64> {
        let per_key = self.get_count(event)?;
        let value = per_key.get(key).map(|c| c.load(Ordering::Relaxed));
        value
    }

    /// One gauge per key that has seen `event`; nothing if none has.
    pub fn collect(&self, event: E, family: MetricsKey) -> Vec<MetricSample> {
        let Some(per_key) = self.get_count(event) else { return Vec::new(); };
        let samples = per_key
            .iter()
            .map(|r| {
                let counter = Arc::clone(r.value());
                MetricSample::gauge(
                    r.key().sample_name(family),
                    family.description(),
                    r.key().tags(),
                    MetricsCategory::Requests,
                    Arc::new(move || counter.load(Ordering::Relaxed)),
                )
            })
            .collect();
        samples
    }

    fn counter(&self, key: &M, event: E) -> Arc<AtomicU64> {
        let per_key = self.per_key(event);
        if let Some(c) = per_key.get(key) {
            return Arc::clone(c.value());
        }
        let counter = Arc::clone(
            per_key
                .entry(key.clone())
                .or_insert_with(|| {
                    tracing::debug!(key = ?key, event = ?event, "counter registered");
                    Arc::default()
                })
                .value(),
        );
        counter
    }

    fn per_key(&self, event: E) -> Arc<CounterMap<M>> {
        if let Some(m) = self.counts.get(&event) {
            return Arc::clone(m.value());
        }
        let per_key = Arc::clone(self.counts.entry(event).or_default().value());
        per_key
    }
}
