//! Per-key RT statistics (last/min/max/sum, derived avg).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::event::MetricsKey;
use crate::metric::{Metric, MetricsCategory};
use crate::sample::MetricSample;

use super::{notify, Handler};

/// RT statistics of one key.
///
/// All five fields are created together from the first observation, so a cell
/// never exists with `count == 0`. Each later update is a separate atomic op:
/// readers may see e.g. a `sum` that already includes a value `count` does not.
#[derive(Debug)]
struct RtCell {
    last: AtomicU64,
    min: AtomicU64,
    max: AtomicU64,
    sum: AtomicU64,
    count: AtomicU64,
}

impl RtCell {
    fn first(rt: u64) -> Self {
        Self {
            last: AtomicU64::new(rt),
            min: AtomicU64::new(rt),
            max: AtomicU64::new(rt),
            sum: AtomicU64::new(rt),
            count: AtomicU64::new(1),
        }
    }

    fn record(&self, rt: u64) {
        self.last.store(rt, Ordering::Relaxed);
        self.min.fetch_min(rt, Ordering::Relaxed);
        self.max.fetch_max(rt, Ordering::Relaxed);
        // saturates at u64::MAX instead of wrapping below max
        let _ = self
            .sum
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| Some(s.saturating_add(rt)));
        self.count.fetch_add(1, Ordering::Release);
    }

    fn stats(&self) -> RtStats {
        let count = self.count.load(Ordering::Acquire);
        RtStats {
            last: self.last.load(Ordering::Relaxed),
            min: self.min.load(Ordering::Relaxed),
            max: self.max.load(Ordering::Relaxed),
            sum: self.sum.load(Ordering::Relaxed),
            count,
        }
    }

    /// Truncating integer average, computed from the live cells.
    fn avg(&self) -> u64 {
        let count = self.count.load(Ordering::Acquire);
        self.sum.load(Ordering::Relaxed) / count
    }
}

/// Point-in-time read of one RT cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtStats {
    last: u64,
    min: u64,
    max: u64,
    sum: u64,
    count: u64,
}

impl RtStats {
    pub fn last(&self) -> u64 { self.last }
    pub fn min(&self) -> u64 { self.min }
    pub fn max(&self) -> u64 { self.max }
    pub fn sum(&self) -> u64 { self.sum }
    pub fn count(&self) -> u64 { self.count }

    /// `sum / count`, truncated. `count` is at least 1 for any stats read
    /// from a live cell.
    pub fn avg(&self) -> u64 {
        self.sum / self.count
    }
}

/// Keyed RT statistics engine.
pub struct RtAggregator<M> {
    cells: DashMap<M, Arc<RtCell>>,
    handler: Option<Handler<M, u64>>,
}

impl<M: Metric> Default for RtAggregator<M> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<M: Metric> RtAggregator<M> {
    pub fn new(handler: Option<Handler<M, u64>>) -> Self {
        Self {
            cells: DashMap::new(),
            handler,
        }
    }

    /// Fold one RT observation into the cell of `key`, then run the handler.
    pub fn record(&self, key: M, rt: u64) {
        let existing = self.cells.get(&key).map(|c| Arc::clone(c.value()));
        match existing {
            Some(cell) => cell.record(rt),
            None => {
                let mut created = false;
                let cell = Arc::clone(
                    self.cells
                        .entry(key.clone())
                        .or_insert_with(|| {
                            created = true;
                            Arc::new(RtCell::first(rt))
                        })
                        .value(),
                );
                if created {
                    tracing::debug!(key = ?key, rt, "rt cell registered");
                } else {
                    // lost the insert race; the winner's cell takes our value too
                    cell.record(rt);
                }
            }
        }
        notify(self.handler.as_ref(), &key, &rt, "rt");
    }

    pub fn stats(&self, key: &M) -> Option<RtStats> {
        self.cells.get(key).map(|c| c.stats())
    }

    /// Number of keys with at least one observation.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Five gauges per key: LAST, MIN, MAX, SUM, AVG.
    ///
    /// AVG is evaluated from `sum` and `count` each time the sample is read and
    /// is never written back.
    pub fn sample(&self) -> Vec<MetricSample> {
        let mut out = Vec::with_capacity(self.cells.len() * 5);
        for r in self.cells.iter() {
            let key = r.key();
            let tags = key.tags();
            let gauges: [(MetricsKey, fn(&RtCell) -> u64); 5] = [
                (MetricsKey::RtLast, |c: &RtCell| c.last.load(Ordering::Relaxed)),
                (MetricsKey::RtMin, |c: &RtCell| c.min.load(Ordering::Relaxed)),
                (MetricsKey::RtMax, |c: &RtCell| c.max.load(Ordering::Relaxed)),
                (MetricsKey::RtSum, |c: &RtCell| c.sum.load(Ordering::Relaxed)),
                (MetricsKey::RtAvg, RtCell::avg),
            ];
            for (family, read) in gauges {
                let cell = Arc::clone(r.value());
                out.push(MetricSample::gauge(
                    key.sample_name(family),
                    family.description(),
                    tags.clone(),
                    MetricsCategory::Rt,
                    Arc::new(move || read(&cell)),
                ));
            }
        }
        out
    }
}
