//! Aggregation engine: keyed counters, keyed RT cells, and the generic
//! sampler that ties them to a source type.
//!
//! Writers only touch atomics. Map shards are locked just long enough to look
//! up or insert a cell (`DashMap::entry`), never across a counter update or a
//! handler call, so scrapes and writers never wait on each other for longer
//! than one map lookup.

pub mod count;
pub mod generic;
pub mod rt;

use std::fmt::Debug;
use std::hash::Hash;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::Result;
use crate::sample::MetricSample;

pub use count::{CountAggregator, CounterMap};
pub use generic::GenericSampler;
pub use rt::{RtAggregator, RtStats};

/// Produces a fresh snapshot of samples on every call.
pub trait MetricsSampler: Send + Sync {
    fn sample(&self) -> Vec<MetricSample>;
}

/// Event type a counter is indexed by.
pub trait EventKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> EventKind for T where T: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

/// Maps a raw source (e.g. an invocation) to its metric key.
pub type KeyFactory<S, M> = Arc<dyn Fn(&S) -> M + Send + Sync>;

/// Post-update hook, called with the key and the payload that was applied.
pub type Handler<M, P> = Arc<dyn Fn(&M, &P) -> Result<()> + Send + Sync>;

/// Construction-time hooks for one lane (counts or RT) of a sampler.
pub struct SamplerConfig<S, M, P> {
    key_factory: KeyFactory<S, M>,
    handler: Option<Handler<M, P>>,
}

impl<S, M, P> SamplerConfig<S, M, P> {
    pub fn new(key_factory: impl Fn(&S) -> M + Send + Sync + 'static) -> Self {
        Self {
            key_factory: Arc::new(key_factory),
            handler: None,
        }
    }

    /// Attach the handler invoked after every committed update.
    pub fn with_handler(
        mut self,
        handler: impl Fn(&M, &P) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }
}

/// Run a post-update handler. Failures are reported and swallowed: the update
/// it follows is already committed and stays committed.
pub(crate) fn notify<M: Debug, P: Debug>(
    handler: Option<&Handler<M, P>>,
    key: &M,
    payload: &P,
    lane: &'static str,
) {
    let Some(handler) = handler else { return };
    match catch_unwind(AssertUnwindSafe(|| handler(key, payload))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(lane, key = ?key, payload = ?payload, error = %e, code = e.kind().as_str(), "metrics handler failed");
        }
        Err(_) => {
            tracing::warn!(lane, key = ?key, payload = ?payload, "metrics handler panicked");
        }
    }
}
