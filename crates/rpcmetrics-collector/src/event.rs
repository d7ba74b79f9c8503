//! In-process event bus for metric updates.
//!
//! Every committed counter or RT update is published here after the fact.
//! Delivery is synchronous and fire-and-forget: listener failures are logged
//! and never reach the code that triggered the update.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use dashmap::DashMap;

use rpcmetrics_core::error::Result;
use rpcmetrics_core::EventType;

use crate::method::MethodMetric;

/// Published after an update to a method's metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsEvent {
    /// A request counter was incremented.
    Request { metric: MethodMetric, event: EventType },
    /// An RT observation was recorded.
    Rt { metric: MethodMetric, rt: u64 },
}

impl MetricsEvent {
    pub fn metric(&self) -> &MethodMetric {
        match self {
            MetricsEvent::Request { metric, .. } | MetricsEvent::Rt { metric, .. } => metric,
        }
    }
}

/// Consumer of metrics events. Must be fast: it runs on the caller's thread.
pub trait MetricsListener: Send + Sync {
    fn name(&self) -> &'static str;
    fn on_event(&self, event: &MetricsEvent) -> Result<()>;
}

/// Registry of listeners, keyed by name.
#[derive(Default)]
pub struct EventMulticaster {
    listeners: DashMap<&'static str, Arc<dyn MetricsListener>>,
}

impl EventMulticaster {
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
        }
    }

    /// Register a listener, replacing any previous one with the same name.
    pub fn add_listener(&self, listener: Arc<dyn MetricsListener>) {
        self.listeners.insert(listener.name(), listener);
    }

    pub fn remove_listener(&self, name: &str) -> bool {
        self.listeners.remove(name).is_some()
    }

    pub fn listener_names(&self) -> Vec<&'static str> {
        self.listeners.iter().map(|e| *e.key()).collect()
    }

    /// Deliver `event` to every listener.
    pub fn publish(&self, event: MetricsEvent) {
        // Snapshot first so listeners may (un)register without holding a shard.
        let listeners: Vec<Arc<dyn MetricsListener>> =
            self.listeners.iter().map(|e| Arc::clone(e.value())).collect();

        for l in listeners {
            match catch_unwind(AssertUnwindSafe(|| l.on_event(&event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(listener = l.name(), error = %e, code = e.kind().as_str(), "metrics listener failed");
                }
                Err(_) => {
                    tracing::warn!(listener = l.name(), "metrics listener panicked");
                }
            }
        }
    }
}

/// Logs every event at TRACE level.
pub struct LoggingListener;

impl MetricsListener for LoggingListener {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn on_event(&self, event: &MetricsEvent) -> Result<()> {
        let m = event.metric();
        match event {
            MetricsEvent::Request { event, .. } => {
                tracing::trace!(interface = m.interface(), method = m.method(), side = m.side().as_str(), event = event.as_str(), "request event");
            }
            MetricsEvent::Rt { rt, .. } => {
                tracing::trace!(interface = m.interface(), method = m.method(), side = m.side().as_str(), rt, "rt event");
            }
        }
        Ok(())
    }
}
