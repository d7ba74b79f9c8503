//! rpcmetrics collector library entry.
//!
//! Wires the core aggregation engine to invocations: method keys, the event
//! bus, the collector facade used by RPC filters, the Prometheus text exporter,
//! and the HTTP surface. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod collector;
pub mod config;
pub mod event;
pub mod export;
pub mod invocation;
pub mod method;
pub mod ops;
pub mod router;
pub mod sampler;

pub use collector::DefaultMetricsCollector;
pub use event::{EventMulticaster, MetricsEvent, MetricsListener};
pub use invocation::{Invocation, Outcome, Side};
pub use method::MethodMetric;
pub use sampler::MethodMetricsSampler;
