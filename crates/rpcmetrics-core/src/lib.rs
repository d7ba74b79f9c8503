//! rpcmetrics core: per-method request counters and RT statistics.
//!
//! This crate holds the aggregation engine shared by every metrics producer:
//! keyed atomic counters, keyed RT cells, and the sample model handed to
//! exporters. It carries no transport or runtime dependencies so any subsystem
//! can plug its own key and event types into [`GenericSampler`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Writers run on the
//! request path of the host process, so nothing in this crate may bring it
//! down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod metric;
pub mod sample;
pub mod sampler;

pub use error::{ErrorKind, MetricsError, Result};
pub use event::{EventType, MetricsKey, STANDARD_COUNTERS};
pub use metric::{Metric, MetricsCategory, Tags};
pub use sample::MetricSample;
pub use sampler::{CountAggregator, GenericSampler, MetricsSampler, RtAggregator, RtStats, SamplerConfig};
