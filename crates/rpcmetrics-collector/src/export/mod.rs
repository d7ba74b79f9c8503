//! Sample exporters.
//!
//! Only the Prometheus text exposition format is provided; it is rendered on
//! demand by the `/metrics` handler.

pub mod prometheus;
