//! Top-level facade crate for rpcmetrics.
//!
//! Re-exports the aggregation core and the collector so users can depend on a single crate.

pub mod core {
    pub use rpcmetrics_core::*;
}

pub mod collector {
    pub use rpcmetrics_collector::*;
}
