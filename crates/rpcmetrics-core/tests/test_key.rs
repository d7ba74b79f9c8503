//! Minimal metric key shared by the aggregator tests.

#![allow(dead_code)]

use rpcmetrics_core::{Metric, MetricsKey, Tags};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestKey {
    pub method: &'static str,
    pub side: &'static str,
}

impl TestKey {
    pub fn provider(method: &'static str) -> Self {
        Self { method, side: "provider" }
    }

    pub fn consumer(method: &'static str) -> Self {
        Self { method, side: "consumer" }
    }
}

impl Metric for TestKey {
    fn tags(&self) -> Tags {
        let mut tags = Tags::new();
        tags.insert("method".into(), self.method.into());
        tags
    }

    fn sample_name(&self, family: MetricsKey) -> String {
        family.name_by_type(self.side)
    }
}
