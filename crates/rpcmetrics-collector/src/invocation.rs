//! Invocation model: the source every method metric is derived from.

use serde::Deserialize;

use rpcmetrics_core::EventType;

/// End of the call an invocation was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Provider,
    Consumer,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Provider => "provider",
            Side::Consumer => "consumer",
        }
    }
}

/// One remote method call, as seen by a filter on either side.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub interface: String,
    pub method: String,
    pub group: Option<String>,
    pub version: Option<String>,
    pub side: Side,
}

impl Invocation {
    pub fn new(interface: impl Into<String>, method: impl Into<String>, side: Side) -> Self {
        Self {
            interface: interface.into(),
            method: method.into(),
            group: None,
            version: None,
            side,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// How an invocation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Succeed,
    /// The callee raised an application-level error.
    BusinessFailed,
    Timeout,
    /// Rejected by a rate limiter or concurrency guard.
    Limited,
    UnknownFailed,
}

impl Outcome {
    /// Counter bumped for this outcome, besides TOTAL_FAILED for failures.
    pub fn event_type(self) -> EventType {
        match self {
            Outcome::Succeed => EventType::Succeed,
            Outcome::BusinessFailed => EventType::BusinessFailed,
            Outcome::Timeout => EventType::RequestTimeout,
            Outcome::Limited => EventType::RequestLimit,
            Outcome::UnknownFailed => EventType::UnknownFailed,
        }
    }

    pub fn is_failure(self) -> bool {
        !matches!(self, Outcome::Succeed)
    }
}
