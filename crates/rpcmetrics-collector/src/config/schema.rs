use std::net::SocketAddr;

use serde::Deserialize;
use rpcmetrics_core::error::{MetricsError, Result};
use rpcmetrics_core::Tags;

use crate::export::prometheus::{is_valid_label, sanitize_label};
use crate::method::RESERVED_TAGS;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub version: u32,

    /// Application name stamped on every metric key.
    pub application: String,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub export: ExportSection,
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }
        if self.application.trim().is_empty() {
            return Err(MetricsError::BadConfig("application must not be empty".into()));
        }

        self.metrics.validate()?;
        self.export.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Log every published metrics event at TRACE level.
    #[serde(default)]
    pub log_events: bool,

    /// Added to the tags of every method key.
    #[serde(default)]
    pub extra_tags: Tags,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            log_events: false,
            extra_tags: Tags::new(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        for k in self.extra_tags.keys() {
            if !is_valid_label(k) || k.starts_with("__") {
                return Err(MetricsError::BadConfig(format!(
                    "metrics.extra_tags key must match [a-zA-Z_][a-zA-Z0-9_]* and not start with '__': {k:?}"
                )));
            }
            // built-in tags are compared as they are exported
            if RESERVED_TAGS.iter().any(|r| sanitize_label(r) == *k) {
                return Err(MetricsError::BadConfig(format!(
                    "metrics.extra_tags must not override built-in tag: {k}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
        }
    }
}

impl ExportSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(MetricsError::BadConfig(
                "export.path must start with '/' and name a route".into(),
            ));
        }
        if self.path == "/healthz" || self.path == "/v1/report" {
            return Err(MetricsError::BadConfig(format!(
                "export.path collides with a built-in route: {}",
                self.path
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MetricsError::BadConfig(format!("export.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_enabled() -> bool {
    true
}
fn default_listen() -> String {
    "0.0.0.0:9464".into()
}
fn default_path() -> String {
    "/metrics".into()
}
