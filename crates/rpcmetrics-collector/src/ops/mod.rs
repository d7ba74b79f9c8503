//! Operational HTTP endpoints.
//!
//! - `/healthz`    : liveness
//! - `/metrics`    : Prometheus text format (path configurable)
//! - `/v1/report`  : invocation reports from out-of-process filters

use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use rpcmetrics_core::error::{ErrorKind, MetricsError, Result};

use crate::app_state::AppState;
use crate::export::prometheus;
use crate::invocation::{Invocation, Outcome, Side};

/// Error wrapper mapping [`MetricsError`] onto an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub MetricsError);

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = match kind {
            ErrorKind::BadRequest | ErrorKind::BadConfig => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({ "code": kind.as_str(), "msg": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = prometheus::render(&state.collector().collect());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, prometheus::CONTENT_TYPE)],
        body,
    )
        .into_response()
}

/// Largest accepted `rt` in a report: one day, in milliseconds.
pub const MAX_REPORT_RT_MS: u64 = 86_400_000;

/// One finished invocation reported by a remote filter.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportRequest {
    pub interface: String,
    pub method: String,
    pub side: Side,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub outcome: Outcome,
    /// Elapsed time in milliseconds.
    pub rt: u64,
}

impl ReportRequest {
    fn into_invocation(self) -> Result<(Invocation, Outcome, Duration)> {
        if self.interface.trim().is_empty() {
            return Err(MetricsError::BadRequest("interface must not be empty".into()));
        }
        if self.method.trim().is_empty() {
            return Err(MetricsError::BadRequest("method must not be empty".into()));
        }
        if self.rt > MAX_REPORT_RT_MS {
            return Err(MetricsError::BadRequest(format!(
                "rt must be at most {MAX_REPORT_RT_MS} ms, got {}",
                self.rt
            )));
        }
        let mut inv = Invocation::new(self.interface, self.method, self.side);
        inv.group = self.group.filter(|g| !g.is_empty());
        inv.version = self.version.filter(|v| !v.is_empty());
        Ok((inv, self.outcome, Duration::from_millis(self.rt)))
    }
}

pub async fn report(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> std::result::Result<StatusCode, ApiError> {
    let (inv, outcome, elapsed) = req.into_invocation()?;
    let collector = state.collector();
    collector.on_invoke(&inv);
    collector.on_complete(&inv, outcome, elapsed);
    Ok(StatusCode::ACCEPTED)
}
