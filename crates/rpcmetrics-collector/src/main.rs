//! rpcmetrics collector
//!
//! Loads the collector config, then serves:
//! - `GET /metrics` (or `export.path`): Prometheus scrape endpoint
//! - `POST /v1/report`: invocation reports
//! - `GET /healthz`
//!
//! Config path: first CLI argument, default `rpcmetrics.yaml`.

use tracing_subscriber::{fmt, EnvFilter};

use rpcmetrics_core::error::{MetricsError, Result};
use rpcmetrics_collector::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.kind().as_str(), "rpcmetrics-collector failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "rpcmetrics.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.export.listen_addr()?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "rpcmetrics-collector starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricsError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MetricsError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
