use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch::Receiver;
use tracing::info;

use crate::config::settings::{ExporterSettings, MetricsConfig};
use crate::observability::metrics::ExporterMetrics;
use crate::observability::routes::MetricsState;
use crate::utils::shutdown;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
}

impl AppState {
    pub fn new(metrics: &ExporterMetrics) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
        }
    }
}

/// The metrics route is the only inbound endpoint.
pub fn app(metrics: &ExporterMetrics, metrics_config: &MetricsConfig) -> Router {
    let state = AppState::new(metrics);
    state
        .metrics_state
        .router(metrics_config)
        .with_state(state)
}

/// Bind the configured address and serve until shutdown.
pub async fn start(
    settings: &ExporterSettings,
    metrics: Arc<ExporterMetrics>,
    shutdown: Receiver<bool>,
) -> Result<()> {
    let bind_addr = settings.server.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind metrics server on {}", bind_addr))?;
    let app = app(&metrics, &settings.metrics);
    serve(listener, app, metrics, shutdown).await
}

pub async fn serve(
    listener: TcpListener,
    app: Router,
    metrics: Arc<ExporterMetrics>,
    shutdown: Receiver<bool>,
) -> Result<()> {
    info!(address = %listener.local_addr()?, "metrics server listening");
    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait(shutdown))
        .await?;
    metrics.up.set(0);
    info!("metrics server stopped");
    Ok(())
}
