use std::sync::Arc;

use crate::config::settings::MetricsConfig;
use crate::server::server::AppState;
use crate::utils::constants::METRICS_CONTENT_TYPE;
use axum::routing::get;
use axum::{extract::State, response::IntoResponse, response::Response, Router};
use http::{header::CONTENT_TYPE, StatusCode};
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::error;

#[derive(Clone)]
pub struct MetricsState {
    pub registry: Arc<Registry>,
}

impl MetricsState {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn router(&self, metrics_config: &MetricsConfig) -> Router<AppState> {
        Router::new().route(metrics_config.path.as_str(), get(get_metrics))
    }
}

/// Serves whatever was last set. Never waits on a poll cycle.
async fn get_metrics(State(state): State<AppState>) -> Response {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics_state.registry.gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!("failed to encode metrics: {}", err);
        return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [(CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        buffer,
    )
        .into_response()
}
