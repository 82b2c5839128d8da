use anyhow::Result;
use prometheus::{GaugeVec, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tracing::info;

use crate::utils::constants::{
    LABEL_TOKEN_ID, LABEL_TOKEN_NAME, LABEL_TOKEN_OWNER, SELF_METRICS_PREFIX, TOKEN_EXPIRATION_HELP,
    TOKEN_EXPIRATION_METRIC,
};

/// Registry shared by the poll loop (writer) and the metrics route (reader).
/// Every instance owns its own `Registry`.
#[derive(Clone)]
pub struct ExporterMetrics {
    pub registry: Registry,

    // Token metrics
    pub token_expiration_days: GaugeVec,

    // Poll metrics
    pub poll_cycles: IntCounterVec,
    pub fetch_failures: IntCounterVec,
    pub fetch_duration: Histogram,
    pub pages_fetched: IntCounter,
    pub date_parse_failures: IntCounter,
    pub last_success_timestamp: IntGauge,

    // Runtime
    pub up: IntGauge,
}

impl ExporterMetrics {
    pub fn new() -> Result<Arc<Self>> {
        info!("Initializing Metrics ...");
        let registry = Registry::new();

        let metrics = Arc::new(Self {
            token_expiration_days: GaugeVec::new(Opts::new(TOKEN_EXPIRATION_METRIC, TOKEN_EXPIRATION_HELP), &[LABEL_TOKEN_NAME, LABEL_TOKEN_ID, LABEL_TOKEN_OWNER])?,

            poll_cycles: IntCounterVec::new(Opts::new("poll_cycles_total", "Poll cycles by result").namespace(SELF_METRICS_PREFIX), &["result"])?,
            fetch_failures: IntCounterVec::new(Opts::new("fetch_failures_total", "Token listing fetch failures by reason").namespace(SELF_METRICS_PREFIX), &["reason"])?,
            fetch_duration: Histogram::with_opts(HistogramOpts::new("fetch_duration_seconds", "Duration of a full token listing fetch").namespace(SELF_METRICS_PREFIX).buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]))?,
            pages_fetched: IntCounter::with_opts(Opts::new("pages_fetched_total", "Token listing pages fetched").namespace(SELF_METRICS_PREFIX))?,
            date_parse_failures: IntCounter::with_opts(Opts::new("date_parse_failures_total", "Tokens skipped because of an unparseable expiration date").namespace(SELF_METRICS_PREFIX))?,
            last_success_timestamp: IntGauge::with_opts(Opts::new("last_success_timestamp_seconds", "Unix time of the last successful poll cycle").namespace(SELF_METRICS_PREFIX))?,

            up: IntGauge::with_opts(Opts::new("up", "1 if the metrics server is listening").namespace(SELF_METRICS_PREFIX))?,

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_expiration_days.clone()))?;
        reg.register(Box::new(metrics.poll_cycles.clone()))?;
        reg.register(Box::new(metrics.fetch_failures.clone()))?;
        reg.register(Box::new(metrics.fetch_duration.clone()))?;
        reg.register(Box::new(metrics.pages_fetched.clone()))?;
        reg.register(Box::new(metrics.date_parse_failures.clone()))?;
        reg.register(Box::new(metrics.last_success_timestamp.clone()))?;
        reg.register(Box::new(metrics.up.clone()))?;

        Ok(metrics)
    }
}
