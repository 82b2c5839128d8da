use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::watch::Receiver;
use tracing::{debug, error, info, warn};

use crate::expiration::evaluator::days_until_expiration;
use crate::helpers::time::{get_instant, now_utc};
use crate::observability::metrics::ExporterMetrics;
use crate::sinks::metrics_sink::MetricSink;
use crate::sources::client::FetchTokens;
use crate::sources::error::FetchError;
use crate::utils::shutdown;

static SUCCESS_MSG: &str = "success";
static FAILURE_MSG: &str = "failure";

/// Outcome of one successful fetch/evaluate/publish pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub published: usize,
    pub redacted: usize,
    /// records with a missing or unparseable expiration
    pub skipped: usize,
}

pub struct PollLoop<S> {
    source: S,
    sink: MetricSink,
    metrics: Arc<ExporterMetrics>,
    interval: Duration,
}

impl<S: FetchTokens + Sync> PollLoop<S> {
    pub fn new(source: S, metrics: Arc<ExporterMetrics>, interval: Duration) -> Self {
        Self {
            source,
            sink: MetricSink::new(&metrics),
            metrics,
            interval,
        }
    }

    /// One Fetching pass. A fetch error aborts the cycle before anything is
    /// published, leaving previous gauge values as they were.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> Result<CycleReport, FetchError> {
        let start = get_instant();
        let fetched = self.source.fetch_all_tokens().await;
        self.metrics.fetch_duration.observe(start.elapsed().as_secs_f64());

        let tokens = fetched.inspect_err(|err| {
            self.metrics.fetch_failures.with_label_values(&[err.reason()]).inc();
            self.metrics.poll_cycles.with_label_values(&[FAILURE_MSG]).inc();
        })?;

        let mut report = CycleReport {
            fetched: tokens.len(),
            ..Default::default()
        };

        for token in &tokens {
            match days_until_expiration(token, now) {
                Err(err) => {
                    warn!(token_id = token.id, token_name = %token.name, "skipping token: {}", err);
                    self.metrics.date_parse_failures.inc();
                    report.skipped += 1;
                }
                Ok(evaluation) if !evaluation.should_publish => {
                    debug!(token_id = token.id, "token name is redacted, not published");
                    report.redacted += 1;
                }
                Ok(evaluation) => {
                    self.sink.publish(&token.name, token.id, &token.username, evaluation.days);
                    report.published += 1;
                }
            }
        }

        self.metrics.poll_cycles.with_label_values(&[SUCCESS_MSG]).inc();
        self.metrics.last_success_timestamp.set(now.timestamp());
        Ok(report)
    }

    /// Alternate Fetching and Sleeping until shutdown is signalled.
    /// The first cycle starts immediately.
    pub async fn run(self, shutdown: Receiver<bool>) -> Result<()> {
        let cycles = async {
            loop {
                info!("poll cycle start");
                match self.run_cycle(now_utc()).await {
                    Ok(report) => info!(
                        fetched = report.fetched,
                        published = report.published,
                        redacted = report.redacted,
                        skipped = report.skipped,
                        "poll cycle finished"
                    ),
                    Err(err) => error!(
                        page = err.page(),
                        reason = err.reason(),
                        "error fetching tokens, cycle skipped: {}",
                        err
                    ),
                }

                debug!("sleep interval {} seconds", self.interval.as_secs());
                tokio::time::sleep(self.interval).await;
            }
        };

        tokio::select! {
            _ = cycles => {}
            _ = shutdown::wait(shutdown) => {
                info!("poll loop stopped");
            }
        }
        Ok(())
    }
}
