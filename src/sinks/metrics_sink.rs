use prometheus::GaugeVec;

use crate::observability::metrics::ExporterMetrics;

/// Publishes per-token expiration gauges.
#[derive(Clone)]
pub struct MetricSink {
    token_expiration_days: GaugeVec,
}

impl MetricSink {
    pub fn new(metrics: &ExporterMetrics) -> Self {
        Self {
            token_expiration_days: metrics.token_expiration_days.clone(),
        }
    }

    /// Set the gauge for `(name, id, owner)`, creating the series on first use.
    /// Series are never removed.
    pub fn publish(&self, name: &str, id: i64, owner: &str, days: i64) {
        let id = id.to_string();
        self.token_expiration_days
            .with_label_values(&[name, id.as_str(), owner])
            .set(days as f64);
    }
}
