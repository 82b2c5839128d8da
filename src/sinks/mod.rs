pub mod metrics_sink;
