use std::time::Duration;

use clap::Parser;

use crate::config::settings::{
    ApiConfig, ExporterSettings, LogFormat, LogLevel, LoggingConfig, MetricsConfig, ServerConfig,
};
use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_METRICS_PATH,
    DEFAULT_POLL_INTERVAL_SECS,
};

/// Every option is bound to an environment variable. Presence of the API
/// url and credential is not validated: empty values make every fetch fail.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "API_URL", default_value = "")]
    pub api_url: String,
    #[arg(long, env = "PERSONAL_ACCESS_TOKEN", default_value = "", hide_env_values = true)]
    pub personal_access_token: String,
    #[arg(long, env = "POLL_INTERVAL_SECONDS", default_value_t = DEFAULT_POLL_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_seconds: u64,
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub http_timeout_seconds: u64,
    #[arg(long, env = "LISTEN_HOST", default_value = DEFAULT_LISTEN_HOST)]
    pub listen_host: String,
    #[arg(long, env = "LISTEN_PORT", default_value_t = DEFAULT_LISTEN_PORT)]
    pub listen_port: u16,
    #[arg(long, env = "METRICS_PATH", default_value = DEFAULT_METRICS_PATH)]
    pub metrics_path: String,
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn into_settings(self) -> ExporterSettings {
        ExporterSettings {
            api: ApiConfig::new(
                &self.api_url,
                &self.personal_access_token,
                Duration::from_secs(self.http_timeout_seconds),
            ),
            poll_interval: Duration::from_secs(self.poll_interval_seconds),
            server: ServerConfig {
                host: self.listen_host,
                port: self.listen_port,
            },
            metrics: MetricsConfig::new(&self.metrics_path),
            logging: LoggingConfig::new(self.log_level, self.log_format),
        }
    }
}
