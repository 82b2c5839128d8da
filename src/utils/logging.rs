use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::settings::{LogFormat, LoggingConfig};

/// `RUST_LOG` wins over the configured level when it is set and valid.
pub fn env_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.level.as_directive()))
}

/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(cfg));

    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true) // flat fields for CRI log parsers
                .with_ansi(false);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::LogLevel;
    use serial_test::serial;

    #[test]
    #[serial]
    fn configured_level_becomes_the_filter() {
        std::env::remove_var("RUST_LOG");
        let cfg = LoggingConfig::new(LogLevel::Warn, LogFormat::Compact);

        assert_eq!(env_filter(&cfg).to_string(), "warn");
    }

    #[test]
    #[serial]
    fn rust_log_overrides_configured_level() {
        std::env::set_var("RUST_LOG", "token_expiry_exporter=trace");
        let cfg = LoggingConfig::new(LogLevel::Info, LogFormat::Json);
        let filter = env_filter(&cfg).to_string();
        std::env::remove_var("RUST_LOG");

        assert_eq!(filter, "token_expiry_exporter=trace");
    }
}
