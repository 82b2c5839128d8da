use std::time::Duration;

use clap::ValueEnum;

/// ================================
/// Exporter-wide settings
/// ================================
#[derive(Debug, Clone)]
pub struct ExporterSettings {
    pub api: ApiConfig,
    pub poll_interval: Duration,
    pub server: ServerConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

/// ================================
/// Upstream token listing API
/// ================================
#[derive(Clone)]
pub struct ApiConfig {
    /// base url without trailing slash
    pub base_url: String,
    /// bearer credential, never logged
    pub access_token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
            timeout,
        }
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub path: String,
}

impl MetricsConfig {
    pub fn new(path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{}", path)
        };
        Self { path }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: LogLevel, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Compact,
}
