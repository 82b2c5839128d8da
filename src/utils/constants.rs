//! Shared constants and invariants

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 8080;
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

// Upstream API
pub const TOKENS_PATH: &str = "/personal_access_tokens";
pub const PAGE_QUERY_PARAM: &str = "page";
pub const FIRST_PAGE: u32 = 1;

// Expiration
/// Tokens carrying exactly this name are fetched but never published.
pub const REDACTED_TOKEN_NAME: &str = "Private Token";
/// Length of a date-only `YYYY-MM-DD` value.
pub const DATE_ONLY_LEN: usize = 10;
pub const END_OF_DAY_SUFFIX: &str = "T23:59:59Z";
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

// Metric names
pub const TOKEN_EXPIRATION_METRIC: &str = "gitlab_token_expiration_days";
pub const TOKEN_EXPIRATION_HELP: &str = "Days until GitLab personal access token expiration";
pub const LABEL_TOKEN_NAME: &str = "token_name";
pub const LABEL_TOKEN_ID: &str = "token_id";
pub const LABEL_TOKEN_OWNER: &str = "token_owner";
pub const SELF_METRICS_PREFIX: &str = "token_exporter";
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";
