use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One personal access token as reported by the listing API.
///
/// Only `id`, `name`, `username` and `expires_at` drive the exporter; the
/// remaining fields are decoded so a malformed listing is still rejected.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TokenRecord {
    pub id: i64,
    pub name: String,
    /// `YYYY-MM-DD` or a full RFC 3339 timestamp
    pub expires_at: Option<String>,
    pub username: String,
    pub scopes: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub revoked: bool,
    pub active: bool,
    pub access_levels: Vec<String>,
}
