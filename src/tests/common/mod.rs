// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::time::Duration;

use prometheus::{Encoder, Registry, TextEncoder};
use reqwest::Client;
use serde_json::Value;

use crate::config::settings::ApiConfig;
use crate::utils::constants::TOKEN_EXPIRATION_METRIC;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig::new(base_url, "glpat-test", Duration::from_secs(5))
}

/// Token object as the listing API returns it.
pub fn token_json(id: i64, name: &str, expires_at: &str, username: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "expires_at": expires_at,
        "username": username,
        "scopes": ["api"],
        "created_at": "2024-01-01T00:00:00.000Z",
        "revoked": false,
        "active": true,
        "access_levels": []
    })
}

pub fn encode_metrics(registry: &Registry) -> String {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Sample lines of the token expiration family.
pub fn expiration_lines(exposition: &str) -> Vec<String> {
    let prefix = format!("{}{{", TOKEN_EXPIRATION_METRIC);
    exposition
        .lines()
        .filter(|line| line.starts_with(&prefix))
        .map(str::to_owned)
        .collect()
}

pub fn expiration_line_for(exposition: &str, token_id: i64) -> Option<String> {
    let label = format!("token_id=\"{}\"", token_id);
    expiration_lines(exposition)
        .into_iter()
        .find(|line| line.contains(&label))
}
