use http::StatusCode;
use thiserror::Error;

/// Failure of a token listing fetch. Any of these aborts the whole cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for page {page} failed: {source}")]
    Network {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("token API returned status code {status} for page {page}")]
    Status { page: u32, status: StatusCode },

    #[error("malformed token listing on page {page}: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn page(&self) -> u32 {
        match self {
            FetchError::Network { page, .. }
            | FetchError::Status { page, .. }
            | FetchError::Decode { page, .. } => *page,
        }
    }

    /// Metric label
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Status { .. } => "status",
            FetchError::Decode { .. } => "decode",
        }
    }
}
