use std::sync::Arc;

use anyhow::Result;
use http::StatusCode;
use reqwest::Client;
use tracing::debug;

use crate::config::settings::ApiConfig;
use crate::observability::metrics::ExporterMetrics;
use crate::sources::error::FetchError;
use crate::sources::token::TokenRecord;
use crate::utils::constants::{FIRST_PAGE, PAGE_QUERY_PARAM, TOKENS_PATH};

pub trait FetchTokens {
    /// Fetch every page of the listing. Either all records or an error,
    /// never a partial result.
    fn fetch_all_tokens(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TokenRecord>, FetchError>> + Send;
}

/// Paginating client for `<base-url>/personal_access_tokens`.
#[derive(Clone)]
pub struct TokenClient {
    client: Client,
    api: ApiConfig,
    metrics: Arc<ExporterMetrics>,
}

impl TokenClient {
    pub fn new(api: &ApiConfig, metrics: Arc<ExporterMetrics>) -> Result<Self> {
        let client = Client::builder().timeout(api.timeout).build()?;
        Ok(Self {
            client,
            api: api.clone(),
            metrics,
        })
    }

    pub fn tokens_url(&self) -> String {
        format!("{}{}", self.api.base_url, TOKENS_PATH)
    }

    /// Fetch a single page. Anything but `200 OK` is an error.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<TokenRecord>, FetchError> {
        let response = self
            .client
            .get(self.tokens_url())
            .query(&[(PAGE_QUERY_PARAM, page)])
            .bearer_auth(&self.api.access_token)
            .send()
            .await
            .map_err(|source| FetchError::Network { page, source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { page, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network { page, source })?;
        self.metrics.pages_fetched.inc();

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { page, source })
    }
}

impl FetchTokens for TokenClient {
    async fn fetch_all_tokens(&self) -> Result<Vec<TokenRecord>, FetchError> {
        let mut all_tokens = Vec::new();
        let mut page = FIRST_PAGE;

        loop {
            let tokens = self.fetch_page(page).await?;
            debug!(page, count = tokens.len(), "fetched token page");
            if tokens.is_empty() {
                break;
            }
            all_tokens.extend(tokens);
            page += 1;
        }

        Ok(all_tokens)
    }
}
