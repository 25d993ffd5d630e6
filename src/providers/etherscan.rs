//! Etherscan Source Provider
//!
//! Resolves a token address to its verified contract source via the
//! Etherscan v2 API. A single transient failure surfaces to the caller;
//! there is no retry built in.
//!
//! API: GET {base}?chainid=1&module=contract&action=getsourcecode&address=..
//! The envelope carries a top-level `status` field and an array of results;
//! the first result's `SourceCode` field is the contract text.

use async_trait::async_trait;
use tracing::info;

use crate::models::config::ServiceConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};

/// Resolves a token address to verified contract source text.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_source(&self, token_address: &str) -> AppResult<String>;
}

/// Etherscan v2 API client
pub struct EtherscanClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.source_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.etherscan_url.clone(),
            api_key: config.etherscan_api_key.clone(),
        }
    }
}

#[async_trait]
impl SourceProvider for EtherscanClient {
    async fn fetch_source(&self, token_address: &str) -> AppResult<String> {
        info!("🔍 Etherscan: fetching verified source for {}", token_address);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("chainid", "1"),
                ("module", "contract"),
                ("action", "getsourcecode"),
                ("address", token_address),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorCode::SourceFetchFailed, "explorer request failed", e)
            })?;

        if !response.status().is_success() {
            return Err(AppError::source_fetch(format!(
                "explorer returned HTTP {}",
                response.status()
            )));
        }

        // `result` is an array on success but a plain string on some error
        // payloads, so the envelope is walked as a Value.
        let body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorCode::SourceFetchFailed,
                "explorer response was not valid JSON",
                e,
            )
        })?;

        if body["status"].as_str() != Some("1") {
            let message = body["message"].as_str().unwrap_or("Unknown error");
            return Err(AppError::source_fetch(format!(
                "explorer API error: {}",
                message
            )));
        }

        let source = body["result"][0]["SourceCode"].as_str().unwrap_or("");
        if source.is_empty() {
            return Err(AppError::source_not_verified(format!(
                "contract source code not found for {}",
                token_address
            )));
        }

        info!("📄 Etherscan: {} bytes of source for {}", source.len(), token_address);
        Ok(source.to_string())
    }
}
