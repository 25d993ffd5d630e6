//! Service configuration, sourced from environment variables.
//!
//! Every endpoint base URL is overridable so that tests can point the
//! providers at a local mock server.

use std::time::Duration;

use crate::models::errors::{AppError, AppResult};

/// Default Etherscan v2 endpoint (chainid is passed as a query parameter)
const DEFAULT_ETHERSCAN_URL: &str = "https://api.etherscan.io/v2/api";
/// Default xAI endpoint (OpenAI-compatible)
const DEFAULT_XAI_URL: &str = "https://api.x.ai/v1";
const DEFAULT_XAI_MODEL: &str = "grok-3-mini-beta";
/// Default Anthropic endpoint
const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-latest";

/// Configuration for the hpcheck service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind host for the API server
    pub host: String,
    /// Bind port for the API server
    pub port: u16,
    /// Path to the SQLite verdict store
    pub database_path: String,

    /// Etherscan API key (required for source fetching)
    pub etherscan_api_key: String,
    /// Etherscan v2 API endpoint
    pub etherscan_url: String,

    /// xAI API key (primary classifier backend)
    pub xai_api_key: String,
    /// xAI API base URL
    pub xai_url: String,
    /// xAI model name
    pub xai_model: String,

    /// Anthropic API key (secondary classifier backend)
    pub anthropic_api_key: String,
    /// Anthropic API base URL
    pub anthropic_url: String,
    /// Anthropic model name
    pub anthropic_model: String,

    /// Timeout for the explorer source fetch
    pub source_timeout: Duration,
    /// Timeout for one classification call (LLMs are slow)
    pub classifier_timeout: Duration,
}

impl ServiceConfig {
    /// Load configuration from the environment.
    ///
    /// `ETHERSCAN_API_KEY` is required; everything else has a default.
    /// API keys for the classifier backends are read lazily here but only
    /// fail at the backend if a request is actually made without one.
    pub fn from_env() -> AppResult<Self> {
        let etherscan_api_key = std::env::var("ETHERSCAN_API_KEY")
            .map_err(|_| AppError::missing_env("ETHERSCAN_API_KEY"))?;

        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("HPCHECK_PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Ok(Self {
            host: std::env::var("HPCHECK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            database_path: std::env::var("HPCHECK_DB")
                .unwrap_or_else(|_| "hpcheck.db".to_string()),
            etherscan_api_key,
            etherscan_url: std::env::var("ETHERSCAN_URL")
                .unwrap_or_else(|_| DEFAULT_ETHERSCAN_URL.to_string()),
            xai_api_key: std::env::var("XAI_API_KEY").unwrap_or_default(),
            xai_url: std::env::var("XAI_URL").unwrap_or_else(|_| DEFAULT_XAI_URL.to_string()),
            xai_model: std::env::var("XAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_XAI_MODEL.to_string()),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            anthropic_url: std::env::var("ANTHROPIC_URL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_URL.to_string()),
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string()),
            source_timeout: Duration::from_secs(10),
            classifier_timeout: Duration::from_secs(120),
        })
    }

    /// A config with placeholder keys, pointing at the public endpoints.
    /// Tests override the URLs to target a mock server.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_path: ":memory:".to_string(),
            etherscan_api_key: "test-key".to_string(),
            etherscan_url: DEFAULT_ETHERSCAN_URL.to_string(),
            xai_api_key: "test-key".to_string(),
            xai_url: DEFAULT_XAI_URL.to_string(),
            xai_model: DEFAULT_XAI_MODEL.to_string(),
            anthropic_api_key: "test-key".to_string(),
            anthropic_url: DEFAULT_ANTHROPIC_URL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            source_timeout: Duration::from_secs(5),
            classifier_timeout: Duration::from_secs(5),
        }
    }
}
