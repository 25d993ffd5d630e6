//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::types::Model;

/// Inbound honeypot check request
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckRequest {
    pub token_address: String,
    /// Caller-provided source code; takes precedence over the explorer fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    /// Classifier backend selection (default: primary)
    #[serde(default)]
    pub model: Model,
}

/// Honeypot check response
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub token_address: String,
    pub is_honeypot: bool,
    pub reasons: Vec<u32>,
    /// Whether the verdict was served from the cache
    pub cached: bool,
}

/// Failure payload: a single human-readable detail string, no structured
/// error codes beyond the HTTP status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
