//! API Request Handlers

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use super::types::{CheckRequest, CheckResponse, ErrorDetail, HealthData};
use crate::core::analyzer::Analyzer;

/// Shared application state
pub struct AppState {
    pub analyzer: Analyzer,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

// ============================================
// Honeypot Check
// ============================================

pub async fn check_honeypot(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, (StatusCode, Json<ErrorDetail>)> {
    let start = Instant::now();
    info!("🔍 honeypot check requested for {}", req.token_address);

    match state
        .analyzer
        .analyze(&req.token_address, req.source_code, req.model)
        .await
    {
        Ok(outcome) => {
            info!(
                "✅ {} -> honeypot={} cached={} ({} ms)",
                outcome.verdict.token_address,
                outcome.verdict.is_honeypot,
                outcome.cached,
                start.elapsed().as_millis()
            );
            Ok(Json(CheckResponse {
                token_address: outcome.verdict.token_address,
                is_honeypot: outcome.verdict.is_honeypot,
                reasons: outcome.verdict.reasons,
                cached: outcome.cached,
            }))
        }
        Err(e) => {
            error!("❌ honeypot check failed for {}: {}", req.token_address, e);
            let status = StatusCode::from_u16(e.code.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err((
                status,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            ))
        }
    }
}
