//! hpcheck API Server
//!
//! REST service for LLM-backed honeypot classification with a persistent
//! verdict cache.
//!
//! Usage:
//!   cargo run --bin hpcheck_api
//!
//! Environment:
//!   ETHERSCAN_API_KEY - required, explorer API key
//!   XAI_API_KEY       - primary classifier backend key
//!   ANTHROPIC_API_KEY - secondary classifier backend key
//!   HPCHECK_DB        - SQLite path (default: hpcheck.db)
//!   PORT              - server port (default: 8000)
//!   RUST_LOG          - log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hpcheck::api::handlers::AppState;
use hpcheck::api::create_router;
use hpcheck::{
    Analyzer, Classifier, ClaudeClient, EtherscanClient, GrokClient, ServiceConfig,
    SourceProvider, VerdictStore,
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ServiceConfig::from_env()?;

    let store = VerdictStore::connect(&config.database_path).await?;

    let source: Arc<dyn SourceProvider> = Arc::new(EtherscanClient::new(&config));
    let primary: Arc<dyn Classifier> = Arc::new(GrokClient::new(&config));
    let secondary: Arc<dyn Classifier> = Arc::new(ClaudeClient::new(&config));

    let analyzer = Analyzer::new(store, source, primary, secondary);
    let state = Arc::new(AppState::new(analyzer));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🚀 hpcheck API starting on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /check-honeypot  - classify a token (cached, idempotent)");
    info!("  GET  /health          - health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 hpcheck API shutdown complete");

    Ok(())
}
