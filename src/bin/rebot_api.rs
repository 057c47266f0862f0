//! Rebot Intel REST API Server
//!
//! Usage:
//!   cargo run --bin rebot_api
//!
//! Environment:
//!   PORT / REBOT_PORT        - Server port (default: 8080)
//!   REBOT_HOST               - Server host (default: 0.0.0.0)
//!   TRONSCAN_API_KEY         - Optional TronScan key
//!   GENAI_API_KEY            - Generative model key (required for analyze-scam)
//!   PROVIDER_TIMEOUT_SECS    - HTTP timeout for provider calls (default: 30)
//!   RUST_LOG                 - Log filter (default: info)

use rebot_intel::api::{create_router, AppState};
use rebot_intel::utils::constants::{APP_NAME, APP_VERSION};
use rebot_intel::{InMemoryMemoStore, InMemoryRiskCache, ServiceConfig, TronRiskProvider};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    print_banner();

    let config = ServiceConfig::from_env()?;
    if config.genai.api_key.is_none() {
        warn!("⚠️ GENAI_API_KEY not set: analyze-scam will report provider failures");
    }

    let provider = Arc::new(TronRiskProvider::new(&config)?);
    let cache = InMemoryRiskCache::new();
    let state = Arc::new(AppState::new(cache, InMemoryMemoStore::new(), provider));
    let state_for_shutdown = state.clone();

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.api_host, config.api_port).parse()?;

    info!("🚀 {} API v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("");
    info!("Endpoints:");
    info!("  POST /v1/check-address      - Validate address, memos, cached risk score");
    info!("  POST /v1/get-scam-analysis  - Cached scam analysis (read-only)");
    info!("  POST /v1/analyze-scam       - Fresh AI scam analysis (TRON)");
    info!("  GET  /v1/stats              - Risk cache statistics");
    info!("  GET  /v1/health             - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("⚠️ Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("");
    info!("🛑 Shutdown signal received");
    let stats = state_for_shutdown.cache.stats();
    info!("   Cached assessments: {}", stats.entries);
    info!("   Cache hit rate: {:.1}% ({} hits / {} misses)", stats.hit_rate, stats.hits, stats.misses);
    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ==============================================================
                         R E B O T   I N T E L
           Crypto Address Intelligence API  v{}
    ==============================================================
    "#,
        APP_VERSION
    );
}
