//! API Request Handlers

use axum::extract::{Json, State};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::types::*;
use crate::core::composer::{AnalysisReportResponse, CheckAddressResponse};
use crate::core::service::AddressIntelService;
use crate::core::traits::RiskProvider;
use crate::utils::{InMemoryMemoStore, InMemoryRiskCache};

/// Shared application state
pub struct AppState {
    pub service: AddressIntelService,
    pub cache: InMemoryRiskCache,
    pub memos: InMemoryMemoStore,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        cache: InMemoryRiskCache,
        memos: InMemoryMemoStore,
        provider: Arc<dyn RiskProvider>,
    ) -> Self {
        let service = AddressIntelService::new(
            Arc::new(cache.clone()),
            Arc::new(memos.clone()),
            provider,
        );
        Self {
            service,
            cache,
            memos,
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

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// Address Operations
// ============================================

/// Validation + memos + cached risk score
pub async fn check_address(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddressRequest>,
) -> Json<CheckAddressResponse> {
    info!("🔍 check-address: {} (hint: {:?})", req.crypto_address, req.blockchain_type);
    Json(state.service.check_address(&req.crypto_address, req.hint()).await)
}

/// Read-only report, never calls the provider
pub async fn get_scam_analysis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddressRequest>,
) -> Json<AnalysisReportResponse> {
    info!("📖 get-scam-analysis: {} (hint: {:?})", req.crypto_address, req.blockchain_type);
    Json(state.service.get_analysis(&req.crypto_address, req.hint()).await)
}

/// Fresh analysis through the provider. May take several seconds.
pub async fn analyze_scam(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddressRequest>,
) -> Json<AnalysisReportResponse> {
    info!("🧠 analyze-scam: {} (hint: {:?})", req.crypto_address, req.blockchain_type);
    Json(state.service.trigger_analysis(&req.crypto_address, req.hint()).await)
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let cache_stats = state.cache.stats();

    let data = StatsData {
        cached_assessments: cache_stats.entries,
        cache_hits: cache_stats.hits,
        cache_misses: cache_stats.misses,
        cache_hit_rate: cache_stats.hit_rate,
        uptime_seconds: state.uptime_seconds(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    info!("📊 Cache Stats: {} entries, {:.1}% hit rate ({} hits / {} misses)",
          cache_stats.entries, cache_stats.hit_rate, cache_stats.hits, cache_stats.misses);

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}
