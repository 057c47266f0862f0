//! API Route Configuration
//!
//! Every address operation answers HTTP 200; the outcome lives in the
//! `status` field of the body. No authentication.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::logging_middleware;

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health & Status
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats))
        // Address intelligence
        .route("/check-address", post(handlers::check_address))
        .route("/get-scam-analysis", post(handlers::get_scam_analysis))
        .route("/analyze-scam", post(handlers::analyze_scam));

    Router::new()
        .nest("/v1", api_v1)
        .route("/health", get(handlers::health_check))
        .with_state(state)
        // Middleware (order matters - bottom runs first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{ProviderReport, RiskProvider};
    use crate::models::{AppResult, BlockchainFamily, Memo};
    use crate::utils::{InMemoryMemoStore, InMemoryRiskCache};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const TRON_ADDR: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
    const EVM_ADDR: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

    struct StaticProvider;

    #[async_trait]
    impl RiskProvider for StaticProvider {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn assess(&self, _: &str, _: BlockchainFamily) -> AppResult<ProviderReport> {
            Ok(ProviderReport {
                score: 0.42,
                report: "This is a WALLET address. Nothing unusual.".to_string(),
            })
        }
    }

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(
            InMemoryRiskCache::new(),
            InMemoryMemoStore::new(),
            Arc::new(StaticProvider),
        ));
        (create_router(state.clone()), state)
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/health", "/v1/health"] {
            let (router, _) = app();
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = router.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["data"]["status"], "healthy");
        }
    }

    #[tokio::test]
    async fn test_check_address_clarification() {
        let (router, _) = app();
        let (status, body) =
            post_json(router, "/v1/check-address", json!({"crypto_address": EVM_ADDR})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "CLARIFICATION_NEEDED");
        assert_eq!(body["possible_blockchains"], json!(["ethereum", "bsc"]));
    }

    #[tokio::test]
    async fn test_check_address_with_memos() {
        let (router, state) = app();
        state
            .memos
            .add_memo(Memo::public(TRON_ADDR, BlockchainFamily::Tron, "reported drainer", 9));

        let (_, body) =
            post_json(router, "/v1/check-address", json!({"crypto_address": TRON_ADDR})).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["blockchain"], "tron");
        assert_eq!(body["public_memos"], json!(["reported drainer"]));
        assert!(body.get("risk_score").is_none());
    }

    #[tokio::test]
    async fn test_analyze_then_report() {
        let (router, state) = app();

        let (_, analyzed) = post_json(
            router.clone(),
            "/v1/analyze-scam",
            json!({"crypto_address": TRON_ADDR}),
        )
        .await;
        assert_eq!(analyzed["status"], "OK");
        assert_eq!(analyzed["message"], "Scam analysis completed.");
        assert_eq!(analyzed["risk_score"], 0.42);
        assert_eq!(analyzed["address_analyzed"], true);

        let (_, report) = post_json(
            router,
            "/v1/get-scam-analysis",
            json!({"crypto_address": TRON_ADDR}),
        )
        .await;
        assert_eq!(report["message"], "Scam analysis found for this address.");
        assert_eq!(report["risk_score"], 0.42);
        assert_eq!(state.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_format_is_error_body() {
        let (router, _) = app();
        let (status, body) = post_json(
            router,
            "/v1/get-scam-analysis",
            json!({"crypto_address": "not_an_address"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ERROR");
        assert_eq!(body["address_analyzed"], false);
        assert_eq!(
            body["message"],
            "'not_an_address' is not a valid or recognized crypto address format."
        );
    }

    #[tokio::test]
    async fn test_stats_reflect_cache() {
        let (router, _) = app();
        let request = Request::builder().uri("/v1/stats").body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["cached_assessments"], 0);
    }
}
