//! API Request/Response Types
//!
//! The three address operations answer with the composer's response types
//! directly; health and stats use the `ApiResponse` envelope.

use serde::{Deserialize, Serialize};

/// API Response wrapper for service endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

// ============================================
// Address Operations
// ============================================

/// Body of check-address, get-scam-analysis and analyze-scam
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddressRequest {
    pub crypto_address: String,
    /// Optional blockchain hint to resolve ambiguity (e.g. "ethereum", "bsc")
    #[serde(default)]
    pub blockchain_type: Option<String>,
}

impl AddressRequest {
    pub fn hint(&self) -> Option<&str> {
        self.blockchain_type.as_deref()
    }
}

// ============================================
// Stats
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub cached_assessments: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
