//! In-Memory Risk Cache
//!
//! Thread-safe `RiskStore` backed by DashMap, used by tests and by the API
//! binary when no external persistence is wired in.
//!
//! - Keys are (normalized address, blockchain)
//! - Last writer wins, no merge
//! - No TTL: entries are never removed autonomously
//! - Cache HIT/MISS logging and counters

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::traits::RiskStore;
use crate::models::{AddressKey, AppResult, RiskAssessment};

#[derive(Clone, Default)]
pub struct InMemoryRiskCache {
    store: Arc<DashMap<AddressKey, RiskAssessment>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl InMemoryRiskCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            entries: self.store.len(),
            hits,
            misses,
            hit_rate,
        }
    }
}

#[async_trait]
impl RiskStore for InMemoryRiskCache {
    async fn get(&self, key: &AddressKey) -> AppResult<Option<RiskAssessment>> {
        match self.store.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                info!("✅ CACHE HIT: {} (computed at {})", key, entry.computed_at);
                Ok(Some(entry.clone()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("📭 CACHE MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn put(&self, assessment: RiskAssessment) -> AppResult<()> {
        let key = AddressKey::new(assessment.address.clone(), assessment.blockchain);
        info!("💾 CACHE SET: {} (score {:.2})", key, assessment.score);
        self.store.insert(key, assessment);
        Ok(())
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
