use async_trait::async_trait;

use crate::models::{AddressKey, AppResult, BlockchainFamily, Memo, RiskAssessment};

/// Keyed store of the most recent risk assessment per (address, blockchain).
///
/// Last writer wins. The store has no notion of staleness and never evicts
/// on its own; freshness is the caller's policy.
#[async_trait]
pub trait RiskStore: Send + Sync {
    async fn get(&self, key: &AddressKey) -> AppResult<Option<RiskAssessment>>;

    /// Unconditional overwrite, no merge
    async fn put(&self, assessment: RiskAssessment) -> AppResult<()>;
}

/// Read side of the memo store owned by the persistence layer
#[async_trait]
pub trait MemoStore: Send + Sync {
    /// Public memos for the key, newest first
    async fn public_memos(&self, key: &AddressKey) -> AppResult<Vec<Memo>>;
}

/// Raw verdict returned by an analysis provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReport {
    pub score: f64,
    pub report: String,
}

/// External risk analysis (explorer data + AI). The only slow step in the
/// pipeline; timeouts and cancellation are the provider's business.
#[async_trait]
pub trait RiskProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn assess(&self, address: &str, blockchain: BlockchainFamily)
        -> AppResult<ProviderReport>;
}
