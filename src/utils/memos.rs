//! In-memory memo store keyed by (normalized address, blockchain)

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::core::traits::MemoStore;
use crate::models::{AddressKey, AppResult, Memo};

#[derive(Clone, Default)]
pub struct InMemoryMemoStore {
    memos: Arc<DashMap<AddressKey, Vec<Memo>>>,
}

impl InMemoryMemoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a memo. `memo.address` must already be normalized.
    pub fn add_memo(&self, memo: Memo) {
        let key = AddressKey::new(memo.address.clone(), memo.blockchain);
        self.memos.entry(key).or_default().push(memo);
    }
}

#[async_trait]
impl MemoStore for InMemoryMemoStore {
    async fn public_memos(&self, key: &AddressKey) -> AppResult<Vec<Memo>> {
        let memos: Vec<Memo> = self
            .memos
            .get(key)
            .map(|entry| {
                entry
                    .iter()
                    .rev()
                    .filter(|m| m.is_public() && !m.text.trim().is_empty())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        debug!("📝 {} public memo(s) for {}", memos.len(), key);
        Ok(memos)
    }
}
