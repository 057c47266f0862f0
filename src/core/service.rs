//! Address intelligence service
//!
//! The three public operations. Each runs independently; the only shared
//! state lives behind the injected stores.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::core::analyzer::{RiskAnalyzer, RiskLookup};
use crate::core::composer::{
    AnalysisReportResponse, CheckAddressResponse, Rejection, MSG_DB_MEMOS, MSG_DB_REPORT,
    MSG_DB_SAVE,
};
use crate::core::disambiguator::{disambiguate, Disambiguation};
use crate::core::matcher::AddressFormatMatcher;
use crate::core::traits::{MemoStore, RiskProvider, RiskStore};
use crate::models::{Address, AddressKey, BlockchainFamily, ErrorCode};

/// An address that resolved to exactly one family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub address: Address,
    pub blockchain: BlockchainFamily,
}

#[derive(Clone)]
pub struct AddressIntelService {
    matcher: AddressFormatMatcher,
    analyzer: RiskAnalyzer,
    memos: Arc<dyn MemoStore>,
}

impl AddressIntelService {
    pub fn new(
        store: Arc<dyn RiskStore>,
        memos: Arc<dyn MemoStore>,
        provider: Arc<dyn RiskProvider>,
    ) -> Self {
        Self {
            matcher: AddressFormatMatcher::new(),
            analyzer: RiskAnalyzer::new(store, provider),
            memos,
        }
    }

    pub fn with_matcher(mut self, matcher: AddressFormatMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn analyzer(&self) -> &RiskAnalyzer {
        &self.analyzer
    }

    pub fn classify(&self, raw: &str) -> Vec<BlockchainFamily> {
        self.matcher.classify(raw)
    }

    /// Classify then disambiguate
    pub fn resolve(&self, raw: &str, hint: Option<&str>) -> Result<ResolvedAddress, Rejection> {
        let address = self.matcher.parse(raw);

        match disambiguate(address.families(), hint) {
            Disambiguation::Resolved(blockchain) => Ok(ResolvedAddress {
                address,
                blockchain,
            }),
            Disambiguation::NoCandidates => {
                debug!("🚫 [{}] Unrecognized address format: {:?}", ErrorCode::AddressFormatInvalid.as_str(), raw);
                Err(Rejection::Format {
                    input: raw.to_string(),
                })
            }
            Disambiguation::ClarificationNeeded(candidates) => {
                Err(Rejection::Clarification(candidates))
            }
            Disambiguation::InvalidHint { hint, candidates } => {
                debug!("🚫 [{}] Hint {:?} does not fit {}", ErrorCode::AddressHintInvalid.as_str(), hint, address.normalized());
                Err(Rejection::InvalidHint { hint, candidates })
            }
        }
    }

    /// Validation + memos + cached score. Never triggers a fresh analysis.
    pub async fn check_address(&self, raw: &str, hint: Option<&str>) -> CheckAddressResponse {
        let now = Utc::now();
        let resolved = match self.resolve(raw, hint) {
            Ok(resolved) => resolved,
            Err(rejection) => return CheckAddressResponse::rejected(&rejection, now),
        };
        let address = resolved.address.normalized();
        let blockchain = resolved.blockchain;

        let risk = match self.analyzer.lookup(address, blockchain).await {
            Ok(RiskLookup::Found(assessment)) => Some(assessment),
            Ok(_) => None,
            Err(e) => {
                warn!("⚠️ Risk lookup failed for {}:{}, serving without score: {}", blockchain, address, e);
                None
            }
        };

        let key = AddressKey::new(address, blockchain);
        let memos = match self.memos.public_memos(&key).await {
            Ok(memos) => memos,
            Err(e) => {
                error!("❌ Memo lookup failed for {}: {}", key, e);
                return CheckAddressResponse::storage_failure(MSG_DB_MEMOS, now);
            }
        };

        info!(
            "📋 Checked {} ({} memo(s), score: {})",
            key,
            memos.len(),
            risk.as_ref().map_or("none".to_string(), |r| format!("{:.2}", r.score))
        );
        CheckAddressResponse::resolved(blockchain, memos, risk, now)
    }

    /// Read-only report from the risk cache
    pub async fn get_analysis(&self, raw: &str, hint: Option<&str>) -> AnalysisReportResponse {
        let now = Utc::now();
        let resolved = match self.resolve(raw, hint) {
            Ok(resolved) => resolved,
            Err(rejection) => return AnalysisReportResponse::rejected(&rejection, now),
        };
        let address = resolved.address.normalized();

        match self.analyzer.lookup(address, resolved.blockchain).await {
            Ok(lookup) => AnalysisReportResponse::from_lookup(resolved.blockchain, lookup, now),
            Err(e) => {
                error!("❌ Report lookup failed for {}:{}: {}", resolved.blockchain, address, e);
                AnalysisReportResponse::storage_failure(MSG_DB_REPORT, now)
            }
        }
    }

    /// Fresh analysis through the provider, superseding any cached one
    pub async fn trigger_analysis(&self, raw: &str, hint: Option<&str>) -> AnalysisReportResponse {
        let now = Utc::now();
        let resolved = match self.resolve(raw, hint) {
            Ok(resolved) => resolved,
            Err(rejection) => return AnalysisReportResponse::rejected(&rejection, now),
        };
        let address = resolved.address.normalized();

        match self.analyzer.analyze(address, resolved.blockchain).await {
            Ok(outcome) => AnalysisReportResponse::from_analysis(resolved.blockchain, outcome, now),
            Err(e) => {
                error!("❌ Analysis for {}:{} not saved: {}", resolved.blockchain, address, e);
                AnalysisReportResponse::storage_failure(MSG_DB_SAVE, now)
            }
        }
    }
}
