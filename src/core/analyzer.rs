//! Risk Analyzer
//!
//! Two modes over the injected store and provider:
//! - `lookup`: cache read only, never calls the provider
//! - `analyze`: always calls the provider, then overwrites the cached entry
//!
//! Capability is checked against the family table before either mode runs.
//! A failed analysis never touches the store.

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::core::traits::{RiskProvider, RiskStore};
use crate::models::{AddressKey, AppError, AppResult, BlockchainFamily, RiskAssessment};

/// Result of a read-only lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RiskLookup {
    Found(RiskAssessment),
    NotAnalyzed,
    NotSupported,
}

/// Result of a triggered analysis
#[derive(Debug)]
pub enum AnalysisOutcome {
    Completed(RiskAssessment),
    NotSupported,
    ProviderFailure(AppError),
}

#[derive(Clone)]
pub struct RiskAnalyzer {
    store: Arc<dyn RiskStore>,
    provider: Arc<dyn RiskProvider>,
}

impl RiskAnalyzer {
    pub fn new(store: Arc<dyn RiskStore>, provider: Arc<dyn RiskProvider>) -> Self {
        Self { store, provider }
    }

    /// Cached assessment for `(address, family)`, if any. No side effects.
    ///
    /// `address` must be the normalized form.
    pub async fn lookup(&self, address: &str, family: BlockchainFamily) -> AppResult<RiskLookup> {
        if !family.supports_risk_scoring() {
            return Ok(RiskLookup::NotSupported);
        }

        let key = AddressKey::new(address, family);
        Ok(match self.store.get(&key).await? {
            Some(assessment) => RiskLookup::Found(assessment),
            None => RiskLookup::NotAnalyzed,
        })
    }

    /// Fresh assessment from the provider, stored on success.
    ///
    /// Provider errors become `ProviderFailure`; a store write error is
    /// returned as `Err` since the assessment was produced but not kept.
    pub async fn analyze(
        &self,
        address: &str,
        family: BlockchainFamily,
    ) -> AppResult<AnalysisOutcome> {
        if !family.supports_risk_scoring() {
            return Ok(AnalysisOutcome::NotSupported);
        }

        let start = Instant::now();
        info!("🧠 Analyzing {} on {} via {}", address, family, self.provider.name());

        let report = match self.provider.assess(address, family).await {
            Ok(report) => report,
            Err(e) => {
                warn!(
                    "⚠️ Provider {} failed for {}:{} [{}]: {}",
                    self.provider.name(),
                    family,
                    address,
                    e.code_str(),
                    e.message
                );
                return Ok(AnalysisOutcome::ProviderFailure(e));
            }
        };

        if !(0.0..=1.0).contains(&report.score) {
            let e = AppError::invalid_response(format!(
                "risk score {} outside [0, 1]",
                report.score
            ));
            warn!("⚠️ Provider {} returned {}", self.provider.name(), e);
            return Ok(AnalysisOutcome::ProviderFailure(e));
        }

        let assessment = RiskAssessment::new(address, family, report.score, report.report);
        if let Err(e) = self.store.put(assessment.clone()).await {
            error!("❌ Failed to store assessment for {}:{}: {}", family, address, e);
            return Err(e);
        }

        info!(
            "✅ Analysis complete for {}:{} score={:.2} in {}ms",
            family,
            address,
            assessment.score,
            start.elapsed().as_millis()
        );
        Ok(AnalysisOutcome::Completed(assessment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::ProviderReport;
    use crate::utils::InMemoryRiskCache;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TRON_ADDR: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

    /// Returns `score` on every call, or a timeout when `score` is None
    struct FixedProvider {
        score: Option<f64>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn scoring(score: f64) -> Self {
            Self {
                score: Some(score),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                score: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RiskProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn assess(&self, _address: &str, _: BlockchainFamily) -> AppResult<ProviderReport> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match self.score {
                Some(score) => Ok(ProviderReport {
                    score,
                    report: format!("report #{}", n),
                }),
                None => Err(AppError::provider_timeout("slow explorer")),
            }
        }
    }

    fn analyzer(provider: Arc<FixedProvider>) -> (RiskAnalyzer, InMemoryRiskCache) {
        let cache = InMemoryRiskCache::new();
        (RiskAnalyzer::new(Arc::new(cache.clone()), provider), cache)
    }

    #[tokio::test]
    async fn test_lookup_before_analysis_is_not_analyzed() {
        let provider = Arc::new(FixedProvider::scoring(0.5));
        let (analyzer, _) = analyzer(provider.clone());

        for _ in 0..3 {
            let result = analyzer.lookup(TRON_ADDR, BlockchainFamily::Tron).await.unwrap();
            assert_eq!(result, RiskLookup::NotAnalyzed);
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_family_never_reaches_provider() {
        let provider = Arc::new(FixedProvider::scoring(0.5));
        let (analyzer, _) = analyzer(provider.clone());

        let lookup = analyzer.lookup("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", BlockchainFamily::Bitcoin);
        assert_eq!(lookup.await.unwrap(), RiskLookup::NotSupported);

        let outcome = analyzer
            .analyze("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", BlockchainFamily::Bitcoin)
            .await
            .unwrap();
        assert!(matches!(outcome, AnalysisOutcome::NotSupported));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_always_calls_provider_and_overwrites() {
        let provider = Arc::new(FixedProvider::scoring(0.7));
        let (analyzer, _) = analyzer(provider.clone());

        analyzer.analyze(TRON_ADDR, BlockchainFamily::Tron).await.unwrap();
        let second = match analyzer.analyze(TRON_ADDR, BlockchainFamily::Tron).await.unwrap() {
            AnalysisOutcome::Completed(a) => a,
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        match analyzer.lookup(TRON_ADDR, BlockchainFamily::Tron).await.unwrap() {
            RiskLookup::Found(a) => {
                assert_eq!(a.report, "report #2");
                assert_eq!(a.computed_at, second.computed_at);
            }
            other => panic!("expected cached assessment, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_prior_assessment() {
        let cache = InMemoryRiskCache::new();
        let prior = RiskAssessment::new(TRON_ADDR, BlockchainFamily::Tron, 0.2, "prior");
        cache.put(prior.clone()).await.unwrap();

        let analyzer = RiskAnalyzer::new(Arc::new(cache.clone()), Arc::new(FixedProvider::failing()));
        let outcome = analyzer.analyze(TRON_ADDR, BlockchainFamily::Tron).await.unwrap();
        match outcome {
            AnalysisOutcome::ProviderFailure(e) => assert_eq!(e.code_str(), "PROVIDER_TIMEOUT"),
            other => panic!("expected provider failure, got {:?}", other),
        }

        let key = AddressKey::new(TRON_ADDR, BlockchainFamily::Tron);
        assert_eq!(cache.get(&key).await.unwrap(), Some(prior));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_provider_failure() {
        let (analyzer, cache) = analyzer(Arc::new(FixedProvider::scoring(1.5)));
        let outcome = analyzer.analyze(TRON_ADDR, BlockchainFamily::Tron).await.unwrap();
        assert!(matches!(outcome, AnalysisOutcome::ProviderFailure(_)));
        assert!(cache.is_empty());
    }
}
