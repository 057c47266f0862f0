//! Rebot Intel Library
//!
//! Crypto-address intelligence core:
//! - Address format matching across seven blockchain families
//! - Hint-based disambiguation of overlapping formats (BTC/BCH, ETH/BSC)
//! - Cache-aware risk scoring (read-only lookup vs. fresh AI analysis)
//! - OK / ERROR / CLARIFICATION_NEEDED response composition

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{
    classify, disambiguate, AddressFormatMatcher, AddressIntelService, AnalysisOutcome,
    AnalysisReportResponse, CheckAddressResponse, Disambiguation, MemoStore, ProviderReport,
    Rejection, ResponseStatus, RiskAnalyzer, RiskLookup, RiskProvider, RiskStore,
};
pub use models::{
    Address, AddressKey, AppError, AppResult, BlockchainFamily, ErrorCode, Memo, MemoVisibility,
    RiskAssessment, ServiceConfig,
};
pub use providers::TronRiskProvider;
pub use utils::{CacheStats, InMemoryMemoStore, InMemoryRiskCache};
