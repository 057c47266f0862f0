//! Response Composer
//!
//! Maps resolution, lookup and analysis outcomes onto the three public
//! status categories. Message text depends only on the outcome and the
//! caller's input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::analyzer::{AnalysisOutcome, RiskLookup};
use crate::models::{BlockchainFamily, Memo, RiskAssessment};

pub const MSG_CLARIFICATION: &str = "Address format is ambiguous and could belong to multiple blockchains. Please clarify by providing a 'blockchain_type'.";
pub const MSG_CHECK_OK: &str = "Address details retrieved successfully.";
pub const MSG_REPORT_FOUND: &str = "Scam analysis found for this address.";
pub const MSG_REPORT_MISSING: &str = "No scam analysis has been performed for this address yet.";
pub const MSG_ANALYSIS_DONE: &str = "Scam analysis completed.";
pub const MSG_PROVIDER_FAILURE: &str =
    "The risk analysis provider failed to produce an assessment for this address.";
pub const MSG_DB_MEMOS: &str = "A database error occurred while fetching memos.";
pub const MSG_DB_REPORT: &str = "A database error occurred while fetching scam report.";
pub const MSG_DB_SAVE: &str = "A database error occurred while saving the risk assessment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Ok,
    Error,
    ClarificationNeeded,
}

/// Why an input did not resolve to exactly one family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Format { input: String },
    Clarification(Vec<BlockchainFamily>),
    InvalidHint {
        hint: String,
        candidates: Vec<BlockchainFamily>,
    },
}

impl Rejection {
    pub fn status(&self) -> ResponseStatus {
        match self {
            Rejection::Clarification(_) => ResponseStatus::ClarificationNeeded,
            Rejection::Format { .. } | Rejection::InvalidHint { .. } => ResponseStatus::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Rejection::Format { input } => {
                format!("'{}' is not a valid or recognized crypto address format.", input)
            }
            Rejection::Clarification(_) => MSG_CLARIFICATION.to_string(),
            Rejection::InvalidHint { hint, candidates } => format!(
                "Provided blockchain_type '{}' is not a valid option for this address. Possible options: [{}]",
                hint,
                join_families(candidates)
            ),
        }
    }

    /// Candidate list, carried only when the caller is asked to clarify
    pub fn possible_blockchains(&self) -> Option<Vec<BlockchainFamily>> {
        match self {
            Rejection::Clarification(candidates) => Some(candidates.clone()),
            _ => None,
        }
    }
}

fn join_families(families: &[BlockchainFamily]) -> String {
    families
        .iter()
        .map(BlockchainFamily::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn not_supported_message(family: BlockchainFamily) -> String {
    format!("Risk analysis is not supported for {} addresses.", family)
}

/// Full check: resolution, public memos and any cached risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckAddressResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub request_datetime: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_memos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_blockchains: Option<Vec<BlockchainFamily>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score_updated_at: Option<DateTime<Utc>>,
}

impl CheckAddressResponse {
    fn empty(status: ResponseStatus, message: String, now: DateTime<Utc>) -> Self {
        Self {
            status,
            message,
            request_datetime: now,
            blockchain: None,
            public_memos: None,
            possible_blockchains: None,
            risk_score: None,
            risk_score_updated_at: None,
        }
    }

    pub fn rejected(rejection: &Rejection, now: DateTime<Utc>) -> Self {
        Self {
            possible_blockchains: rejection.possible_blockchains(),
            ..Self::empty(rejection.status(), rejection.message(), now)
        }
    }

    /// Memos and score are omitted when there are none
    pub fn resolved(
        blockchain: BlockchainFamily,
        memos: Vec<Memo>,
        risk: Option<RiskAssessment>,
        now: DateTime<Utc>,
    ) -> Self {
        let memos: Vec<String> = memos.into_iter().map(|m| m.text).collect();
        Self {
            blockchain: Some(blockchain),
            public_memos: (!memos.is_empty()).then_some(memos),
            risk_score: risk.as_ref().map(|r| r.score),
            risk_score_updated_at: risk.as_ref().map(|r| r.computed_at),
            ..Self::empty(ResponseStatus::Ok, MSG_CHECK_OK.to_string(), now)
        }
    }

    pub fn storage_failure(message: &str, now: DateTime<Utc>) -> Self {
        Self::empty(ResponseStatus::Error, message.to_string(), now)
    }
}

/// Read-only report and trigger-analysis responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReportResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub request_datetime: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainFamily>,
    pub address_analyzed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scam_report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_blockchains: Option<Vec<BlockchainFamily>>,
}

impl AnalysisReportResponse {
    fn empty(status: ResponseStatus, message: String, now: DateTime<Utc>) -> Self {
        Self {
            status,
            message,
            request_datetime: now,
            blockchain: None,
            address_analyzed: false,
            scam_report: None,
            analysis_date: None,
            risk_score: None,
            possible_blockchains: None,
        }
    }

    fn with_assessment(
        blockchain: BlockchainFamily,
        message: &str,
        assessment: RiskAssessment,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            blockchain: Some(blockchain),
            address_analyzed: true,
            risk_score: Some(assessment.score),
            analysis_date: Some(assessment.computed_at),
            scam_report: Some(assessment.report),
            ..Self::empty(ResponseStatus::Ok, message.to_string(), now)
        }
    }

    pub fn rejected(rejection: &Rejection, now: DateTime<Utc>) -> Self {
        Self {
            possible_blockchains: rejection.possible_blockchains(),
            ..Self::empty(rejection.status(), rejection.message(), now)
        }
    }

    pub fn from_lookup(blockchain: BlockchainFamily, lookup: RiskLookup, now: DateTime<Utc>) -> Self {
        match lookup {
            RiskLookup::Found(assessment) => {
                Self::with_assessment(blockchain, MSG_REPORT_FOUND, assessment, now)
            }
            RiskLookup::NotAnalyzed => Self {
                blockchain: Some(blockchain),
                ..Self::empty(ResponseStatus::Ok, MSG_REPORT_MISSING.to_string(), now)
            },
            RiskLookup::NotSupported => Self {
                blockchain: Some(blockchain),
                ..Self::empty(ResponseStatus::Ok, not_supported_message(blockchain), now)
            },
        }
    }

    pub fn from_analysis(
        blockchain: BlockchainFamily,
        outcome: AnalysisOutcome,
        now: DateTime<Utc>,
    ) -> Self {
        match outcome {
            AnalysisOutcome::Completed(assessment) => {
                Self::with_assessment(blockchain, MSG_ANALYSIS_DONE, assessment, now)
            }
            AnalysisOutcome::NotSupported => Self {
                blockchain: Some(blockchain),
                ..Self::empty(ResponseStatus::Ok, not_supported_message(blockchain), now)
            },
            AnalysisOutcome::ProviderFailure(_) => Self {
                blockchain: Some(blockchain),
                ..Self::empty(ResponseStatus::Error, MSG_PROVIDER_FAILURE.to_string(), now)
            },
        }
    }

    pub fn storage_failure(message: &str, now: DateTime<Utc>) -> Self {
        Self::empty(ResponseStatus::Error, message.to_string(), now)
    }
}
