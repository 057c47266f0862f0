//! Type definitions for Rebot Intel
//! Core data structures shared by classification, disambiguation and risk analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::constants::{family_spec, FamilySpec};

/// Blockchain families whose address encodings we recognize.
///
/// Declaration order is the canonical order used whenever a set of
/// families is reported back to a caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlockchainFamily {
    Bitcoin,
    Ethereum,
    Bsc,
    Tron,
    Litecoin,
    Dogecoin,
    BitcoinCash,
}

impl BlockchainFamily {
    /// All families, in canonical order
    pub const ALL: [BlockchainFamily; 7] = [
        BlockchainFamily::Bitcoin,
        BlockchainFamily::Ethereum,
        BlockchainFamily::Bsc,
        BlockchainFamily::Tron,
        BlockchainFamily::Litecoin,
        BlockchainFamily::Dogecoin,
        BlockchainFamily::BitcoinCash,
    ];

    /// Wire identifier (also the accepted hint spelling)
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockchainFamily::Bitcoin => "bitcoin",
            BlockchainFamily::Ethereum => "ethereum",
            BlockchainFamily::Bsc => "bsc",
            BlockchainFamily::Tron => "tron",
            BlockchainFamily::Litecoin => "litecoin",
            BlockchainFamily::Dogecoin => "dogecoin",
            BlockchainFamily::BitcoinCash => "bitcoin_cash",
        }
    }

    /// Static configuration for this family
    pub fn spec(&self) -> &'static FamilySpec {
        family_spec(*self)
    }

    /// Whether the risk pipeline can score addresses of this family
    pub fn supports_risk_scoring(&self) -> bool {
        self.spec().risk_scoring
    }

    /// Parse a caller-supplied hint. Case-insensitive, surrounding whitespace ignored.
    pub fn from_hint(hint: &str) -> Option<Self> {
        let hint = hint.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|family| family.as_str().eq_ignore_ascii_case(hint))
    }
}

impl fmt::Display for BlockchainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockchainFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hint(s).ok_or_else(|| format!("unknown blockchain '{}'", s))
    }
}

/// A parsed address: the caller's raw input, its per-chain normalized form
/// and every family whose syntax it satisfies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    raw: String,
    normalized: String,
    families: Vec<BlockchainFamily>,
}

impl Address {
    pub(crate) fn new(raw: String, normalized: String, families: Vec<BlockchainFamily>) -> Self {
        Self {
            raw,
            normalized,
            families,
        }
    }

    /// Input exactly as the caller supplied it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Canonical spelling used for store keys
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Matching families in canonical order (empty if unrecognized)
    pub fn families(&self) -> &[BlockchainFamily] {
        &self.families
    }

    pub fn is_recognized(&self) -> bool {
        !self.families.is_empty()
    }
}

/// Memo visibility as recorded by the memo store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoVisibility {
    Public,
    Private,
}

/// A user-submitted note about an address on a given chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memo {
    pub address: String,
    pub blockchain: BlockchainFamily,
    pub text: String,
    pub visibility: MemoVisibility,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Memo {
    pub fn public(
        address: impl Into<String>,
        blockchain: BlockchainFamily,
        text: impl Into<String>,
        author_id: i64,
    ) -> Self {
        Self {
            address: address.into(),
            blockchain,
            text: text.into(),
            visibility: MemoVisibility::Public,
            author_id,
            created_at: Utc::now(),
        }
    }

    pub fn private(
        address: impl Into<String>,
        blockchain: BlockchainFamily,
        text: impl Into<String>,
        author_id: i64,
    ) -> Self {
        Self {
            visibility: MemoVisibility::Private,
            ..Self::public(address, blockchain, text, author_id)
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == MemoVisibility::Public
    }
}

/// Scored, timestamped fraud-likelihood analysis for one (address, blockchain).
///
/// Never mutated after creation; a newer assessment supersedes an older one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Normalized address
    pub address: String,
    pub blockchain: BlockchainFamily,
    /// 0.0 (very low risk) ..= 1.0 (very high risk)
    pub score: f64,
    pub report: String,
    pub computed_at: DateTime<Utc>,
}

impl RiskAssessment {
    pub fn new(
        address: impl Into<String>,
        blockchain: BlockchainFamily,
        score: f64,
        report: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            blockchain,
            score,
            report: report.into(),
            computed_at: Utc::now(),
        }
    }
}

/// Store key for memos and risk assessments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressKey {
    pub address: String,
    pub blockchain: BlockchainFamily,
}

impl AddressKey {
    pub fn new(address: impl Into<String>, blockchain: BlockchainFamily) -> Self {
        Self {
            address: address.into(),
            blockchain,
        }
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.blockchain, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_declaration() {
        let mut shuffled = vec![
            BlockchainFamily::BitcoinCash,
            BlockchainFamily::Tron,
            BlockchainFamily::Bitcoin,
            BlockchainFamily::Bsc,
            BlockchainFamily::Ethereum,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                BlockchainFamily::Bitcoin,
                BlockchainFamily::Ethereum,
                BlockchainFamily::Bsc,
                BlockchainFamily::Tron,
                BlockchainFamily::BitcoinCash,
            ]
        );
    }

    #[test]
    fn test_hint_parsing_is_case_insensitive() {
        assert_eq!(BlockchainFamily::from_hint("Ethereum"), Some(BlockchainFamily::Ethereum));
        assert_eq!(BlockchainFamily::from_hint(" BSC "), Some(BlockchainFamily::Bsc));
        assert_eq!(
            BlockchainFamily::from_hint("bitcoin_cash"),
            Some(BlockchainFamily::BitcoinCash)
        );
        assert_eq!(BlockchainFamily::from_hint("etherium"), None);
        assert_eq!(BlockchainFamily::from_hint(""), None);
    }

    #[test]
    fn test_serde_uses_wire_identifiers() {
        let json = serde_json::to_string(&BlockchainFamily::BitcoinCash).unwrap();
        assert_eq!(json, "\"bitcoin_cash\"");
        let back: BlockchainFamily = serde_json::from_str("\"bsc\"").unwrap();
        assert_eq!(back, BlockchainFamily::Bsc);
    }

    #[test]
    fn test_only_tron_scores_risk() {
        let capable: Vec<_> = BlockchainFamily::ALL
            .iter()
            .filter(|f| f.supports_risk_scoring())
            .collect();
        assert_eq!(capable, vec![&BlockchainFamily::Tron]);
    }

    #[test]
    fn test_private_memo_keeps_fields() {
        let memo = Memo::private("Tabc", BlockchainFamily::Tron, "note", 7);
        assert!(!memo.is_public());
        assert_eq!(memo.author_id, 7);
        assert_eq!(memo.text, "note");
    }
}
