//! Resolves a candidate set plus an optional caller hint into one family

use tracing::debug;

use crate::models::BlockchainFamily;

/// Outcome of disambiguation. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disambiguation {
    Resolved(BlockchainFamily),
    /// Empty candidate set: the input matched no address format
    NoCandidates,
    /// Ambiguous with no usable hint; candidates in canonical order
    ClarificationNeeded(Vec<BlockchainFamily>),
    /// Hint supplied for an ambiguous address but not one of its candidates
    InvalidHint {
        hint: String,
        candidates: Vec<BlockchainFamily>,
    },
}

impl Disambiguation {
    pub fn resolved(&self) -> Option<BlockchainFamily> {
        match self {
            Disambiguation::Resolved(family) => Some(*family),
            _ => None,
        }
    }
}

/// Resolve `candidates` against `hint`.
///
/// An empty set yields `NoCandidates`, never a clarification.
/// A single candidate wins regardless of the hint. Blank hints count as absent.
pub fn disambiguate(candidates: &[BlockchainFamily], hint: Option<&str>) -> Disambiguation {
    let mut ordered = candidates.to_vec();
    ordered.sort();
    ordered.dedup();

    match ordered.as_slice() {
        [] => return Disambiguation::NoCandidates,
        [only] => return Disambiguation::Resolved(*only),
        _ => {}
    }

    let hint = hint.map(str::trim).filter(|h| !h.is_empty());
    let Some(hint) = hint else {
        return Disambiguation::ClarificationNeeded(ordered);
    };

    match BlockchainFamily::from_hint(hint) {
        Some(family) if ordered.contains(&family) => {
            debug!("🎯 hint '{}' resolved to {}", hint, family);
            Disambiguation::Resolved(family)
        }
        _ => Disambiguation::InvalidHint {
            hint: hint.to_string(),
            candidates: ordered,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BlockchainFamily::*;

    #[test]
    fn test_single_candidate_ignores_hint() {
        assert_eq!(disambiguate(&[Tron], None), Disambiguation::Resolved(Tron));
        assert_eq!(
            disambiguate(&[Tron], Some("ethereum")),
            Disambiguation::Resolved(Tron)
        );
        assert_eq!(
            disambiguate(&[Tron], Some("not-a-chain")),
            Disambiguation::Resolved(Tron)
        );
    }

    #[test]
    fn test_ambiguous_without_hint_needs_clarification() {
        assert_eq!(
            disambiguate(&[Bsc, Ethereum], None),
            Disambiguation::ClarificationNeeded(vec![Ethereum, Bsc])
        );
        assert_eq!(
            disambiguate(&[Ethereum, Bsc], Some("  ")),
            Disambiguation::ClarificationNeeded(vec![Ethereum, Bsc])
        );
    }

    #[test]
    fn test_ambiguous_with_matching_hint_resolves() {
        assert_eq!(
            disambiguate(&[Ethereum, Bsc], Some("ethereum")),
            Disambiguation::Resolved(Ethereum)
        );
        assert_eq!(
            disambiguate(&[Bitcoin, BitcoinCash], Some("Bitcoin_Cash")),
            Disambiguation::Resolved(BitcoinCash)
        );
    }

    #[test]
    fn test_ambiguous_with_foreign_hint_is_invalid() {
        assert_eq!(
            disambiguate(&[Ethereum, Bsc], Some("tron")),
            Disambiguation::InvalidHint {
                hint: "tron".to_string(),
                candidates: vec![Ethereum, Bsc],
            }
        );
        // Misspelled identifiers are reported the same way
        assert!(matches!(
            disambiguate(&[Ethereum, Bsc], Some("etherium")),
            Disambiguation::InvalidHint { .. }
        ));
    }

    #[test]
    fn test_empty_candidates_never_ask_for_clarification() {
        assert_eq!(disambiguate(&[], None), Disambiguation::NoCandidates);
        assert_eq!(disambiguate(&[], Some("tron")), Disambiguation::NoCandidates);
        assert_eq!(disambiguate(&[], None).resolved(), None);
    }

    #[test]
    fn test_resolved_accessor() {
        assert_eq!(disambiguate(&[Dogecoin], None).resolved(), Some(Dogecoin));
        assert_eq!(disambiguate(&[Ethereum, Bsc], None).resolved(), None);
    }
}
