//! Address Format Matcher
//!
//! Maps a raw string to every blockchain family whose address syntax it
//! satisfies. Purely syntactic, no network calls.
//!
//! Rules are data: each `FormatRule` pairs an encoding check with the
//! families that share it. Adding a family is a table change.
//!
//! | Encoding                      | Families                 |
//! |-------------------------------|--------------------------|
//! | Base58Check 0x00 / 0x05       | bitcoin, bitcoin_cash    |
//! | Base58Check 0x41              | tron                     |
//! | Base58Check 0x30 / 0x32       | litecoin                 |
//! | Base58Check 0x1E / 0x16       | dogecoin                 |
//! | `0x` + 40 hex                 | ethereum, bsc            |
//! | CashAddr                      | bitcoin_cash             |
//! | SegWit `bc1`                  | bitcoin                  |
//! | SegWit `ltc1`                 | litecoin                 |

use tracing::debug;

use crate::models::{Address, BlockchainFamily};
use crate::utils::constants::{
    BASE58_PAYLOAD_LEN, BITCOIN_SEGWIT_HRP, BTC_P2PKH_VERSION, BTC_P2SH_VERSION,
    DOGE_P2PKH_VERSION, DOGE_P2SH_VERSION, LITECOIN_SEGWIT_HRP, LTC_P2PKH_VERSION,
    LTC_P2SH_VERSION, TRON_VERSION,
};
use crate::utils::encoding::{base58check_decode, cashaddr_normalize, is_evm_hex, segwit_decode};

/// Base58Check strings carrying a 21-byte payload are 25..=35 chars long
const BASE58_MIN_LEN: usize = 25;
const BASE58_MAX_LEN: usize = 35;

/// Syntactic encoding check
#[derive(Debug, Clone, Copy)]
pub enum Encoding {
    Base58Check { versions: &'static [u8] },
    EvmHex,
    CashAddr,
    Segwit { hrp: &'static str },
}

impl Encoding {
    /// Normalized spelling if `input` satisfies this encoding
    pub fn normalize(&self, input: &str) -> Option<String> {
        match self {
            Encoding::Base58Check { versions } => {
                if !(BASE58_MIN_LEN..=BASE58_MAX_LEN).contains(&input.len()) {
                    return None;
                }
                let payload = base58check_decode(input)?;
                if payload.len() == BASE58_PAYLOAD_LEN && versions.contains(&payload[0]) {
                    // Base58 is case-significant; the input is already canonical
                    Some(input.to_string())
                } else {
                    None
                }
            }
            Encoding::EvmHex => is_evm_hex(input).then(|| input.to_ascii_lowercase()),
            Encoding::CashAddr => cashaddr_normalize(input),
            Encoding::Segwit { hrp } => segwit_decode(input)
                .filter(|addr| addr.hrp == *hrp)
                .map(|addr| addr.normalized),
        }
    }
}

/// One row of the format table
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub name: &'static str,
    pub encoding: Encoding,
    pub families: &'static [BlockchainFamily],
}

pub const FORMAT_RULES: [FormatRule; 8] = [
    FormatRule {
        name: "bitcoin-legacy-base58",
        encoding: Encoding::Base58Check {
            versions: &[BTC_P2PKH_VERSION, BTC_P2SH_VERSION],
        },
        // Bitcoin Cash kept the legacy format after the fork
        families: &[BlockchainFamily::Bitcoin, BlockchainFamily::BitcoinCash],
    },
    FormatRule {
        name: "tron-base58",
        encoding: Encoding::Base58Check {
            versions: &[TRON_VERSION],
        },
        families: &[BlockchainFamily::Tron],
    },
    FormatRule {
        name: "litecoin-base58",
        encoding: Encoding::Base58Check {
            versions: &[LTC_P2PKH_VERSION, LTC_P2SH_VERSION],
        },
        families: &[BlockchainFamily::Litecoin],
    },
    FormatRule {
        name: "dogecoin-base58",
        encoding: Encoding::Base58Check {
            versions: &[DOGE_P2PKH_VERSION, DOGE_P2SH_VERSION],
        },
        families: &[BlockchainFamily::Dogecoin],
    },
    FormatRule {
        name: "evm-hex",
        encoding: Encoding::EvmHex,
        families: &[BlockchainFamily::Ethereum, BlockchainFamily::Bsc],
    },
    FormatRule {
        name: "bitcoin-cash-cashaddr",
        encoding: Encoding::CashAddr,
        families: &[BlockchainFamily::BitcoinCash],
    },
    FormatRule {
        name: "bitcoin-segwit",
        encoding: Encoding::Segwit {
            hrp: BITCOIN_SEGWIT_HRP,
        },
        families: &[BlockchainFamily::Bitcoin],
    },
    FormatRule {
        name: "litecoin-segwit",
        encoding: Encoding::Segwit {
            hrp: LITECOIN_SEGWIT_HRP,
        },
        families: &[BlockchainFamily::Litecoin],
    },
];

/// Classifies raw address strings against a rule table
#[derive(Debug, Clone, Copy)]
pub struct AddressFormatMatcher {
    rules: &'static [FormatRule],
}

impl Default for AddressFormatMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressFormatMatcher {
    pub fn new() -> Self {
        Self {
            rules: &FORMAT_RULES,
        }
    }

    pub fn with_rules(rules: &'static [FormatRule]) -> Self {
        Self { rules }
    }

    /// Parse an address. Unrecognized input yields an `Address` with no families.
    pub fn parse(&self, raw: &str) -> Address {
        let input = raw.trim();
        let mut families: Vec<BlockchainFamily> = Vec::new();
        let mut normalized: Option<String> = None;

        if !input.is_empty() {
            for rule in self.rules {
                if let Some(form) = rule.encoding.normalize(input) {
                    debug!("🔎 {} matched rule {}", input, rule.name);
                    families.extend_from_slice(rule.families);
                    normalized.get_or_insert(form);
                }
            }
        }

        families.sort();
        families.dedup();

        Address::new(
            raw.to_string(),
            normalized.unwrap_or_else(|| input.to_string()),
            families,
        )
    }

    /// Matching families in canonical order; empty when nothing matches
    pub fn classify(&self, raw: &str) -> Vec<BlockchainFamily> {
        self.parse(raw).families().to_vec()
    }
}

/// Classify with the default rule table
pub fn classify(raw: &str) -> Vec<BlockchainFamily> {
    AddressFormatMatcher::new().classify(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::encoding::base58check_encode;
    use crate::utils::encoding::fixtures::{cashaddr_encode, segwit_encode};

    fn base58_address(version: u8, fill: u8) -> String {
        let mut payload = vec![version];
        payload.extend_from_slice(&[fill; 20]);
        base58check_encode(&payload)
    }

    #[test]
    fn test_bitcoin_legacy_matches_bitcoin_and_bitcoin_cash() {
        for addr in [
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy",
        ] {
            assert_eq!(
                classify(addr),
                vec![BlockchainFamily::Bitcoin, BlockchainFamily::BitcoinCash],
                "{}",
                addr
            );
        }
    }

    #[test]
    fn test_tron_is_exclusive() {
        assert_eq!(
            classify("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"),
            vec![BlockchainFamily::Tron]
        );
    }

    #[test]
    fn test_evm_hex_matches_ethereum_and_bsc() {
        let parsed = AddressFormatMatcher::new().parse("0xdAC17F958D2ee523a2206206994597C13D831ec7");
        assert_eq!(
            parsed.families(),
            &[BlockchainFamily::Ethereum, BlockchainFamily::Bsc]
        );
        assert_eq!(parsed.normalized(), "0xdac17f958d2ee523a2206206994597c13d831ec7");
    }

    #[test]
    fn test_litecoin_and_dogecoin_are_exclusive() {
        let ltc = base58_address(LTC_P2PKH_VERSION, 3);
        assert!(ltc.starts_with('L'));
        assert_eq!(classify(&ltc), vec![BlockchainFamily::Litecoin]);

        let ltc_p2sh = base58_address(LTC_P2SH_VERSION, 3);
        assert!(ltc_p2sh.starts_with('M'));
        assert_eq!(classify(&ltc_p2sh), vec![BlockchainFamily::Litecoin]);

        let doge = base58_address(DOGE_P2PKH_VERSION, 9);
        assert!(doge.starts_with('D'));
        assert_eq!(classify(&doge), vec![BlockchainFamily::Dogecoin]);
    }

    #[test]
    fn test_cashaddr_is_bitcoin_cash_only() {
        let addr = "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";
        assert_eq!(classify(addr), vec![BlockchainFamily::BitcoinCash]);

        let bare = AddressFormatMatcher::new().parse("qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a");
        assert_eq!(bare.families(), &[BlockchainFamily::BitcoinCash]);
        assert_eq!(bare.normalized(), addr);

        let p2sh = cashaddr_encode(0x08, &[5u8; 20]);
        assert_eq!(classify(&p2sh), vec![BlockchainFamily::BitcoinCash]);
    }

    #[test]
    fn test_segwit_hrp_selects_family() {
        assert_eq!(
            classify("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"),
            vec![BlockchainFamily::Bitcoin]
        );
        let ltc = segwit_encode("ltc", 0, &[0x21; 20]);
        assert_eq!(classify(&ltc), vec![BlockchainFamily::Litecoin]);

        // Valid bech32 but unknown HRP
        let testnet = segwit_encode("tb", 0, &[0x21; 20]);
        assert!(classify(&testnet).is_empty());
    }

    #[test]
    fn test_unknown_version_byte_is_rejected() {
        // Valid Base58Check, but version 0x6F (bitcoin testnet) is not in the table
        let testnet = base58_address(0x6F, 1);
        assert!(classify(&testnet).is_empty());
    }

    #[test]
    fn test_garbage_yields_empty_set() {
        assert!(classify("not_an_address").is_empty());
        assert!(classify("").is_empty());
        assert!(classify("   ").is_empty());
        assert!(classify("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6u").is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let parsed = AddressFormatMatcher::new().parse("  TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t\n");
        assert_eq!(parsed.families(), &[BlockchainFamily::Tron]);
        assert_eq!(parsed.normalized(), "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t");
        assert_eq!(parsed.raw(), "  TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t\n");
    }

    #[test]
    fn test_custom_rule_table() {
        static ONLY_TRON: [FormatRule; 1] = [FORMAT_RULES[1]];
        let matcher = AddressFormatMatcher::with_rules(&ONLY_TRON);
        assert!(matcher.classify("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").is_empty());
        assert_eq!(
            matcher.classify("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"),
            vec![BlockchainFamily::Tron]
        );
    }
}
