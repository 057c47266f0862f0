//! Constants Module - Single Source of Truth
//!
//! Version bytes, per-family static configuration and service defaults.
//! Other modules read from here instead of hardcoding values.

use crate::models::types::BlockchainFamily;

// ============================================
// APPLICATION CONSTANTS
// ============================================

pub const APP_NAME: &str = "RebotIntel";

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for outbound HTTP requests
pub const USER_AGENT: &str = "RebotIntel/0.1.0";

// ============================================
// SERVICE DEFAULTS
// ============================================

pub const DEFAULT_TRONSCAN_BASE_URL: &str = "https://apilist.tronscanapi.com/api";

pub const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_GENAI_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_GENAI_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Timeout of the concrete provider HTTP clients (seconds)
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_API_HOST: &str = "0.0.0.0";

pub const DEFAULT_API_PORT: u16 = 8080;

/// TRX amounts are reported in SUN
pub const SUN_PER_TRX: f64 = 1_000_000.0;

/// Token balances forwarded to the model for wallet prompts
pub const MAX_PROMPT_TOKENS: usize = 5;

// ============================================
// BASE58CHECK VERSION BYTES
// ============================================

/// Bitcoin P2PKH ('1')
pub const BTC_P2PKH_VERSION: u8 = 0x00;
/// Bitcoin P2SH ('3')
pub const BTC_P2SH_VERSION: u8 = 0x05;
/// Tron ('T')
pub const TRON_VERSION: u8 = 0x41;
/// Litecoin P2PKH ('L')
pub const LTC_P2PKH_VERSION: u8 = 0x30;
/// Litecoin P2SH ('M')
pub const LTC_P2SH_VERSION: u8 = 0x32;
/// Dogecoin P2PKH ('D')
pub const DOGE_P2PKH_VERSION: u8 = 0x1E;
/// Dogecoin P2SH ('9' / 'A')
pub const DOGE_P2SH_VERSION: u8 = 0x16;

/// Version byte + 20-byte hash
pub const BASE58_PAYLOAD_LEN: usize = 21;

// ============================================
// PREFIXES
// ============================================

pub const EVM_PREFIX: &str = "0x";
/// "0x" + 40 hex chars
pub const EVM_ADDRESS_LEN: usize = 42;

pub const CASHADDR_PREFIX: &str = "bitcoincash";

pub const BITCOIN_SEGWIT_HRP: &str = "bc";
pub const LITECOIN_SEGWIT_HRP: &str = "ltc";

// ============================================
// FAMILY TABLE
// ============================================

/// Static, never-mutated configuration for one blockchain family
#[derive(Debug, Clone, Copy)]
pub struct FamilySpec {
    pub family: BlockchainFamily,
    pub display_name: &'static str,
    pub native_symbol: &'static str,
    pub explorer_name: &'static str,
    /// `{address}` is substituted by the caller
    pub explorer_url_template: &'static str,
    /// Whether the risk pipeline can score this family
    pub risk_scoring: bool,
}

/// One entry per family, in canonical order
pub const FAMILY_TABLE: [FamilySpec; 7] = [
    FamilySpec {
        family: BlockchainFamily::Bitcoin,
        display_name: "Bitcoin",
        native_symbol: "BTC",
        explorer_name: "Blockchair (Bitcoin)",
        explorer_url_template: "https://blockchair.com/bitcoin/address/{address}",
        risk_scoring: false,
    },
    FamilySpec {
        family: BlockchainFamily::Ethereum,
        display_name: "Ethereum",
        native_symbol: "ETH",
        explorer_name: "Etherscan",
        explorer_url_template: "https://etherscan.io/address/{address}",
        risk_scoring: false,
    },
    FamilySpec {
        family: BlockchainFamily::Bsc,
        display_name: "BNB Smart Chain",
        native_symbol: "BNB",
        explorer_name: "BscScan",
        explorer_url_template: "https://bscscan.com/address/{address}",
        risk_scoring: false,
    },
    FamilySpec {
        family: BlockchainFamily::Tron,
        display_name: "TRON",
        native_symbol: "TRX",
        explorer_name: "TronScan",
        explorer_url_template: "https://tronscan.org/#/address/{address}",
        risk_scoring: true,
    },
    FamilySpec {
        family: BlockchainFamily::Litecoin,
        display_name: "Litecoin",
        native_symbol: "LTC",
        explorer_name: "Blockchair (Litecoin)",
        explorer_url_template: "https://blockchair.com/litecoin/address/{address}",
        risk_scoring: false,
    },
    FamilySpec {
        family: BlockchainFamily::Dogecoin,
        display_name: "Dogecoin",
        native_symbol: "DOGE",
        explorer_name: "Blockchair (Dogecoin)",
        explorer_url_template: "https://blockchair.com/dogecoin/address/{address}",
        risk_scoring: false,
    },
    FamilySpec {
        family: BlockchainFamily::BitcoinCash,
        display_name: "Bitcoin Cash",
        native_symbol: "BCH",
        explorer_name: "Blockchair (Bitcoin Cash)",
        explorer_url_template: "https://blockchair.com/bitcoin-cash/address/{address}",
        risk_scoring: false,
    },
];

/// Look up the static configuration of a family
pub fn family_spec(family: BlockchainFamily) -> &'static FamilySpec {
    // FAMILY_TABLE is indexed by canonical order
    &FAMILY_TABLE[family as usize]
}
