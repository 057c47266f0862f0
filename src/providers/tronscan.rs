//! TronScan API Client
//!
//! Account, contract and token-balance lookups used to build the analysis
//! prompt for TRON addresses.
//!
//! API: https://apilist.tronscanapi.com/api
//! - `/account?address=`
//! - `/contract?contract=`
//! - `/account/tokens?address=&start=0&limit=`
//!
//! Works without an API key but is heavily rate-limited.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::http_client;
use crate::models::{AppError, AppResult, TronScanConfig};

/// TronScan `accountType` for a plain externally owned account
const ACCOUNT_TYPE_NORMAL: i64 = 1;
/// Weighted indicator count from which a `/contract` record is trusted
const CONTRACT_INDICATOR_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfo {
    pub address: Option<String>,
    /// SUN
    pub balance: Option<i64>,
    pub date_created: Option<i64>,
    #[serde(rename = "totalTransactionCount")]
    pub total_transaction_count: Option<u64>,
    #[serde(rename = "accountType")]
    pub account_type: Option<i64>,
    #[serde(default)]
    pub is_sr: bool,
    #[serde(default)]
    pub is_committee: bool,
    pub message: Option<String>,
}

impl AccountInfo {
    /// Super representatives, committee members and normal accounts are wallets
    pub fn is_known_wallet(&self) -> bool {
        self.is_sr || self.is_committee || self.account_type == Some(ACCOUNT_TYPE_NORMAL)
    }

    pub fn balance_trx(&self) -> f64 {
        sun_to_trx(self.balance.unwrap_or(0))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractCreator {
    pub address: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractTokenInfo {
    #[serde(rename = "tokenName")]
    pub name: Option<String>,
    #[serde(rename = "tokenAbbr")]
    pub symbol: Option<String>,
    #[serde(rename = "totalSupply")]
    pub total_supply: Option<Value>,
    #[serde(rename = "holderCount")]
    pub holder_count: Option<Value>,
    #[serde(rename = "transferCount")]
    pub transfer_count: Option<Value>,
    #[serde(default)]
    pub vip: bool,
}

/// One entry of `/contract`'s `data` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractRecord {
    pub name: Option<String>,
    pub tag1: Option<String>,
    pub description: Option<String>,
    pub creator: Option<ContractCreator>,
    #[serde(rename = "tokenInfo")]
    pub token_info: Option<ContractTokenInfo>,
    #[serde(rename = "methodMap")]
    pub method_map: Option<Value>,
    pub verify_status: Option<i64>,
    #[serde(rename = "contractType")]
    pub contract_type: Option<Value>,
    pub date_created: Option<i64>,
}

impl ContractRecord {
    /// TronScan answers `/contract` for plain wallets too, so the record only
    /// counts when enough contract-specific fields are filled in.
    pub fn contract_indicators(&self) -> f64 {
        let mut score = 0.0;
        if non_blank(&self.name) {
            score += 1.0;
        }
        if non_blank(&self.tag1) {
            score += 1.0;
        }
        if let Some(creator) = &self.creator {
            if non_blank(&creator.address) || non_blank(&creator.tx_hash) {
                score += 1.0;
            }
        }
        if self.token_info.is_some() {
            score += 1.0;
        }
        if self.method_map.as_ref().is_some_and(is_truthy) {
            score += 1.0;
        }
        if non_blank(&self.description) {
            score += 1.0;
        }
        // verify_status only supports other evidence
        if score >= 1.0 && self.verify_status.is_some() {
            score += 0.5;
        }
        score
    }

    pub fn looks_like_contract(&self) -> bool {
        self.contract_indicators() >= CONTRACT_INDICATOR_THRESHOLD
    }

    pub fn is_verified(&self) -> bool {
        self.verify_status.unwrap_or(0) > 0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenBalance {
    #[serde(rename = "tokenName")]
    pub name: Option<String>,
    #[serde(rename = "tokenAbbr", alias = "tokenSymbol")]
    pub symbol: Option<String>,
    /// Raw integer amount, string or number depending on token type
    pub balance: Option<Value>,
    #[serde(rename = "tokenDecimal")]
    pub decimals: Option<u32>,
}

impl TokenBalance {
    pub fn raw_balance(&self) -> String {
        match &self.balance {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "0".to_string(),
        }
    }

    /// Balance scaled by the token's decimals, if the raw amount parses
    pub fn readable_balance(&self) -> Option<f64> {
        let raw: f64 = self.raw_balance().parse().ok()?;
        let decimals = self.decimals.unwrap_or(0);
        Some(raw / 10f64.powi(decimals as i32))
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// TronScan API client
pub struct TronScanClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TronScanClient {
    pub fn new(config: &TronScanConfig, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("🌐 TronScan GET {}", url);

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header("TRON-PRO-API-KEY", key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::provider_failed(format!(
                "TronScan API error: {} for {}",
                response.status(),
                endpoint
            )));
        }

        Ok(response.json::<T>().await?)
    }

    /// Account details; `None` when TronScan does not know the address
    pub async fn account(&self, address: &str) -> AppResult<Option<AccountInfo>> {
        let raw: Value = self.get("account", &[("address", address)]).await?;
        let account = parse_account(raw);
        if account.is_none() {
            info!("📭 TronScan: no account data for {}", address);
        }
        Ok(account)
    }

    /// Contract record; `None` when the response has no contract data
    pub async fn contract(&self, address: &str) -> AppResult<Option<ContractRecord>> {
        let envelope: DataEnvelope<ContractRecord> =
            self.get("contract", &[("contract", address)]).await?;
        Ok(envelope.data.into_iter().next())
    }

    pub async fn token_balances(&self, address: &str, limit: usize) -> AppResult<Vec<TokenBalance>> {
        let limit = limit.to_string();
        let envelope: DataEnvelope<TokenBalance> = self
            .get(
                "account/tokens",
                &[("address", address), ("start", "0"), ("limit", limit.as_str())],
            )
            .await?;
        info!("📊 TronScan: {} token balance(s) for {}", envelope.data.len(), address);
        Ok(envelope.data)
    }
}

/// `/account` answers with an object, a one-element list or an error message
pub fn parse_account(raw: Value) -> Option<AccountInfo> {
    let object = match raw {
        Value::Array(items) => items.into_iter().next()?,
        other @ Value::Object(_) => other,
        _ => return None,
    };
    let account: AccountInfo = serde_json::from_value(object).ok()?;

    if account.address.is_none() && account.balance.is_none() {
        return None;
    }
    Some(account)
}

pub fn sun_to_trx(sun: i64) -> f64 {
    sun as f64 / crate::utils::constants::SUN_PER_TRX
}

fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}
