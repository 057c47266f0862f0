//! TRON risk provider
//!
//! Pipeline: TronScan facts → prompt → generative model → verdict JSON.
//! Wallets and smart contracts get different prompts.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::genai::GenAiClient;
use super::tronscan::{AccountInfo, ContractRecord, TokenBalance, TronScanClient};
use crate::core::traits::{ProviderReport, RiskProvider};
use crate::models::{AppError, AppResult, BlockchainFamily, ServiceConfig};
use crate::utils::constants::MAX_PROMPT_TOKENS;

/// Token balances requested from TronScan per wallet
const TOKEN_FETCH_LIMIT: usize = 20;
const REPORT_HEADER: &str = "🤖 **Basic AI Analysis**";

pub struct TronRiskProvider {
    tronscan: TronScanClient,
    genai: GenAiClient,
}

impl TronRiskProvider {
    pub fn new(config: &ServiceConfig) -> AppResult<Self> {
        Ok(Self {
            tronscan: TronScanClient::new(&config.tronscan, config.provider_timeout)?,
            genai: GenAiClient::new(&config.genai, config.provider_timeout)?,
        })
    }

    async fn build_prompt(&self, address: &str) -> AppResult<String> {
        let account = self.tronscan.account(address).await?;

        let wallet = account.as_ref().is_some_and(AccountInfo::is_known_wallet);
        let contract = if wallet {
            None
        } else {
            self.tronscan
                .contract(address)
                .await?
                .filter(ContractRecord::looks_like_contract)
        };

        if let Some(contract) = contract {
            info!("📜 {} detected as smart contract", address);
            return Ok(contract_prompt(address, &contract, account.as_ref()));
        }

        let account = account
            .ok_or_else(|| AppError::no_data(format!("TronScan has no account data for {}", address)))?;

        let tokens = match self.tronscan.token_balances(address, TOKEN_FETCH_LIMIT).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("⚠️ Token balances unavailable for {}: {}", address, e);
                Vec::new()
            }
        };
        Ok(wallet_prompt(address, &account, &tokens))
    }
}

#[async_trait]
impl RiskProvider for TronRiskProvider {
    fn name(&self) -> &'static str {
        "tronscan-genai"
    }

    async fn assess(&self, address: &str, blockchain: BlockchainFamily) -> AppResult<ProviderReport> {
        if blockchain != BlockchainFamily::Tron {
            return Err(AppError::provider_failed(format!(
                "{} cannot assess {} addresses",
                self.name(),
                blockchain
            )));
        }

        let prompt = self.build_prompt(address).await?;
        let answer = self.genai.generate(&prompt).await?;
        parse_ai_verdict(&answer)
    }
}

// ============================================
// Prompts
// ============================================

pub fn wallet_prompt(address: &str, account: &AccountInfo, tokens: &[TokenBalance]) -> String {
    format!(
        "Analyze this TRON WALLET ADDRESS for scam potential. \
         Address: {address}, \
         Balance: {balance:.6} TRX, \
         Total transactions: {tx_count}, \
         Creation time: {created}, \
         Token holdings: {holdings}. \
         Provide a risk score (0.0-1.0) and brief scam analysis. \
         Focus on: account age, transaction volume, balance patterns, token holdings diversity. \
         Consider: large token holdings may indicate accumulation schemes, \
         diverse small holdings may suggest airdrop farming, \
         stablecoin concentrations may indicate laundering. \
         IMPORTANT: Start your analysis report with 'This is a WALLET address.' \
         Respond in JSON format: {{\"risk_score\": 0.X, \"report\": \"This is a WALLET address. [analysis here]\"}}",
        address = address,
        balance = account.balance_trx(),
        tx_count = account.total_transaction_count.unwrap_or(0),
        created = display_time(account.date_created),
        holdings = token_holdings(tokens),
    )
}

pub fn contract_prompt(
    address: &str,
    contract: &ContractRecord,
    account: Option<&AccountInfo>,
) -> String {
    let balance = account.map_or(0.0, AccountInfo::balance_trx);
    let tx_count = account.and_then(|a| a.total_transaction_count).unwrap_or(0);
    let created = contract
        .date_created
        .filter(|t| *t != 0)
        .or_else(|| account.and_then(|a| a.date_created));
    let creator = contract
        .creator
        .as_ref()
        .and_then(|c| c.address.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    let contract_type = contract
        .contract_type
        .as_ref()
        .map(value_text)
        .unwrap_or_else(|| "Unknown".to_string());

    let token_details = contract
        .token_info
        .as_ref()
        .map(|t| {
            format!(
                ", Token: {} ({}), Total Supply: {}, Holders: {}, Transfers: {}, VIP Status: {}",
                t.name.as_deref().unwrap_or("Unknown"),
                t.symbol.as_deref().unwrap_or("Unknown"),
                t.total_supply.as_ref().map_or("Unknown".to_string(), value_text),
                t.holder_count.as_ref().map_or("Unknown".to_string(), value_text),
                t.transfer_count.as_ref().map_or("Unknown".to_string(), value_text),
                t.vip,
            )
        })
        .unwrap_or_default();

    format!(
        "Analyze this TRON SMART CONTRACT for scam potential. \
         Contract Address: {address}, \
         Contract Type: {contract_type}, \
         Creator: {creator}, \
         Verified: {verified}, \
         Balance: {balance:.6} TRX, \
         Total transactions: {tx_count}, \
         Creation time: {created}{token_details}. \
         Provide a risk score (0.0-1.0) and brief scam analysis. \
         Focus on: contract verification status, creator reputation, \
         token economics (if applicable), transaction patterns, unusual contract behavior. \
         Consider: unverified contracts are higher risk, \
         contracts with excessive permissions are suspicious, \
         tokens with unfair distribution may be scams. \
         IMPORTANT: Start your analysis report with 'This is a SMART CONTRACT address.' \
         Respond in JSON format: {{\"risk_score\": 0.X, \"report\": \"This is a SMART CONTRACT address. [analysis here]\"}}",
        address = address,
        contract_type = contract_type,
        creator = creator,
        verified = contract.is_verified(),
        balance = balance,
        tx_count = tx_count,
        created = display_time(created),
        token_details = token_details,
    )
}

/// Top holdings with a positive balance, or "None"
fn token_holdings(tokens: &[TokenBalance]) -> String {
    let holdings: Vec<String> = tokens
        .iter()
        .take(MAX_PROMPT_TOKENS)
        .filter_map(|token| {
            let name = token.name.as_deref().unwrap_or("Unknown");
            let symbol = token.symbol.as_deref().unwrap_or("");
            match token.readable_balance() {
                Some(amount) if amount > 0.0 => Some(format!("{} ({}): {:.6}", name, symbol, amount)),
                Some(_) => None,
                None => {
                    let raw = token.raw_balance();
                    (raw != "0").then(|| format!("{} ({}): {}", name, symbol, raw))
                }
            }
        })
        .collect();

    if holdings.is_empty() {
        "None".to_string()
    } else {
        holdings.join("; ")
    }
}

/// TronScan timestamps are epoch milliseconds
fn display_time(millis: Option<i64>) -> String {
    millis
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================
// Verdict parsing
// ============================================

#[derive(Debug, Deserialize)]
struct AiVerdict {
    risk_score: Option<Value>,
    report: Option<String>,
}

/// Parse the model's `{"risk_score": .., "report": ..}` answer.
///
/// Tolerates Markdown code fences and a stringified score. Anything else
/// is a malformed response.
pub fn parse_ai_verdict(answer: &str) -> AppResult<ProviderReport> {
    let cleaned = strip_code_fence(answer);
    let verdict: AiVerdict = serde_json::from_str(cleaned)?;

    let score = match verdict.risk_score {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::invalid_response("AI verdict has no numeric risk_score"))?;

    if !(0.0..=1.0).contains(&score) {
        return Err(AppError::invalid_response(format!(
            "AI risk_score {} outside [0, 1]",
            score
        )));
    }

    let report = verdict
        .report
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::invalid_response("AI verdict has an empty report"))?;

    Ok(ProviderReport {
        score,
        report: format!("{}\n\n{}", REPORT_HEADER, report),
    })
}

fn strip_code_fence(answer: &str) -> &str {
    let mut text = answer.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
