//! Configuration module for Rebot Intel
//!
//! All values come from the environment with defaults from utils/constants.rs.
//! API keys are never logged.

use std::time::Duration;
use tracing::info;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_GENAI_BASE_URL, DEFAULT_GENAI_MAX_OUTPUT_TOKENS,
    DEFAULT_GENAI_MODEL, DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_TRONSCAN_BASE_URL,
};

/// TronScan explorer API settings
#[derive(Debug, Clone)]
pub struct TronScanConfig {
    pub base_url: String,
    /// Sent as `TRON-PRO-API-KEY` when present
    pub api_key: Option<String>,
}

/// Generative AI settings
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_output_tokens: u32,
}

/// Configuration for the address intelligence service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub tronscan: TronScanConfig,
    pub genai: GenAiConfig,
    /// HTTP timeout used by the concrete provider clients
    pub provider_timeout: Duration,
    pub api_host: String,
    pub api_port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tronscan: TronScanConfig {
                base_url: env_or("TRONSCAN_BASE_URL", DEFAULT_TRONSCAN_BASE_URL),
                api_key: env_secret("TRONSCAN_API_KEY"),
            },
            genai: GenAiConfig {
                base_url: env_or("GENAI_BASE_URL", DEFAULT_GENAI_BASE_URL),
                api_key: env_secret("GENAI_API_KEY"),
                model: env_or("GENAI_MODEL", DEFAULT_GENAI_MODEL),
                max_output_tokens: DEFAULT_GENAI_MAX_OUTPUT_TOKENS,
            },
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            api_host: env_or("REBOT_HOST", DEFAULT_API_HOST),
            api_port: DEFAULT_API_PORT,
        }
    }
}

impl ServiceConfig {
    /// Load from environment, rejecting malformed numeric values
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(tokens) = parse_env::<u32>("GENAI_MAX_OUTPUT_TOKENS")? {
            config.genai.max_output_tokens = tokens;
        }
        if let Some(secs) = parse_env::<u64>("PROVIDER_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(AppError::invalid_config("PROVIDER_TIMEOUT_SECS", "0"));
            }
            config.provider_timeout = Duration::from_secs(secs);
        }
        // Hosting platforms export PORT; REBOT_PORT is for local dev
        if let Some(port) = parse_env::<u16>("PORT")? {
            config.api_port = port;
        } else if let Some(port) = parse_env::<u16>("REBOT_PORT")? {
            config.api_port = port;
        }

        if config.genai.api_key.is_some() {
            info!("🔑 GENAI_API_KEY configured (key hidden for security)");
        }
        if config.tronscan.api_key.is_some() {
            info!("🔑 TRONSCAN_API_KEY configured (key hidden for security)");
        }

        Ok(config)
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "YOUR_API_KEY")
}

fn parse_env<T: std::str::FromStr>(name: &str) -> AppResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::invalid_config(name, &raw)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("REBOT_TEST_PARSE_GARBAGE", "not-a-number");
        let err = parse_env::<u16>("REBOT_TEST_PARSE_GARBAGE").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        std::env::remove_var("REBOT_TEST_PARSE_GARBAGE");
    }

    #[test]
    fn test_parse_env_missing_is_none() {
        let parsed = parse_env::<u16>("REBOT_TEST_PARSE_MISSING").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_placeholder_secret_is_ignored() {
        std::env::set_var("REBOT_TEST_SECRET_PLACEHOLDER", "YOUR_API_KEY");
        assert!(env_secret("REBOT_TEST_SECRET_PLACEHOLDER").is_none());
        std::env::remove_var("REBOT_TEST_SECRET_PLACEHOLDER");
    }
}
