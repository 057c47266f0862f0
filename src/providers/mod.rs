//! Providers Module - External Data Sources
//!
//! TronScan explorer data and the generative model behind the TRON risk
//! provider. Other families have no provider yet.

pub mod genai;
pub mod tron_risk;
pub mod tronscan;

pub use genai::*;
pub use tron_risk::*;
pub use tronscan::*;

use std::time::Duration;

use crate::models::AppResult;
use crate::utils::constants::USER_AGENT;

/// Shared reqwest client settings for provider calls
pub(crate) fn http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}
