//! Centralized Error Handling Module
//!
//! Every failure crossing a collaborator boundary (provider, store, config)
//! carries a unique error code so it can be grepped in production logs.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - ADDR_xxx: address classification errors
//! - PROVIDER_xxx: external risk analysis provider errors
//! - STORE_xxx: risk cache / memo store errors
//! - CFG_xxx: configuration errors
//! - API_xxx: REST surface errors
//!
//! Domain outcomes such as "clarification needed" or "not analyzed" are not
//! errors and never travel through this type.

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Address Errors
    // ============================================
    /// Input matches no known address encoding
    AddressFormatInvalid,
    /// Hint is not a possible blockchain for the address
    AddressHintInvalid,

    // ============================================
    // Provider Errors
    // ============================================
    /// Provider call failed (transport, HTTP status)
    ProviderFailed,
    /// Provider call timed out
    ProviderTimeout,
    /// Provider answered with something we cannot use
    ProviderInvalidResponse,
    /// Explorer has no data for the address
    ProviderNoData,

    // ============================================
    // Store Errors
    // ============================================
    /// Risk cache or memo store failed
    StoreFailure,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Missing environment variable
    ConfigMissingEnv,
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,

    // ============================================
    // Generic Errors
    // ============================================
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddressFormatInvalid => "ADDR_FORMAT_INVALID",
            Self::AddressHintInvalid => "ADDR_HINT_INVALID",

            Self::ProviderFailed => "PROVIDER_FAILED",
            Self::ProviderTimeout => "PROVIDER_TIMEOUT",
            Self::ProviderInvalidResponse => "PROVIDER_INVALID_RESPONSE",
            Self::ProviderNoData => "PROVIDER_NO_DATA",

            Self::StoreFailure => "STORE_FAILURE",

            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::ApiBadRequest => "API_BAD_REQUEST",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Check if error is retryable. The core never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderTimeout | Self::ProviderFailed | Self::StoreFailure
        )
    }

    /// True for failures raised by the external analysis provider
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderFailed
                | Self::ProviderTimeout
                | Self::ProviderInvalidResponse
                | Self::ProviderNoData
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    pub fn provider_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderFailed, msg)
    }

    pub fn provider_timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderTimeout, msg)
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderInvalidResponse, msg)
    }

    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderNoData, msg)
    }

    pub fn store_failure(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreFailure, msg)
    }

    pub fn missing_env(var_name: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingEnv,
            format!("Missing environment variable: {}", var_name),
        )
    }

    pub fn invalid_config(var_name: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: '{}'", var_name, value),
        )
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::ProviderTimeout, "Request timeout")
        } else if err.is_decode() {
            Self::new(ErrorCode::ProviderInvalidResponse, err.to_string())
        } else {
            Self::new(ErrorCode::ProviderFailed, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ProviderInvalidResponse, "JSON parse error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::provider_timeout("TronScan timed out");
        assert_eq!(err.code, ErrorCode::ProviderTimeout);
        assert_eq!(err.code_str(), "PROVIDER_TIMEOUT");
        assert_eq!(err.to_string(), "[PROVIDER_TIMEOUT] TronScan timed out");
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorCode::ProviderTimeout.is_retryable());
        assert!(ErrorCode::StoreFailure.is_retryable());
        assert!(!ErrorCode::ProviderInvalidResponse.is_retryable());
        assert!(!ErrorCode::AddressFormatInvalid.is_retryable());
    }

    #[test]
    fn test_provider_error_classification() {
        assert!(ErrorCode::ProviderNoData.is_provider_error());
        assert!(ErrorCode::ProviderInvalidResponse.is_provider_error());
        assert!(!ErrorCode::StoreFailure.is_provider_error());
    }

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert_eq!(err.code, ErrorCode::ProviderInvalidResponse);
        assert!(std::error::Error::source(&err).is_some());
    }
}
