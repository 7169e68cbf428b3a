//! Error taxonomy for the Meta gateway
//!
//! Every failure surfaced to a caller carries exactly one [`ErrorCode`]
//! together with a human-readable message. HTTP failures from the Graph API
//! are translated into a code by [`map_api_error`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standardized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidPlatform,
    InvalidRecipient,
    AuthFailed,
    ApiError,
    MissingIdentifier,
    PlatformNotSupported,
    InvalidMetric,
    InvalidPeriod,
    MissingContent,
    MediaUploadFailed,
    InsufficientPermissions,
    RateLimitExceeded,
    NetworkError,
    ValidationError,
}

impl ErrorCode {
    /// Wire representation, e.g. `AUTH_FAILED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPlatform => "INVALID_PLATFORM",
            ErrorCode::InvalidRecipient => "INVALID_RECIPIENT",
            ErrorCode::AuthFailed => "AUTH_FAILED",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::MissingIdentifier => "MISSING_IDENTIFIER",
            ErrorCode::PlatformNotSupported => "PLATFORM_NOT_SUPPORTED",
            ErrorCode::InvalidMetric => "INVALID_METRIC",
            ErrorCode::InvalidPeriod => "INVALID_PERIOD",
            ErrorCode::MissingContent => "MISSING_CONTENT",
            ErrorCode::MediaUploadFailed => "MEDIA_UPLOAD_FAILED",
            ErrorCode::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the gateway.
#[derive(Error, Debug)]
#[error("{code}: {message}")]
pub struct MetaError {
    pub code: ErrorCode,
    pub message: String,
}

impl MetaError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Validation failure (bad request shape or field value).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Authentication failure (missing or rejected credentials).
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthFailed, message)
    }

    /// Operation is permanently unsupported on the given platform.
    pub fn not_supported(platform: &str, operation: &str) -> Self {
        Self::new(
            ErrorCode::PlatformNotSupported,
            format!("Operation '{operation}' is not supported on platform '{platform}'"),
        )
    }
}

impl From<reqwest::Error> for MetaError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts and connection failures are transport problems, not
        // vendor-side rejections.
        let code = if err.is_timeout() || err.is_connect() {
            ErrorCode::NetworkError
        } else {
            ErrorCode::ApiError
        };
        Self::new(code, err.to_string())
    }
}

/// Result type alias for the gateway.
pub type Result<T> = std::result::Result<T, MetaError>;

/// Map a Graph API HTTP failure to a standardized error code.
///
/// 400 responses are further inspected: an `OAuthException` error type means
/// the token was rejected, a message mentioning permissions means the token
/// lacks a scope. Everything unrecognized defaults to `API_ERROR`.
pub fn map_api_error(status: u16, body: &serde_json::Value) -> ErrorCode {
    match status {
        401 | 403 => ErrorCode::AuthFailed,
        429 => ErrorCode::RateLimitExceeded,
        400 => {
            let error = &body["error"];
            let error_type = error["type"].as_str().unwrap_or_default();
            if error_type.contains("OAuthException") {
                return ErrorCode::AuthFailed;
            }
            let message = error["message"].as_str().unwrap_or_default();
            if message.to_lowercase().contains("permission") {
                return ErrorCode::InsufficientPermissions;
            }
            ErrorCode::ValidationError
        }
        s if s >= 500 => ErrorCode::ApiError,
        _ => ErrorCode::ApiError,
    }
}
