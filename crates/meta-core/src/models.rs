//! Request and response models
//!
//! Typed request variants for the four tool operations, the normalized
//! message record, and the success/error response envelopes. Exactly one of
//! the two envelope shapes is returned per call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;

use crate::error::{ErrorCode, MetaError, Result};

/// Maximum content length for a direct message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;
/// Maximum caption/content length for a feed post.
pub const MAX_POST_LENGTH: usize = 2200;

/// Supported platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Whatsapp,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Whatsapp => "whatsapp",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "whatsapp" => Ok(Platform::Whatsapp),
            other => Err(MetaError::new(
                ErrorCode::InvalidPlatform,
                format!("Unknown platform: {other}"),
            )),
        }
    }
}

/// Supported analytics metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Impressions,
    Reach,
    Engagement,
    Followers,
    ProfileViews,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Impressions => "impressions",
            Metric::Reach => "reach",
            Metric::Engagement => "engagement",
            Metric::Followers => "followers",
            Metric::ProfileViews => "profile_views",
        }
    }
}

impl FromStr for Metric {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "impressions" => Ok(Metric::Impressions),
            "reach" => Ok(Metric::Reach),
            "engagement" => Ok(Metric::Engagement),
            "followers" => Ok(Metric::Followers),
            "profile_views" => Ok(Metric::ProfileViews),
            other => Err(MetaError::new(
                ErrorCode::InvalidMetric,
                format!("Unknown metric: {other}"),
            )),
        }
    }
}

/// Time period for analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

impl FromStr for Period {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(MetaError::new(
                ErrorCode::InvalidPeriod,
                format!("Unknown period: {other}"),
            )),
        }
    }
}

// Request models

/// Request to send a direct message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub platform: Platform,
    pub recipient_id: String,
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<()> {
        if self.recipient_id.is_empty() {
            return Err(MetaError::validation("recipient_id must not be empty"));
        }
        if self.content.is_empty() {
            return Err(MetaError::validation("content must not be empty"));
        }
        if self.content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(MetaError::validation(format!(
                "content exceeds {MAX_MESSAGE_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

fn default_limit() -> u32 {
    10
}

/// Request to retrieve message history.
#[derive(Debug, Clone, Deserialize)]
pub struct GetMessagesRequest {
    pub platform: Platform,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub recipient_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl GetMessagesRequest {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.limit) {
            return Err(MetaError::validation("limit must be between 1 and 100"));
        }
        Ok(())
    }
}

/// Request to post content to a feed.
#[derive(Debug, Clone, Deserialize)]
pub struct PostContentRequest {
    pub platform: Platform,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub media_urls: Option<Vec<String>>,
    #[serde(default)]
    pub target_id: Option<String>,
}

impl PostContentRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(content) = &self.content {
            if content.chars().count() > MAX_POST_LENGTH {
                return Err(MetaError::validation(format!(
                    "content exceeds {MAX_POST_LENGTH} characters"
                )));
            }
        }
        Ok(())
    }
}

/// Request for analytics/insights.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsRequest {
    pub platform: Platform,
    pub metric: Metric,
    #[serde(default)]
    pub period: Period,
}

// Response models

/// Unified message record.
///
/// Produced by `get_messages`; never constructed by callers. The raw platform
/// payload is preserved in `raw_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub platform: Platform,
    pub conversation_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub raw_data: JsonValue,
}

/// Receipt for a sent message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendReceipt {
    pub message_id: String,
}

/// Receipt for a published post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostReceipt {
    pub post_id: String,
}

/// Analytics result for a single metric/period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub metric: String,
    pub period: String,
    pub data: JsonValue,
}

/// Standardized success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct MetaResponse {
    pub success: bool,
    pub platform: Platform,
    pub data: JsonValue,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl MetaResponse {
    pub fn ok(platform: Platform, data: JsonValue, message: impl Into<String>) -> Self {
        Self {
            success: true,
            platform,
            data,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Standardized error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error_code: ErrorCode,
    pub error_message: String,
    /// Platform name, or `"unknown"` when the failure happened before the
    /// platform could be resolved.
    pub platform: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    pub fn new(error: &MetaError, platform: Option<Platform>) -> Self {
        Self {
            error_code: error.code,
            error_message: error.message.clone(),
            platform: platform
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            timestamp: Utc::now(),
        }
    }
}
