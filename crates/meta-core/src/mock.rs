//! Mock adapter for demo mode and tests
//!
//! Never touches the network. Responses are synthesized after a short
//! simulated delay; analytics values are derived from a hash of the inputs
//! so repeated calls stay reproducible within a run.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use tracing::info;
use uuid::Uuid;

use crate::adapter::PlatformAdapter;
use crate::error::Result;
use crate::models::{AnalyticsReport, Message, Platform, PostReceipt, SendReceipt};

/// Upper bound on synthesized history records.
const MAX_MOCK_MESSAGES: u32 = 3;

/// No-network adapter substituted for every platform in demo mode.
#[derive(Debug, Clone)]
pub struct MockAdapter {
    platform: Platform,
}

impl MockAdapter {
    pub fn new(platform: Platform) -> Self {
        info!(platform = %platform, "initialized mock adapter");
        Self { platform }
    }
}

#[async_trait]
impl PlatformAdapter for MockAdapter {
    async fn send_message(
        &self,
        recipient_id: &str,
        content: &str,
        _media_url: Option<&str>,
    ) -> Result<SendReceipt> {
        // Simulated network delay
        tokio::time::sleep(Duration::from_millis(100)).await;

        let message_id = format!("mock_msg_{}_{}", recipient_id, Uuid::new_v4().simple());
        info!(
            platform = %self.platform,
            recipient_id,
            content_length = content.len(),
            "[demo] sent message"
        );

        Ok(SendReceipt { message_id })
    }

    async fn get_messages(
        &self,
        conversation_id: Option<&str>,
        _recipient_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<JsonValue>> {
        tokio::time::sleep(Duration::from_millis(100)).await;

        let count = limit.min(MAX_MOCK_MESSAGES);
        let conversation = conversation_id.unwrap_or("unknown");

        let messages: Vec<JsonValue> = (0..count)
            .map(|i| {
                let record = Message {
                    id: format!("mock_msg_{i}"),
                    platform: self.platform,
                    conversation_id: conversation.to_string(),
                    sender_id: format!("user_{i}"),
                    recipient_id: "page_demo".to_string(),
                    content: Some(format!("This is mock message #{}", i + 1)),
                    media_url: None,
                    timestamp: Utc::now(),
                    raw_data: JsonValue::Null,
                };
                json!(record)
            })
            .collect();

        info!(
            platform = %self.platform,
            conversation_id = conversation,
            count = messages.len(),
            "[demo] retrieved messages"
        );

        Ok(messages)
    }

    async fn post_content(
        &self,
        content: Option<&str>,
        media_urls: Option<&[String]>,
        _target_id: Option<&str>,
    ) -> Result<PostReceipt> {
        tokio::time::sleep(Duration::from_millis(200)).await;

        let post_id = format!("mock_post_{}", Uuid::new_v4().simple());
        info!(
            platform = %self.platform,
            has_content = content.is_some(),
            has_media = media_urls.is_some(),
            "[demo] posted content"
        );

        Ok(PostReceipt { post_id })
    }

    async fn get_analytics(&self, metric: &str, period: &str) -> Result<AnalyticsReport> {
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Deterministic pseudo-value so repeated calls agree.
        let mut hasher = DefaultHasher::new();
        metric.hash(&mut hasher);
        period.hash(&mut hasher);
        let value = hasher.finish() % 10_000;

        info!(platform = %self.platform, metric, period, "[demo] retrieved analytics");

        Ok(AnalyticsReport {
            metric: metric.to_string(),
            period: period.to_string(),
            data: json!([{"name": metric, "period": period, "values": [{"value": value}]}]),
        })
    }
}
