//! Instagram adapter
//!
//! Messaging mirrors the Facebook wire contract; publishing is the
//! two-phase container protocol (create, then publish), and insights take
//! the metric as a query parameter rather than a path segment.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use tracing::info;

use meta_core::error::{ErrorCode, MetaError, Result};
use meta_core::graph::GraphClient;
use meta_core::models::{AnalyticsReport, PostReceipt, SendReceipt};
use meta_core::PlatformAdapter;

/// Instagram platform adapter.
#[derive(Debug, Clone)]
pub struct InstagramAdapter {
    graph: GraphClient,
}

impl InstagramAdapter {
    /// Create an adapter against the production Graph API.
    pub fn new(access_token: &str, api_version: &str) -> Result<Self> {
        Ok(Self {
            graph: GraphClient::new(access_token, api_version)?,
        })
    }

    /// Create an adapter against an explicit base URL (used by tests).
    pub fn with_base_url(access_token: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            graph: GraphClient::with_base_url(access_token, base_url)?,
        })
    }
}

#[async_trait]
impl PlatformAdapter for InstagramAdapter {
    async fn send_message(
        &self,
        recipient_id: &str,
        content: &str,
        media_url: Option<&str>,
    ) -> Result<SendReceipt> {
        let mut payload = json!({
            "recipient": {"id": recipient_id},
            "message": {"text": content},
        });

        // Unlike Facebook, Instagram sends the attachment alone; the text is
        // dropped when media is present.
        if let Some(url) = media_url {
            payload["message"] = json!({
                "attachment": {"type": "image", "payload": {"url": url}}
            });
        }

        let data = self.graph.post_json("me/messages", &payload).await?;
        info!(recipient_id, "sent Instagram message");

        Ok(SendReceipt {
            message_id: data["message_id"].as_str().unwrap_or_default().to_string(),
        })
    }

    async fn get_messages(
        &self,
        conversation_id: Option<&str>,
        _recipient_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<JsonValue>> {
        let conversation_id = conversation_id.filter(|id| !id.is_empty()).ok_or_else(|| {
            MetaError::new(
                ErrorCode::MissingIdentifier,
                "conversation_id is required for Instagram messages",
            )
        })?;

        let limit = limit.to_string();
        let data = self
            .graph
            .get(
                &format!("{conversation_id}/messages"),
                &[("limit", limit.as_str())],
            )
            .await?;

        Ok(data["data"].as_array().cloned().unwrap_or_default())
    }

    async fn post_content(
        &self,
        content: Option<&str>,
        media_urls: Option<&[String]>,
        target_id: Option<&str>,
    ) -> Result<PostReceipt> {
        // Instagram cannot publish text-only posts.
        let image_url = media_urls
            .and_then(|urls| urls.first())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                MetaError::new(ErrorCode::MissingContent, "Instagram posts require media_urls")
            })?;

        let ig_user_id = target_id.unwrap_or("me");

        // Phase 1: stage a media container.
        let container_payload = json!({
            "image_url": image_url,
            "caption": content.unwrap_or(""),
        });
        let container = self
            .graph
            .post_json(&format!("{ig_user_id}/media"), &container_payload)
            .await?;
        let container_id = container["id"].as_str().unwrap_or_default();

        // Phase 2: publish it. A failure here leaves the container staged
        // but unpublished; there is no cleanup call.
        let publish_payload = json!({"creation_id": container_id});
        let data = self
            .graph
            .post_json(&format!("{ig_user_id}/media_publish"), &publish_payload)
            .await?;
        info!(ig_user_id, "posted to Instagram feed");

        Ok(PostReceipt {
            post_id: data["id"].as_str().unwrap_or_default().to_string(),
        })
    }

    async fn get_analytics(&self, metric: &str, period: &str) -> Result<AnalyticsReport> {
        let data = self
            .graph
            .get("me/insights", &[("metric", metric), ("period", period)])
            .await?;

        Ok(AnalyticsReport {
            metric: metric.to_string(),
            period: period.to_string(),
            data: data["data"].clone(),
        })
    }
}
