//! WhatsApp Business Cloud adapter
//!
//! Only outbound messaging is available here. The Cloud API pushes inbound
//! traffic over webhooks and has no history-read endpoint, no feed and no
//! insights, so the other three operations are permanently unsupported.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use tracing::info;

use meta_core::error::{MetaError, Result};
use meta_core::graph::GraphClient;
use meta_core::models::{AnalyticsReport, PostReceipt, SendReceipt};
use meta_core::PlatformAdapter;

/// WhatsApp Business Cloud API adapter.
#[derive(Debug, Clone)]
pub struct WhatsAppAdapter {
    graph: GraphClient,
    phone_number_id: String,
}

impl WhatsAppAdapter {
    /// Create an adapter against the production Graph API.
    pub fn new(access_token: &str, phone_number_id: &str, api_version: &str) -> Result<Self> {
        Ok(Self {
            graph: GraphClient::new(access_token, api_version)?,
            phone_number_id: phone_number_id.to_string(),
        })
    }

    /// Create an adapter against an explicit base URL (used by tests).
    pub fn with_base_url(
        access_token: &str,
        phone_number_id: &str,
        base_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            graph: GraphClient::with_base_url(access_token, base_url)?,
            phone_number_id: phone_number_id.to_string(),
        })
    }
}

#[async_trait]
impl PlatformAdapter for WhatsAppAdapter {
    async fn send_message(
        &self,
        recipient_id: &str,
        content: &str,
        media_url: Option<&str>,
    ) -> Result<SendReceipt> {
        let payload = match media_url {
            // Media replaces the text payload entirely; there is no dual
            // text+image send.
            Some(url) => json!({
                "messaging_product": "whatsapp",
                "to": recipient_id,
                "type": "image",
                "image": {"link": url},
            }),
            None => json!({
                "messaging_product": "whatsapp",
                "to": recipient_id,
                "type": "text",
                "text": {"body": content},
            }),
        };

        let data = self
            .graph
            .post_json(&format!("{}/messages", self.phone_number_id), &payload)
            .await?;
        info!(recipient = recipient_id, "sent WhatsApp message");

        // The Cloud API reports ids in a messages array.
        let message_id = data["messages"][0]["id"]
            .as_str()
            .unwrap_or("unknown")
            .to_string();

        Ok(SendReceipt { message_id })
    }

    async fn get_messages(
        &self,
        _conversation_id: Option<&str>,
        _recipient_id: Option<&str>,
        _limit: u32,
    ) -> Result<Vec<JsonValue>> {
        Err(MetaError::not_supported("whatsapp", "get_messages"))
    }

    async fn post_content(
        &self,
        _content: Option<&str>,
        _media_urls: Option<&[String]>,
        _target_id: Option<&str>,
    ) -> Result<PostReceipt> {
        Err(MetaError::not_supported("whatsapp", "post_content"))
    }

    async fn get_analytics(&self, _metric: &str, _period: &str) -> Result<AnalyticsReport> {
        Err(MetaError::not_supported("whatsapp", "get_analytics"))
    }
}
