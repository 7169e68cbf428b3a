//! Platform adapter trait
//!
//! The variation point of the gateway: every platform implements the same
//! four operations against its own wire contract. Platforms that cannot
//! support an operation still implement the method and unconditionally
//! return `PLATFORM_NOT_SUPPORTED`, keeping the interface uniform.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::{AnalyticsReport, PostReceipt, SendReceipt};

/// Adapter over one platform's REST API.
///
/// Adapters hold only immutable state (token, endpoint); a concurrent host
/// may drive several calls on one adapter at the same time.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Send a direct message to a recipient.
    async fn send_message(
        &self,
        recipient_id: &str,
        content: &str,
        media_url: Option<&str>,
    ) -> Result<SendReceipt>;

    /// Retrieve message history from a conversation.
    ///
    /// Returns the raw platform message records.
    async fn get_messages(
        &self,
        conversation_id: Option<&str>,
        recipient_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<JsonValue>>;

    /// Publish content to the platform feed.
    async fn post_content(
        &self,
        content: Option<&str>,
        media_urls: Option<&[String]>,
        target_id: Option<&str>,
    ) -> Result<PostReceipt>;

    /// Retrieve analytics/insights for one metric.
    async fn get_analytics(&self, metric: &str, period: &str) -> Result<AnalyticsReport>;
}
