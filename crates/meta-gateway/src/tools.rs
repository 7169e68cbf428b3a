//! Gateway tool surface
//!
//! Four tools, one per operation. Each parses its JSON argument into the
//! typed request, runs the validators, dispatches through [`MetaClient`]
//! and wraps the outcome in a success or error envelope.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use tracing::error;

use meta_core::error::{MetaError, Result};
use meta_core::models::{
    AnalyticsRequest, ErrorEnvelope, GetMessagesRequest, MetaResponse, Platform,
    PostContentRequest, SendMessageRequest,
};
use meta_core::validators;
use meta_core::{Tool, ToolManager, ToolResult};

use crate::client::MetaClient;

/// Register the four gateway tools.
pub fn register_tools(manager: &mut ToolManager, client: Arc<MetaClient>) {
    manager.register(Arc::new(SendMessageTool {
        client: Arc::clone(&client),
    }));
    manager.register(Arc::new(GetMessagesTool {
        client: Arc::clone(&client),
    }));
    manager.register(Arc::new(PostContentTool {
        client: Arc::clone(&client),
    }));
    manager.register(Arc::new(GetAnalyticsTool { client }));
}

fn parse_platform(input: &JsonValue) -> Result<Platform> {
    let name = input["platform"]
        .as_str()
        .ok_or_else(|| MetaError::validation("platform is required"))?;
    Platform::from_str(name)
}

fn parse_request<T: serde::de::DeserializeOwned>(input: JsonValue) -> Result<T> {
    serde_json::from_value(input).map_err(|e| MetaError::validation(e.to_string()))
}

fn error_result(err: &MetaError, platform: Option<Platform>) -> ToolResult {
    error!(code = %err.code, message = %err.message, "tool execution failed");
    ToolResult::error(json!(ErrorEnvelope::new(err, platform)))
}

/// `meta_send_message`
pub struct SendMessageTool {
    client: Arc<MetaClient>,
}

impl SendMessageTool {
    async fn run(&self, platform: Platform, input: JsonValue) -> Result<MetaResponse> {
        let request: SendMessageRequest = parse_request(input)?;
        request.validate()?;
        validators::validate_media_url(request.media_url.as_deref())?;
        if platform == Platform::Whatsapp {
            validators::validate_whatsapp_recipient(&request.recipient_id)?;
        }

        let receipt = self
            .client
            .send_message_with_retry(
                platform,
                &request.recipient_id,
                &request.content,
                request.media_url.as_deref(),
            )
            .await?;

        Ok(MetaResponse::ok(
            platform,
            json!(receipt),
            "Message sent successfully",
        ))
    }
}

#[async_trait]
impl Tool for SendMessageTool {
    fn name(&self) -> &str {
        "meta_send_message"
    }

    fn description(&self) -> &str {
        "Send a message to a recipient on Facebook, Instagram, or WhatsApp"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "platform": {
                    "type": "string",
                    "enum": ["facebook", "instagram", "whatsapp"],
                    "description": "Target platform",
                },
                "recipient_id": {
                    "type": "string",
                    "description": "Recipient ID (PSID for FB/IG, E.164 phone for WhatsApp)",
                },
                "content": {
                    "type": "string",
                    "description": "Message text content",
                },
                "media_url": {
                    "type": "string",
                    "description": "Optional media URL to attach",
                },
            },
            "required": ["platform", "recipient_id", "content"],
        })
    }

    async fn execute(&self, input: JsonValue) -> ToolResult {
        let platform = match parse_platform(&input) {
            Ok(p) => p,
            Err(e) => return error_result(&e, None),
        };
        match self.run(platform, input).await {
            Ok(response) => ToolResult::success(json!(response)),
            Err(e) => error_result(&e, Some(platform)),
        }
    }
}

/// `meta_get_messages`
pub struct GetMessagesTool {
    client: Arc<MetaClient>,
}

impl GetMessagesTool {
    async fn run(&self, platform: Platform, input: JsonValue) -> Result<MetaResponse> {
        let request: GetMessagesRequest = parse_request(input)?;
        request.validate()?;
        validators::validate_get_messages_request(
            request.conversation_id.as_deref(),
            request.recipient_id.as_deref(),
        )?;

        let adapter = self.client.get_adapter(platform)?;
        let messages = adapter
            .get_messages(
                request.conversation_id.as_deref(),
                request.recipient_id.as_deref(),
                request.limit,
            )
            .await?;

        let message = format!("Retrieved {} messages", messages.len());
        Ok(MetaResponse::ok(platform, json!(messages), message))
    }
}

#[async_trait]
impl Tool for GetMessagesTool {
    fn name(&self) -> &str {
        "meta_get_messages"
    }

    fn description(&self) -> &str {
        "Retrieve message history from a conversation (FB/IG only)"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "platform": {
                    "type": "string",
                    "enum": ["facebook", "instagram", "whatsapp"],
                    "description": "Target platform",
                },
                "conversation_id": {
                    "type": "string",
                    "description": "Conversation ID",
                },
                "recipient_id": {
                    "type": "string",
                    "description": "Recipient ID (alternative to conversation_id)",
                },
                "limit": {
                    "type": "integer",
                    "description": "Number of messages to retrieve (1-100)",
                    "default": 10,
                },
            },
            "required": ["platform"],
        })
    }

    async fn execute(&self, input: JsonValue) -> ToolResult {
        let platform = match parse_platform(&input) {
            Ok(p) => p,
            Err(e) => return error_result(&e, None),
        };
        match self.run(platform, input).await {
            Ok(response) => ToolResult::success(json!(response)),
            Err(e) => error_result(&e, Some(platform)),
        }
    }
}

/// `meta_post_content`
pub struct PostContentTool {
    client: Arc<MetaClient>,
}

impl PostContentTool {
    async fn run(&self, platform: Platform, input: JsonValue) -> Result<MetaResponse> {
        let request: PostContentRequest = parse_request(input)?;
        request.validate()?;
        validators::validate_post_content_request(
            platform,
            request.content.as_deref(),
            request.media_urls.as_deref(),
        )?;

        let adapter = self.client.get_adapter(platform)?;
        let receipt = adapter
            .post_content(
                request.content.as_deref(),
                request.media_urls.as_deref(),
                request.target_id.as_deref(),
            )
            .await?;

        Ok(MetaResponse::ok(
            platform,
            json!(receipt),
            "Content posted successfully",
        ))
    }
}

#[async_trait]
impl Tool for PostContentTool {
    fn name(&self) -> &str {
        "meta_post_content"
    }

    fn description(&self) -> &str {
        "Post content to Facebook or Instagram feed"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "platform": {
                    "type": "string",
                    "enum": ["facebook", "instagram"],
                    "description": "Target platform (FB or IG only)",
                },
                "content": {
                    "type": "string",
                    "description": "Text content or caption",
                },
                "media_urls": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Media URLs to post",
                },
                "target_id": {
                    "type": "string",
                    "description": "Optional target page/account ID",
                },
            },
            "required": ["platform"],
        })
    }

    async fn execute(&self, input: JsonValue) -> ToolResult {
        let platform = match parse_platform(&input) {
            Ok(p) => p,
            Err(e) => return error_result(&e, None),
        };
        match self.run(platform, input).await {
            Ok(response) => ToolResult::success(json!(response)),
            Err(e) => error_result(&e, Some(platform)),
        }
    }
}

/// `meta_get_analytics`
pub struct GetAnalyticsTool {
    client: Arc<MetaClient>,
}

impl GetAnalyticsTool {
    async fn run(&self, platform: Platform, input: JsonValue) -> Result<MetaResponse> {
        // Metric and period parse to their own error codes, not a generic
        // validation failure.
        let metric = input["metric"]
            .as_str()
            .ok_or_else(|| MetaError::validation("metric is required"))?
            .parse::<meta_core::Metric>()?;
        let period = match input["period"].as_str() {
            Some(p) => p.parse::<meta_core::Period>()?,
            None => meta_core::Period::default(),
        };
        let request = AnalyticsRequest {
            platform,
            metric,
            period,
        };

        let adapter = self.client.get_adapter(platform)?;
        let report = adapter
            .get_analytics(request.metric.as_str(), request.period.as_str())
            .await?;

        Ok(MetaResponse::ok(
            platform,
            json!(report),
            "Analytics retrieved successfully",
        ))
    }
}

#[async_trait]
impl Tool for GetAnalyticsTool {
    fn name(&self) -> &str {
        "meta_get_analytics"
    }

    fn description(&self) -> &str {
        "Retrieve analytics/insights from Facebook or Instagram"
    }

    fn input_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "platform": {
                    "type": "string",
                    "enum": ["facebook", "instagram"],
                    "description": "Target platform (FB or IG only)",
                },
                "metric": {
                    "type": "string",
                    "enum": ["impressions", "reach", "engagement", "followers", "profile_views"],
                    "description": "Metric to retrieve",
                },
                "period": {
                    "type": "string",
                    "enum": ["day", "week", "month"],
                    "default": "day",
                    "description": "Time period for analytics",
                },
            },
            "required": ["platform", "metric"],
        })
    }

    async fn execute(&self, input: JsonValue) -> ToolResult {
        let platform = match parse_platform(&input) {
            Ok(p) => p,
            Err(e) => return error_result(&e, None),
        };
        match self.run(platform, input).await {
            Ok(response) => ToolResult::success(json!(response)),
            Err(e) => error_result(&e, Some(platform)),
        }
    }
}
