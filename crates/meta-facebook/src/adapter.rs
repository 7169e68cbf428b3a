//! Facebook Messenger and Pages adapter

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use tracing::info;

use meta_core::error::{ErrorCode, MetaError, Result};
use meta_core::graph::GraphClient;
use meta_core::models::{AnalyticsReport, PostReceipt, SendReceipt};
use meta_core::PlatformAdapter;

/// Facebook platform adapter.
///
/// Messaging goes through `me/messages`, feed posts through
/// `{page}/feed`, insights through `me/insights/{metric}`.
#[derive(Debug, Clone)]
pub struct FacebookAdapter {
    graph: GraphClient,
}

impl FacebookAdapter {
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
impl PlatformAdapter for FacebookAdapter {
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

        if let Some(url) = media_url {
            payload["message"] = json!({
                "attachment": {
                    "type": "image",
                    "payload": {"url": url, "is_reusable": true},
                }
            });
            // Facebook keeps the text alongside the attachment.
            if !content.is_empty() {
                payload["message"]["text"] = json!(content);
            }
        }

        let data = self.graph.post_json("me/messages", &payload).await?;
        info!(recipient_id, "sent Facebook message");

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
        // Recipient-only lookup would need a conversations query first;
        // unsupported by design.
        let conversation_id = conversation_id.filter(|id| !id.is_empty()).ok_or_else(|| {
            MetaError::new(
                ErrorCode::MissingIdentifier,
                "conversation_id is required for Facebook messages",
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
        let page_id = target_id.unwrap_or("me");

        let mut payload = json!({});
        if let Some(content) = content {
            payload["message"] = json!(content);
        }
        // Single-link posts only; the first media URL becomes the link.
        if let Some(url) = media_urls.and_then(|urls| urls.first()) {
            if !url.is_empty() {
                payload["link"] = json!(url);
            }
        }

        let data = self
            .graph
            .post_json(&format!("{page_id}/feed"), &payload)
            .await?;
        info!(page_id, "posted to Facebook feed");

        Ok(PostReceipt {
            post_id: data["id"].as_str().unwrap_or_default().to_string(),
        })
    }

    async fn get_analytics(&self, metric: &str, period: &str) -> Result<AnalyticsReport> {
        let data = self
            .graph
            .get(&format!("me/insights/{metric}"), &[("period", period)])
            .await?;

        Ok(AnalyticsReport {
            metric: metric.to_string(),
            period: period.to_string(),
            data: data["data"].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn adapter(server: &MockServer) -> FacebookAdapter {
        FacebookAdapter::with_base_url("fb-token", &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_send_text_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/me/messages"))
            .and(body_json(json!({
                "recipient": {"id": "user123"},
                "message": {"text": "hello"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"recipient_id": "user123", "message_id": "m_1"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = adapter(&server)
            .await
            .send_message("user123", "hello", None)
            .await
            .unwrap();
        assert_eq!(receipt.message_id, "m_1");
    }

    #[tokio::test]
    async fn test_send_media_keeps_text() {
        // Facebook re-attaches the text next to the attachment.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/me/messages"))
            .and(body_json(json!({
                "recipient": {"id": "user123"},
                "message": {
                    "attachment": {
                        "type": "image",
                        "payload": {"url": "https://cdn.example.com/a.jpg", "is_reusable": true},
                    },
                    "text": "caption",
                },
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message_id": "m_2"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let receipt = adapter(&server)
            .await
            .send_message("user123", "caption", Some("https://cdn.example.com/a.jpg"))
            .await
            .unwrap();
        assert_eq!(receipt.message_id, "m_2");
    }

    #[tokio::test]
    async fn test_send_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/me/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": {}})))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .await
            .send_message("user123", "hello", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthFailed);
    }

    #[tokio::test]
    async fn test_get_messages_requires_conversation_id() {
        let server = MockServer::start().await;
        // No mocks mounted: a request would fail loudly.
        let err = adapter(&server)
            .await
            .get_messages(None, Some("user123"), 10)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingIdentifier);
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_get_messages_by_conversation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/t_42/messages"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": [{"id": "m_1", "message": "hi"}, {"id": "m_2", "message": "yo"}]}),
            ))
            .mount(&server)
            .await;

        let messages = adapter(&server)
            .await
            .get_messages(Some("t_42"), None, 25)
            .await
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["id"], "m_1");
    }

    #[tokio::test]
    async fn test_post_content_to_feed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/page9/feed"))
            .and(body_json(json!({
                "message": "big news",
                "link": "https://cdn.example.com/a.jpg",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "page9_post1"})))
            .mount(&server)
            .await;

        let urls = vec!["https://cdn.example.com/a.jpg".to_string()];
        let receipt = adapter(&server)
            .await
            .post_content(Some("big news"), Some(&urls), Some("page9"))
            .await
            .unwrap();
        assert_eq!(receipt.post_id, "page9_post1");
    }

    #[tokio::test]
    async fn test_post_content_defaults_to_me() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/me/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "me_post1"})))
            .mount(&server)
            .await;

        let receipt = adapter(&server)
            .await
            .post_content(Some("text only"), None, None)
            .await
            .unwrap();
        assert_eq!(receipt.post_id, "me_post1");
    }

    #[tokio::test]
    async fn test_analytics_metric_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me/insights/impressions"))
            .and(query_param("period", "week"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": [{"name": "impressions", "values": [{"value": 321}]}]}),
            ))
            .mount(&server)
            .await;

        let report = adapter(&server)
            .await
            .get_analytics("impressions", "week")
            .await
            .unwrap();
        assert_eq!(report.metric, "impressions");
        assert_eq!(report.data[0]["values"][0]["value"], 321);
    }
}
