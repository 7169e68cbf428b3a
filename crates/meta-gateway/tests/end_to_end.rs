//! End-to-end tool scenarios against a stubbed Graph API host.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meta_core::{Settings, ToolManager};
use meta_gateway::{register_tools, MetaClient};

fn manager_for(server: &MockServer) -> ToolManager {
    let settings = Settings {
        facebook_page_access_token: "fb-token".to_string(),
        instagram_access_token: "ig-token".to_string(),
        whatsapp_access_token: "wa-token".to_string(),
        whatsapp_phone_number_id: "555001".to_string(),
        graph_base_url: Some(server.uri()),
        ..Settings::default()
    };
    let mut manager = ToolManager::new();
    register_tools(&mut manager, Arc::new(MetaClient::new(settings)));
    manager
}

#[tokio::test]
async fn test_whatsapp_send_message_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/555001/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"messages": [{"id": "wamid.1"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let result = manager
        .execute(
            "meta_send_message",
            json!({
                "platform": "whatsapp",
                "recipient_id": "+380991234567",
                "content": "hi",
            }),
        )
        .await;

    assert!(!result.is_error);
    assert_eq!(result.output["success"], true);
    assert_eq!(result.output["platform"], "whatsapp");
    assert_eq!(result.output["data"]["message_id"], "wamid.1");
}

#[tokio::test]
async fn test_invalid_recipient_fails_before_any_request() {
    // Missing leading + must fail as a validation error, not auth or
    // network, with the stub never contacted.
    let server = MockServer::start().await;
    let manager = manager_for(&server);

    let result = manager
        .execute(
            "meta_send_message",
            json!({
                "platform": "whatsapp",
                "recipient_id": "380991234567",
                "content": "hi",
            }),
        )
        .await;

    assert!(result.is_error);
    assert_eq!(result.output["error_code"], "VALIDATION_ERROR");
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_whatsapp_history_not_supported() {
    let server = MockServer::start().await;
    let manager = manager_for(&server);

    let result = manager
        .execute(
            "meta_get_messages",
            json!({"platform": "whatsapp", "conversation_id": "t_1"}),
        )
        .await;

    assert!(result.is_error);
    assert_eq!(result.output["error_code"], "PLATFORM_NOT_SUPPORTED");
    assert_eq!(result.output["platform"], "whatsapp");
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_facebook_get_messages_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t_42/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": [{"id": "m_1", "message": "hello there"}]}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let result = manager
        .execute(
            "meta_get_messages",
            json!({"platform": "facebook", "conversation_id": "t_42", "limit": 5}),
        )
        .await;

    assert!(!result.is_error);
    assert_eq!(result.output["data"][0]["id"], "m_1");
    assert_eq!(result.output["message"], "Retrieved 1 messages");
}

#[tokio::test]
async fn test_instagram_post_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/me/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "container_1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/me/media_publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ig_post_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let result = manager
        .execute(
            "meta_post_content",
            json!({
                "platform": "instagram",
                "content": "sunset",
                "media_urls": ["https://cdn.example.com/a.jpg"],
            }),
        )
        .await;

    assert!(!result.is_error);
    assert_eq!(result.output["data"]["post_id"], "ig_post_1");
}

#[tokio::test]
async fn test_oauth_rejection_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/insights/impressions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"error": {"type": "OAuthException", "message": "Token expired"}}),
        ))
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let result = manager
        .execute(
            "meta_get_analytics",
            json!({"platform": "facebook", "metric": "impressions"}),
        )
        .await;

    assert!(result.is_error);
    assert_eq!(result.output["error_code"], "AUTH_FAILED");
    assert_eq!(result.output["platform"], "facebook");
}
