//! POST /chat integration tests
//!
//! Drives the axum router end to end with a scripted LLM client.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use toolchat::app;
use toolchat::config::Config;
use toolchat::llm::{CompletionResponse, ContentBlock, LlmError, MockLlmClient, Role};
use toolchat::server::router;

fn app_with(mock: Arc<MockLlmClient>) -> axum::Router {
    let state = app::app_state(&Config::default(), mock).unwrap();
    router(state)
}

async fn post_chat(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn lookup(customer_id: &str) -> CompletionResponse {
    CompletionResponse::tool_use("toolu_01", "get_customer_info", json!({ "customer_id": customer_id }))
}

/// Scenario: plain greeting is answered directly
#[tokio::test]
async fn test_direct_reply() {
    let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text("Hello!")]));
    let (status, body) = post_chat(app_with(mock.clone()), r#"{"message":"Hi"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reply": "Hello!"}));
    assert_eq!(mock.call_count(), 1);
}

/// Scenario: known customer goes through one tool round-trip
#[tokio::test]
async fn test_known_customer_lookup() {
    let mock = Arc::new(MockLlmClient::new(vec![
        lookup("CUST001"),
        CompletionResponse::text("Rajesh Kumar's monthly income is 75000."),
    ]));
    let (status, body) = post_chat(app_with(mock.clone()), r#"{"message":"What is CUST001's income?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Rajesh Kumar's monthly income is 75000.");

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools[0].name, "get_customer_info");

    let roles: Vec<Role> = requests[1].messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::Tool]);

    let ContentBlock::ToolResult { content, is_error, .. } = &requests[1].messages[2].content[0] else {
        panic!("expected tool_result block");
    };
    assert!(!is_error);
    let record: Value = serde_json::from_str(content).unwrap();
    assert_eq!(record["name"], "Rajesh Kumar");
    assert_eq!(record["monthlyIncome"], 75000);
    assert_eq!(record["creditScore"], 750);
}

/// Scenario: unknown customer still yields a reply from the second round
#[tokio::test]
async fn test_unknown_customer_gets_graceful_reply() {
    let mock = Arc::new(MockLlmClient::new(vec![
        lookup("CUST999"),
        CompletionResponse::text("I'm sorry, I couldn't find a customer with ID CUST999."),
    ]));
    let (status, body) = post_chat(app_with(mock.clone()), r#"{"message":"Info for CUST999"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["reply"].as_str().unwrap().is_empty());
    assert_eq!(mock.call_count(), 2);

    let ContentBlock::ToolResult { content, is_error, .. } = &mock.requests()[1].messages[2].content[0] else {
        panic!("expected tool_result block");
    };
    assert!(is_error);
    assert_eq!(content, r#"{"error":"Customer not found"}"#);
}

/// Scenario: missing message is rejected before any LLM call
#[tokio::test]
async fn test_missing_message_is_400() {
    let mock = Arc::new(MockLlmClient::default());
    let (status, body) = post_chat(app_with(mock.clone()), "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Message is required"}));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_empty_message_is_400() {
    let mock = Arc::new(MockLlmClient::default());
    let (status, body) = post_chat(app_with(mock.clone()), r#"{"message":"","sessionId":"s-1"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_makes_no_calls() {
    let mock = Arc::new(MockLlmClient::default());
    let (status, body) = post_chat(app_with(mock.clone()), r#"{"message": "#).await;

    assert!(status.is_client_error());
    assert!(body["error"].is_string());
    assert_eq!(mock.call_count(), 0);
}

/// Scenario: adapter auth failure surfaces as 500 with its message
#[tokio::test]
async fn test_llm_auth_failure_is_500() {
    let mock = Arc::new(MockLlmClient::with_results(vec![Err(LlmError::Auth(
        "invalid x-api-key".to_string(),
    ))]));
    let (status, body) = post_chat(app_with(mock.clone()), r#"{"message":"Hi"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Authentication failed: invalid x-api-key"}));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_session_id_does_not_carry_history() {
    let mock = Arc::new(MockLlmClient::new(vec![
        CompletionResponse::text("First"),
        CompletionResponse::text("Second"),
    ]));
    let app = app_with(mock.clone());

    post_chat(app.clone(), r#"{"message":"one","sessionId":"abc"}"#).await;
    let (_, body) = post_chat(app, r#"{"message":"two","sessionId":"abc"}"#).await;

    assert_eq!(body["reply"], "Second");
    let second = &mock.requests()[1];
    assert_eq!(second.messages.len(), 1);
    assert_eq!(second.messages[0].content[0], ContentBlock::text("two"));
}

#[tokio::test]
async fn test_health() {
    let app = app_with(Arc::new(MockLlmClient::default()));
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
