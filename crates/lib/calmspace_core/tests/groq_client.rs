//! Groq client against a mock completions endpoint.

use calmspace_core::llm::groq::GroqClient;
use calmspace_core::llm::{ChatMessage, ChatModel, LlmConfig, LlmError, MAX_ATTEMPTS};
use httpmock::Method::POST;
use httpmock::MockServer;

fn config(server: &MockServer, api_key: Option<&str>, max_attempts: u32) -> LlmConfig {
    LlmConfig {
        api_key: api_key.map(str::to_string),
        base_url: server.url("/openai/v1"),
        max_attempts,
        ..LlmConfig::default()
    }
}

#[tokio::test]
async fn returns_trimmed_first_choice() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/v1/chat/completions")
            .header("authorization", "Bearer test-key")
            .body_contains("\"model\":\"llama-3.3-70b-versatile\"")
            .body_contains("\"max_tokens\":300");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"choices":[{"message":{"role":"assistant","content":"  I'm here for you.  "}}]}"#);
    });

    let client = GroqClient::new(config(&server, Some("test-key"), 1)).unwrap();
    let reply = client
        .complete(&[ChatMessage::system("be kind"), ChatMessage::user("hi")])
        .await
        .unwrap();

    mock.assert();
    assert_eq!(reply, "I'm here for you.");
}

#[tokio::test]
async fn missing_api_key_fails_without_request() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(200).body("{}");
    });

    let client = GroqClient::new(config(&server, None, 1)).unwrap();
    assert!(!client.is_configured());

    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
    assert!(matches!(err, LlmError::Config(_)));
    mock.assert_hits(0);
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(401).body("invalid api key");
    });

    let client = GroqClient::new(config(&server, Some("bad"), 3)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    mock.assert_hits(1);
    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_error_is_retried() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(503).body("overloaded");
    });

    let client = GroqClient::new(config(&server, Some("k"), 2)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    mock.assert_hits(2);
    assert!(err.is_transient());
}

#[tokio::test]
async fn retry_attempts_are_capped() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(503).body("overloaded");
    });

    let client = GroqClient::new(config(&server, Some("k"), u32::MAX)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    mock.assert_hits(MAX_ATTEMPTS as usize);
    assert!(err.is_transient());
}

#[tokio::test]
async fn empty_content_is_an_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/openai/v1/chat/completions");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#);
    });

    let client = GroqClient::new(config(&server, Some("k"), 1)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
    assert!(matches!(err, LlmError::Empty));
}
