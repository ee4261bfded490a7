use super::*;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

fn endpoint(server: &MockServer) -> Endpoint {
    Endpoint {
        url: format!("{}/chat/completions", server.uri()),
        model: "deepseek-chat".to_string(),
    }
}

fn chat_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_chat_reply_success() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/chat/completions"))
        .and(matchers::header("Authorization", "Bearer dk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chat_body("the reply")))
        .expect(1)
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let reply = client
        .chat_reply(&endpoint(&server), Some("dk-test"), "hello")
        .await
        .unwrap();
    assert_eq!(reply, "the reply");
}

#[tokio::test]
async fn test_chat_reply_sends_fixed_parameters() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::body_partial_json(serde_json::json!({
            "model": "deepseek-chat",
            "temperature": 0.7,
            "max_tokens": 800
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(chat_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    assert!(
        client
            .chat_reply(&endpoint(&server), Some("k"), "hello")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_chat_reply_401_classified_as_auth() {
    let server = MockServer::start().await;
    let error_body = r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string(error_body))
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let err = client
        .chat_reply(&endpoint(&server), Some("bad"), "hello")
        .await
        .unwrap_err();
    match err {
        ExplainError::Auth(message) => assert!(message.contains("Invalid API key")),
        other => panic!("expected Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn test_chat_reply_429_classified_as_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"error": {"message": "Insufficient Balance"}}"#),
        )
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let err = client
        .chat_reply(&endpoint(&server), Some("k"), "hello")
        .await
        .unwrap_err();
    match err {
        ExplainError::RateLimited(message) => assert!(message.contains("Insufficient Balance")),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_chat_reply_500_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let err = client
        .chat_reply(&endpoint(&server), Some("k"), "hello")
        .await
        .unwrap_err();
    match err {
        ExplainError::Http { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("expected Http, got {other:?}"),
    }
}

#[tokio::test]
async fn test_chat_reply_missing_choices_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"choices": []}"#))
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let err = client
        .chat_reply(&endpoint(&server), Some("k"), "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_chat_reply_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let err = client
        .chat_reply(&endpoint(&server), None, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_chat_reply_connection_refused_is_network() {
    let client = EndpointClient::new();
    let unreachable = Endpoint {
        url: "http://127.0.0.1:1/chat/completions".to_string(),
        model: "deepseek-chat".to_string(),
    };
    let err = client
        .chat_reply(&unreachable, Some("k"), "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::Network(_)));
}

#[tokio::test]
async fn test_free_reply_success_without_auth_header() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/explain"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"explanation": "free reply"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let reply = client
        .free_reply(
            &Endpoint { url: format!("{}/explain", server.uri()), model: String::new() },
            "hello",
        )
        .await
        .unwrap();
    assert_eq!(reply, "free reply");
}

#[tokio::test]
async fn test_free_reply_missing_explanation_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = EndpointClient::new();
    let err = client
        .free_reply(
            &Endpoint { url: format!("{}/explain", server.uri()), model: String::new() },
            "hello",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::MalformedResponse(_)));
}
