use chatbot::{ChatBackend, ChatConfig, ChatReply, ExchangeError, HttpBackend};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend_for(server: &MockServer) -> HttpBackend {
    let config = ChatConfig::new(format!("{}/chat", server.uri()));
    HttpBackend::new(&config).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_posts_input_and_decodes_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "input": "Hello" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi", "time_taken": 450 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let reply = backend.exchange("Hello").await.unwrap();

    assert_eq!(reply, ChatReply::new("Hi", 450.0));
}

#[test_log::test(tokio::test)]
async fn test_reply_fields_are_optional() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "No input provided." })))
        .mount(&server)
        .await;

    let reply = backend_for(&server).await.exchange("x").await.unwrap();

    assert_eq!(reply, ChatReply::default());
}

#[test_log::test(tokio::test)]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .mount(&server)
        .await;

    let err = backend_for(&server).await.exchange("Hello").await.unwrap_err();

    match err {
        ExchangeError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "model loading");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).await.exchange("Hello").await.unwrap_err();

    assert!(matches!(err, ExchangeError::Decode { .. }), "got {:?}", err);
}

#[test_log::test(tokio::test)]
async fn test_wrongly_typed_field_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi", "time_taken": "fast" })),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server).await.exchange("Hello").await.unwrap_err();

    assert!(matches!(err, ExchangeError::Decode { .. }), "got {:?}", err);
}

#[test_log::test(tokio::test)]
async fn test_unreachable_backend_is_an_error() {
    // Grab a free port, then close it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let backend = HttpBackend::new(&ChatConfig::new(format!("http://127.0.0.1:{}/chat", port))).unwrap();

    let err = backend.exchange("Hello").await.unwrap_err();

    assert!(matches!(err, ExchangeError::Transport { .. }), "got {:?}", err);
    assert!(err.to_string().contains(&format!("127.0.0.1:{}", port)));
}

#[test]
fn test_backend_keeps_configured_url() {
    let backend = HttpBackend::new(&ChatConfig::new("https://127.0.0.1:8000/chat").accept_invalid_certs(true)).unwrap();
    assert_eq!(backend.url(), "https://127.0.0.1:8000/chat");
}
