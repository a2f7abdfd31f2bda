use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chatbot::web_server::{router, EchoResponder, Responder};
use serde_json::{json, Value};

struct ShoutResponder;

impl Responder for ShoutResponder {
    fn respond(&self, prompt: &str) -> String {
        prompt.to_uppercase()
    }
}

fn echo_server() -> TestServer {
    TestServer::new(router(Arc::new(EchoResponder))).unwrap()
}

#[tokio::test]
async fn test_chat_echoes_prompt_with_timing() {
    let server = echo_server();

    let response = server.post("/chat").json(&json!({ "input": "Hello" })).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["response"], "Hello");
    let time_taken = body["time_taken"].as_f64().expect("time_taken is a number");
    assert!(time_taken >= 0.0);
}

#[tokio::test]
async fn test_chat_uses_responder() {
    let server = TestServer::new(router(Arc::new(ShoutResponder))).unwrap();

    let response = server.post("/chat").json(&json!({ "input": "quiet" })).await;

    let body: Value = response.json();
    assert_eq!(body["response"], "QUIET");
}

#[tokio::test]
async fn test_empty_input_is_rejected_in_body() {
    let server = echo_server();

    for payload in [json!({ "input": "" }), json!({}), json!({ "input": 42 })] {
        let response = server.post("/chat").json(&payload).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "error": "No input provided." }));
    }
}

#[tokio::test]
async fn test_invisible_characters_are_stripped() {
    let server = echo_server();

    let response = server
        .post("/chat")
        .json(&json!({ "input": "hi\u{200B}dden\u{2062}" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["response"], "hidden");
}

#[tokio::test]
async fn test_non_json_body_is_a_client_error() {
    let server = echo_server();

    let response = server
        .post("/chat")
        .text("input=hello")
        .expect_failure()
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_get_is_not_allowed() {
    let server = echo_server();

    let response = server.get("/chat").expect_failure().await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
