// Reference chat backend. Speaks the same POST /chat contract as the real
// inference server so the client can be run and tested without one.

use std::{net::SocketAddr, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::post,
    serve, Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::constants;

/// Produces the reply text for a prompt.
pub trait Responder: Send + Sync {
    fn respond(&self, prompt: &str) -> String;
}

/// Answers with the prompt itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoResponder;

impl Responder for EchoResponder {
    fn respond(&self, prompt: &str) -> String {
        prompt.to_string()
    }
}

#[derive(Clone)]
struct AppState {
    responder: Arc<dyn Responder>,
}

/// Format characters that render as nothing: zero-width spaces and joiners,
/// bidi controls, soft hyphens, BOMs, tag characters and private-use code
/// points.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{E0000}'..='\u{E007F}'
    )
}

pub fn strip_invisible(prompt: &str) -> String {
    prompt.chars().filter(|c| !is_invisible(*c)).collect()
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let input = body.get("input").and_then(Value::as_str).unwrap_or("");
    if input.is_empty() {
        return Ok(Json(json!({ "error": constants::NO_INPUT_ERROR })));
    }

    let prompt = strip_invisible(input);
    if prompt.len() != input.len() {
        info!(
            removed = input.chars().count() - prompt.chars().count(),
            "Stripped invisible characters from prompt"
        );
    }

    let responder = state.responder.clone();
    let started = Instant::now();
    let response = tokio::task::spawn_blocking(move || responder.respond(&prompt))
        .await
        .map_err(|e| {
            error!("Responder task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Responder failed".to_string())
        })?;
    let time_taken = started.elapsed().as_secs_f64();

    info!(time_taken, "Answered chat request");
    Ok(Json(json!({
        "response": response,
        "time_taken": time_taken,
    })))
}

pub fn router(responder: Arc<dyn Responder>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat_handler))
        .with_state(AppState { responder })
        .layer(cors)
        .layer(TraceLayer::new_for_http()) // Add request logging
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    info!("Ctrl-C received, initiating shutdown...");
}

pub async fn start_web_server(addr: SocketAddr, responder: Arc<dyn Responder>) -> Result<()> {
    let app = router(responder);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;
    info!("Chat backend listening on http://{}/chat", addr);

    serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;

    info!("Shutdown complete.");
    Ok(())
}
