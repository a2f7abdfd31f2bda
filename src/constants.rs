// Defaults, loaded from the environment where an override makes sense.

use std::env;

pub const DEFAULT_CHAT_URL: &str = "https://127.0.0.1:8000/chat";
pub const DEFAULT_LOG_FILE: &str = "chatbot.log";
pub const DEFAULT_SERVE_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVE_PORT: u16 = 8000;

/// Shown in place of a bot reply that carried no text.
pub const NO_RESPONSE: &str = "No response";
/// The one system message a failed exchange produces.
pub const FAILURE_NOTICE: &str = "Error: Failed to communicate with server";
pub const GOODBYE: &str = "Goodbye!";
pub const INPUT_PLACEHOLDER: &str = "Type your message...";
/// Returned by the reference backend for an empty prompt.
pub const NO_INPUT_ERROR: &str = "No input provided.";

lazy_static::lazy_static! {
    pub static ref CHAT_URL: String = env::var("CHATBOT_URL").unwrap_or_else(|_| DEFAULT_CHAT_URL.to_string());
    pub static ref LOG_FILE: String = env::var("CHATBOT_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
}

/// Words that end the session instead of being sent.
pub fn is_farewell(input: &str) -> bool {
    let lowered = input.to_lowercase();
    lowered == "exit" || lowered == "quit"
}
