pub mod app_state;
pub mod backend;
pub mod chat;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod session;
pub mod tui;
pub mod ui;
pub mod ui_components;
pub mod web_server;

pub use backend::{ChatBackend, ChatReply, ChatRequest, HttpBackend};
pub use config::ChatConfig;
pub use error::ExchangeError;
pub use session::{ChatSession, Submission, Turn, TurnKind};
