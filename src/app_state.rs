use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::backend::{ChatBackend, ChatReply};
use crate::error::ExchangeError;
use crate::session::{ChatSession, Exchange, Submission};
use crate::ui_components::TranscriptView;

/// How one exchange ended, reported back to the UI loop.
#[derive(Debug)]
pub struct Completion {
    pub id: u64,
    pub outcome: Result<ChatReply, ExchangeError>,
}

/// Everything the terminal front-end owns: the session, its scroll state,
/// and the channel exchanges report back on.
pub struct AppState {
    pub session: ChatSession,
    pub view: TranscriptView,
    backend: Arc<dyn ChatBackend>,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
}

impl AppState {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel(100);
        Self {
            session: ChatSession::new(),
            view: TranscriptView::new(),
            backend,
            completion_tx,
            completion_rx,
        }
    }

    /// Log the user turn and start the exchange in the background.
    pub fn submit(&mut self) -> Submission {
        let submission = self.session.begin_submit();
        if let Submission::Dispatched(exchange) = &submission {
            self.dispatch(exchange.clone());
        }
        submission
    }

    fn dispatch(&self, exchange: Exchange) {
        let backend = self.backend.clone();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.exchange(&exchange.input).await;
            debug!(exchange = exchange.id, ok = outcome.is_ok(), "Exchange finished");
            let completion = Completion {
                id: exchange.id,
                outcome,
            };
            if tx.send(completion).await.is_err() {
                warn!(exchange = exchange.id, "UI loop gone, dropping completion");
            }
        });
    }

    /// Insert pasted text into the draft. Line breaks become spaces since the
    /// input is a single line.
    pub fn paste(&mut self, text: &str) {
        if !self.session.accepts_input() {
            return;
        }
        for c in text.chars() {
            match c {
                '\n' | '\r' | '\t' => self.session.push_char(' '),
                c if c.is_control() => {}
                c => self.session.push_char(c),
            }
        }
    }

    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.recv().await
    }

    pub fn apply(&mut self, completion: Completion) {
        self.session.complete(completion.id, completion.outcome);
    }
}
