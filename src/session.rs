use std::fmt;

use tracing::{debug, error, info, warn};

use crate::backend::{ChatBackend, ChatReply};
use crate::constants;
use crate::error::ExchangeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    User,
    Bot,
    System,
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TurnKind::User => "You",
            TurnKind::Bot => "Bot",
            TurnKind::System => "System",
        };
        f.write_str(label)
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub kind: TurnKind,
    pub text: String,
    /// Server-reported processing time, floored. Only bot turns carry one.
    pub latency: Option<u64>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::User,
            text: text.into(),
            latency: None,
        }
    }

    pub fn bot(text: impl Into<String>, latency: Option<u64>) -> Self {
        Self {
            kind: TurnKind::Bot,
            text: text.into(),
            latency,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::System,
            text: text.into(),
            latency: None,
        }
    }

    /// Build the bot turn for a successful reply.
    pub fn from_reply(reply: ChatReply) -> Self {
        let text = reply
            .response
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| constants::NO_RESPONSE.to_string());
        // `as` saturates, so negative or NaN timings land on 0.
        let latency = reply.time_taken.map(|t| t.floor() as u64);
        Self::bot(text, latency)
    }

    /// The "Time taken" line under a bot turn, if it has one.
    pub fn caption(&self) -> Option<String> {
        match (self.kind, self.latency) {
            (TurnKind::Bot, Some(latency)) => Some(latency_caption(latency)),
            _ => None,
        }
    }
}

pub fn latency_caption(latency: u64) -> String {
    if latency < 1 {
        "Time taken: Under 1 second".to_string()
    } else {
        format!("Time taken: {} seconds", latency)
    }
}

/// A user turn that has been logged and now needs a network round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub id: u64,
    pub input: String,
}

/// What `begin_submit` did with the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank draft or closed session; nothing changed.
    Ignored,
    /// Another exchange is still in flight; nothing changed.
    Busy,
    /// The user said goodbye. The session is now closed for good.
    Ended,
    /// The user turn is in the transcript; the caller owes a `complete`.
    Dispatched(Exchange),
}

/// State of one chat conversation: draft, transcript and whether the user is
/// still chatting.
///
/// Submitting is split in two. `begin_submit` logs the user turn right away
/// and hands out an [`Exchange`]; `complete` appends exactly one bot or
/// system turn once the backend answers. Only one exchange may be in flight.
#[derive(Debug)]
pub struct ChatSession {
    draft: String,
    transcript: Vec<Turn>,
    active: bool,
    pending: Option<u64>,
    next_exchange: u64,
    version: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            transcript: Vec::new(),
            active: true,
            pending: None,
            next_exchange: 0,
            version: 0,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Bumped on every append. The view scrolls to the bottom when it moves.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether keystrokes should reach the draft right now.
    pub fn accepts_input(&self) -> bool {
        self.active && self.pending.is_none()
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    fn append(&mut self, turn: Turn) {
        self.transcript.push(turn);
        self.version += 1;
    }

    pub fn begin_submit(&mut self) -> Submission {
        if !self.active || self.draft.trim().is_empty() {
            return Submission::Ignored;
        }
        if let Some(id) = self.pending {
            debug!(exchange = id, "Submit rejected, exchange still pending");
            return Submission::Busy;
        }
        if constants::is_farewell(&self.draft) {
            info!("User ended the chat session");
            self.active = false;
            return Submission::Ended;
        }

        let id = self.next_exchange;
        self.next_exchange += 1;
        self.pending = Some(id);
        self.append(Turn::user(self.draft.clone()));
        debug!(exchange = id, "Dispatching exchange");

        Submission::Dispatched(Exchange {
            id,
            input: self.draft.clone(),
        })
    }

    /// Record how exchange `id` ended. Completions for anything other than the
    /// pending exchange are dropped.
    pub fn complete(&mut self, id: u64, outcome: Result<ChatReply, ExchangeError>) {
        if self.pending != Some(id) {
            warn!(exchange = id, pending = ?self.pending, "Dropping completion for unknown exchange");
            return;
        }
        self.pending = None;

        match outcome {
            Ok(reply) => {
                self.append(Turn::from_reply(reply));
                self.draft.clear();
            }
            Err(e) => {
                error!(exchange = id, "Error sending request: {}", e);
                self.append(Turn::system(constants::FAILURE_NOTICE));
            }
        }
    }

    /// Run both halves of a submit against `backend`.
    pub async fn submit<B>(&mut self, backend: &B) -> Submission
    where
        B: ChatBackend + ?Sized,
    {
        let submission = self.begin_submit();
        if let Submission::Dispatched(exchange) = &submission {
            let outcome = backend.exchange(&exchange.input).await;
            self.complete(exchange.id, outcome);
        }
        submission
    }
}
