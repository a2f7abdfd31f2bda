// Line-oriented chat for pipes and terminals where the full-screen UI is not
// wanted. Same session rules as the TUI, printed instead of drawn.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::backend::ChatBackend;
use crate::constants;
use crate::session::{ChatSession, Turn, TurnKind};

pub fn format_turn(turn: &Turn) -> String {
    let mut out = match turn.kind {
        TurnKind::System => turn.text.clone(),
        kind => format!("{}: {}", kind, turn.text),
    };
    if let Some(caption) = turn.caption() {
        out.push_str("\n  ");
        out.push_str(&caption);
    }
    out
}

/// Read one message per line from `reader` until the user says goodbye or
/// input runs out. Returns the finished session.
pub async fn run_line_chat<B, R, W>(backend: &B, reader: R, mut writer: W) -> Result<ChatSession>
where
    B: ChatBackend + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!("Starting line chat session...");
    let mut session = ChatSession::new();
    let mut lines = reader.lines();

    writeln!(writer, "Type your message, or 'exit' to leave.")?;
    while session.is_active() {
        write!(writer, "> ")?;
        writer.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        session.update_draft(line);

        let seen = session.transcript().len();
        session.submit(backend).await;
        // The user's own line is already on screen.
        for turn in &session.transcript()[seen..] {
            if turn.kind != TurnKind::User {
                writeln!(writer, "{}", format_turn(turn))?;
            }
        }
    }

    writeln!(writer, "{}", constants::GOODBYE)?;
    info!(turns = session.transcript().len(), "Line chat session finished.");
    Ok(session)
}
