use std::{io, sync::Arc};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use crate::app_state::AppState;
use crate::backend::ChatBackend;
use crate::events::{handle_key_event, KeyOutcome};
use crate::ui::draw_ui;

/// Run the full-screen chat until the user leaves.
pub async fn run(backend: Arc<dyn ChatBackend>) -> Result<()> {
    info!("Starting chat TUI");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = AppState::new(backend);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    info!(turns = app.session.transcript().len(), "Chat TUI closed");
    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| draw_ui(f, &app.session, &mut app.view))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    tracing::debug!("Key event: {:?} with modifiers: {:?}", key.code, key.modifiers);
                    if handle_key_event(app, key) == KeyOutcome::Quit {
                        return Ok(());
                    }
                }
                Some(Ok(Event::Paste(data))) => app.paste(&data),
                // Resizes and the rest only need a redraw.
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => return Ok(()),
            },
            Some(completion) = app.next_completion() => app.apply(completion),
        }
    }
}
