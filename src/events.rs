use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app_state::AppState;

const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub fn handle_key_event(app: &mut AppState, key: KeyEvent) -> KeyOutcome {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
            return KeyOutcome::Quit;
        }

        // Transcript scrolling
        (KeyCode::PageUp, _) => app.view.scroll_up(PAGE),
        (KeyCode::PageDown, _) => app.view.scroll_down(PAGE),
        (KeyCode::Up, _) => app.view.scroll_up(1),
        (KeyCode::Down, _) => app.view.scroll_down(1),

        (KeyCode::Enter, _) => {
            let submission = app.submit();
            tracing::debug!(?submission, "Enter pressed");
        }

        // Draft editing, only while the session takes input
        (KeyCode::Backspace, _) if app.session.accepts_input() => app.session.pop_char(),
        (KeyCode::Char(c), modifiers)
            if app.session.accepts_input()
                && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.session.push_char(c)
        }

        _ => {}
    }
    KeyOutcome::Continue
}
