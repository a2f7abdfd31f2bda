use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::constants;
use crate::session::{ChatSession, Turn, TurnKind};
use crate::ui_components::TranscriptView;

pub fn draw_ui(f: &mut ratatui::Frame, session: &ChatSession, view: &mut TranscriptView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Transcript
            Constraint::Length(3), // Input or farewell
        ])
        .split(f.area());

    render_transcript(f, session, view, chunks[0]);

    if session.is_active() {
        render_input_area(f, session, chunks[1]);
    } else {
        render_goodbye(f, chunks[1]);
    }
}

/// Lines for one turn: the text in its lane, the latency caption for bot
/// turns, then a spacer.
pub fn turn_lines(turn: &Turn) -> Vec<Line<'_>> {
    let (alignment, style) = match turn.kind {
        TurnKind::User => (Alignment::Right, Style::default().fg(Color::Cyan)),
        // System notices share the bot lane.
        TurnKind::Bot | TurnKind::System => (Alignment::Left, Style::default().fg(Color::White)),
    };

    let mut lines: Vec<Line> = turn
        .text
        .lines()
        .map(|line| Line::from(Span::styled(line, style)).alignment(alignment))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("").alignment(alignment));
    }

    if let Some(caption) = turn.caption() {
        lines.push(
            Line::from(Span::styled(
                caption,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(alignment),
        );
    }
    lines.push(Line::from(""));
    lines
}

fn render_transcript(
    f: &mut ratatui::Frame,
    session: &ChatSession,
    view: &mut TranscriptView,
    area: Rect,
) {
    view.sync(session.version());

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Chat")
        .title_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);

    let lines: Vec<Line> = session.transcript().iter().flat_map(turn_lines).collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

    let total = paragraph.line_count(inner.width);
    let max_scroll = total.saturating_sub(inner.height as usize);
    let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
    let scroll = view.position(max_scroll);

    f.render_widget(paragraph.block(block).scroll((scroll, 0)), area);
    view.render_scrollbar(f, area);
}

fn render_input_area(f: &mut ratatui::Frame, session: &ChatSession, area: Rect) {
    let title = if session.is_pending() {
        "Waiting for reply..."
    } else {
        "Message (Enter to send, Esc to leave)"
    };

    let content = if session.draft().is_empty() {
        Line::from(Span::styled(
            constants::INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(session.draft())
    };

    let input = Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if session.accepts_input() {
        let width = Line::from(session.draft()).width() as u16;
        let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}

fn render_goodbye(f: &mut ratatui::Frame, area: Rect) {
    let goodbye = Paragraph::new(constants::GOODBYE)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(goodbye, area);
}
