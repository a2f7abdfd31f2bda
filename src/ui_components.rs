use ratatui::{
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Scroll state of the transcript pane.
///
/// The pane follows the newest turn. Scrolling back is remembered as a
/// distance from the bottom until the transcript changes, at which point the
/// view snaps back down.
#[derive(Debug, Default)]
pub struct TranscriptView {
    seen_version: u64,
    offset_from_bottom: u16,
    max_scroll: u16,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap to the bottom if the transcript moved since the last frame.
    pub fn sync(&mut self, version: u64) {
        if version != self.seen_version {
            self.seen_version = version;
            self.offset_from_bottom = 0;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    pub fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    /// Top row to render, given how many rows the content overflows by.
    pub fn position(&mut self, max_scroll: u16) -> u16 {
        self.max_scroll = max_scroll;
        self.offset_from_bottom = self.offset_from_bottom.min(max_scroll);
        max_scroll - self.offset_from_bottom
    }

    pub fn render_scrollbar(&self, f: &mut ratatui::Frame, area: Rect) {
        if self.max_scroll == 0 {
            return;
        }
        let mut state = ScrollbarState::new(self.max_scroll as usize)
            .position((self.max_scroll - self.offset_from_bottom) as usize);
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        f.render_stateful_widget(scrollbar, area, &mut state);
    }
}
