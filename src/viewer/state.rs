//! Viewer state machine
//!
//! Pure state: no terminal I/O here. The interactive loop feeds it the three
//! event classes (content update, resize, input) and re-renders after each.

use crate::watcher::WatchUpdate;

/// Rows consumed by the header (title + rule)
pub const HEADER_ROWS: u16 = 2;
/// Rows consumed by the footer (rule + status)
pub const FOOTER_ROWS: u16 = 2;

/// Body shown before the first delivery
pub const PLACEHOLDER: &str = "Waiting for the watched file to change...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No terminal dimensions known yet
    Uninitialized,
    /// Dimensions known, viewport sized
    Ready,
}

/// Outcome and wall-clock time of the most recent delivery, for the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileStamp {
    pub ok: bool,
    pub at: String,
}

#[derive(Debug)]
pub struct ViewState {
    target: String,
    phase: Phase,
    lines: Vec<String>,
    width: u16,
    height: u16,
    scroll: usize,
    stamp: Option<CompileStamp>,
}

impl ViewState {
    pub fn new(target: String) -> Self {
        Self {
            target,
            phase: Phase::Uninitialized,
            lines: vec![PLACEHOLDER.to_string()],
            width: 0,
            height: 0,
            scroll: 0,
            stamp: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn stamp(&self) -> Option<&CompileStamp> {
        self.stamp.as_ref()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Rows available for assembly text
    pub fn viewport_rows(&self) -> usize {
        self.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS) as usize
    }

    /// Lines currently in view
    pub fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .skip(self.scroll)
            .take(self.viewport_rows())
            .map(String::as_str)
    }

    /// Resize event. The first one carries the initial dimensions and moves
    /// the controller to `Ready`; later ones only resize the viewport.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.phase = Phase::Ready;
        self.clamp_scroll();
    }

    /// Content delivery. Replaces the body with the assembly text or, for a
    /// failed compile, the formatted diagnostic.
    pub fn handle_update(&mut self, update: WatchUpdate, at: String) {
        let (text, ok) = match update {
            WatchUpdate::Assembly(text) => (text, true),
            WatchUpdate::Failed(message) => (message, false),
        };
        self.lines = text.lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.stamp = Some(CompileStamp { ok, at });
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.max_scroll());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_rows().max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_rows().max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Percentage shown in the footer; 100 when everything fits
    pub fn scroll_percent(&self) -> u8 {
        let max = self.max_scroll();
        if max == 0 {
            100
        } else {
            (self.scroll * 100 / max) as u8
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_rows())
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }
}
