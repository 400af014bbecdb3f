//! Frame rendering
//!
//! Pure formatting from [`ViewState`] + [`RenderStyle`] to the full frame.
//! Style decisions (glyphs, color) are resolved once at startup and passed in
//! immutably; nothing here touches the terminal or global state.

use unicode_width::UnicodeWidthChar;

use crate::config::{ColorMode, OutputConfig};
use crate::term::TerminalCapabilities;

use super::state::ViewState;

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Immutable appearance settings, resolved from config + detected terminal
/// capabilities when the viewer starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub unicode: bool,
    pub color: bool,
}

impl RenderStyle {
    pub fn resolve(output: &OutputConfig, caps: &TerminalCapabilities) -> Self {
        let color = match output.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        Self {
            unicode: output.unicode && caps.supports_unicode,
            color,
        }
    }
}

/// Render the complete frame: header, body, footer. Lines are joined with
/// `\r\n` for raw-mode output.
pub fn render_frame(state: &ViewState, style: &RenderStyle) -> String {
    let width = state.width() as usize;
    let mut lines = Vec::with_capacity(state.height() as usize);

    lines.push(header_line(state, style, width));
    lines.push(rule(style, width));

    let mut body = 0;
    for line in state.visible_lines() {
        lines.push(truncate_to_width(line, width));
        body += 1;
    }
    // Pad so the footer always sits on the bottom rows
    for _ in body..state.viewport_rows() {
        lines.push(String::new());
    }

    lines.push(rule(style, width));
    lines.push(footer_line(state, style, width));

    // A terminal shorter than header + footer cannot fit the full chrome;
    // never emit more rows than it has.
    lines.truncate(state.height() as usize);

    lines.join("\r\n")
}

fn header_line(state: &ViewState, style: &RenderStyle, width: usize) -> String {
    let sep = if style.unicode { "·" } else { "-" };
    let line = truncate_to_width(&format!(" asmwatch {sep} {}", state.target()), width);
    if style.color {
        format!("{BOLD}{line}{RESET}")
    } else {
        line
    }
}

fn footer_line(state: &ViewState, style: &RenderStyle, width: usize) -> String {
    let status = match state.stamp() {
        None => "waiting".to_string(),
        Some(stamp) if stamp.ok => format!("compiled {}", stamp.at),
        Some(stamp) => format!("error {}", stamp.at),
    };

    let hints = if style.unicode {
        "↑/↓ scroll  q quit"
    } else {
        "up/down scroll  q quit"
    };
    let line = truncate_to_width(
        &format!(" {status}  {:>3}%  {hints}", state.scroll_percent()),
        width,
    );

    if !style.color {
        return line;
    }
    match state.stamp() {
        Some(stamp) if !stamp.ok => format!("{RED}{line}{RESET}"),
        _ => format!("{DIM}{line}{RESET}"),
    }
}

fn rule(style: &RenderStyle, width: usize) -> String {
    let glyph = if style.unicode { '─' } else { '-' };
    let line: String = std::iter::repeat(glyph).take(width).collect();
    if style.color {
        format!("{DIM}{line}{RESET}")
    } else {
        line
    }
}

/// Truncate to a display width, never splitting a wide character
fn truncate_to_width(line: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
