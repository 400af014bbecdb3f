//! Keyboard and mouse input mapping for the viewer loop

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Lines moved per mouse wheel notch
pub const WHEEL_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Quit,
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Convert a keyboard event to a ViewAction
pub fn key_to_action(key: KeyEvent) -> Option<ViewAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ViewAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(ViewAction::ScrollUp(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(ViewAction::ScrollDown(1)),
        KeyCode::PageUp => Some(ViewAction::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(ViewAction::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(ViewAction::Top),
        KeyCode::End | KeyCode::Char('G') => Some(ViewAction::Bottom),
        _ => None,
    }
}

/// Convert a mouse event to a ViewAction (wheel scrolling only)
pub fn mouse_to_action(mouse: MouseEvent) -> Option<ViewAction> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(ViewAction::ScrollUp(WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(ViewAction::ScrollDown(WHEEL_LINES)),
        _ => None,
    }
}
