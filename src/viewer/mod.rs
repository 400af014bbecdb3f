//! Full-screen terminal viewer
//!
//! Runs on the foreground task: consumes delivered compile results, reacts to
//! resize and input events, and redraws after every handled event. Terminal
//! setup is guarded so raw mode and the alternate screen are restored on
//! every exit path, including fatal render errors.

mod input;
mod render;
mod state;

pub use input::{key_to_action, mouse_to_action, ViewAction};
pub use render::{render_frame, RenderStyle};
pub use state::{CompileStamp, Phase, ViewState, FOOTER_ROWS, HEADER_ROWS, PLACEHOLDER};

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{cursor, execute, terminal, QueueableCommand};

use crate::error::AsmwatchResult;
use crate::watcher::WatchUpdate;

/// How long one input poll waits before the delivery channel is drained again
const INPUT_TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Watched file, shown in the header
    pub target: PathBuf,
    pub style: RenderStyle,
}

/// Raw-mode + alternate-screen guard
struct RawScreen;

impl RawScreen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the viewer until a quit key arrives or the terminal driver fails.
///
/// Clears `running` on the way out so the watcher thread winds down; the
/// caller joins it.
pub fn run(
    options: &ViewerOptions,
    updates: &Receiver<WatchUpdate>,
    running: &Arc<AtomicBool>,
) -> AsmwatchResult<()> {
    let screen = RawScreen::enter()?;
    let result = event_loop(options, updates);
    running.store(false, Ordering::SeqCst);
    drop(screen);
    result
}

fn event_loop(options: &ViewerOptions, updates: &Receiver<WatchUpdate>) -> AsmwatchResult<()> {
    let mut out = io::stdout();
    let mut state = ViewState::new(options.target.display().to_string());

    // crossterm emits no synthetic initial resize, so the startup dimensions
    // go through the same transition a resize event would.
    let (width, height) = terminal::size()?;
    state.handle_resize(width, height);
    draw(&mut out, &state, &options.style)?;

    loop {
        // Drain the delivery slot before blocking on input, then re-arm by
        // looping: no delivered result is dropped while the viewer is up.
        match updates.try_recv() {
            Ok(update) => {
                state.handle_update(update, timestamp());
                draw(&mut out, &state, &options.style)?;
                continue;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {} // watcher gone; keep the last frame
        }

        if !event::poll(INPUT_TICK)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key_to_action(key) {
                    Some(ViewAction::Quit) => return Ok(()),
                    Some(action) => {
                        apply(&mut state, action);
                        draw(&mut out, &state, &options.style)?;
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some(action) = mouse_to_action(mouse) {
                    apply(&mut state, action);
                    draw(&mut out, &state, &options.style)?;
                }
            }
            Event::Resize(width, height) => {
                state.handle_resize(width, height);
                draw(&mut out, &state, &options.style)?;
            }
            _ => {}
        }
    }
}

fn apply(state: &mut ViewState, action: ViewAction) {
    match action {
        ViewAction::ScrollUp(n) => state.scroll_up(n),
        ViewAction::ScrollDown(n) => state.scroll_down(n),
        ViewAction::PageUp => state.page_up(),
        ViewAction::PageDown => state.page_down(),
        ViewAction::Top => state.scroll_to_top(),
        ViewAction::Bottom => state.scroll_to_bottom(),
        ViewAction::Quit => {}
    }
}

fn draw(out: &mut impl Write, state: &ViewState, style: &RenderStyle) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.write_all(render_frame(state, style).as_bytes())?;
    out.flush()
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
