//! Polling watch loop

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::compiler::Compile;
use crate::error::AsmwatchError;

use super::event::{WatchOptions, WatchUpdate};

/// Granularity of the cancellation check inside the poll sleep
const CANCEL_SLICE: Duration = Duration::from_millis(50);

/// Watch the target file and deliver compile results until cancelled.
///
/// Size change is the change heuristic, as in the original tool. Known
/// limitation: same-size edits are missed, and a size-preserving write
/// followed by a later change can trigger one extra compile. The baseline
/// size is primed from an initial stat, so a file that never changes never
/// invokes the compiler.
///
/// Per-iteration failures (stat, compile, read) are delivered as display
/// text and the loop continues; nothing here is fatal. The loop exits when
/// `running` is cleared or when the receiving side of `updates` is gone.
pub fn watch(
    options: &WatchOptions,
    compiler: &impl Compile,
    updates: &SyncSender<WatchUpdate>,
    running: &Arc<AtomicBool>,
) {
    // Prime the baseline so startup alone does not count as a change. A
    // failed initial stat leaves the baseline unset; the file appearing
    // later is then treated as a change.
    let mut last_size: Option<u64> = fs::metadata(&options.target).map(|m| m.len()).ok();

    while running.load(Ordering::SeqCst) {
        match fs::metadata(&options.target) {
            Err(e) => {
                let err = AsmwatchError::Stat {
                    path: options.target.clone(),
                    source: e,
                };
                if updates.send(WatchUpdate::Failed(err.to_string())).is_err() {
                    return;
                }
            }
            Ok(meta) => {
                let size = meta.len();
                if last_size != Some(size) {
                    last_size = Some(size);

                    let update = match compiler.compile(&options.target) {
                        Ok(assembly) => WatchUpdate::Assembly(assembly),
                        Err(e) => WatchUpdate::Failed(e.to_string()),
                    };
                    if updates.send(update).is_err() {
                        return;
                    }
                }
            }
        }

        sleep_cancellable(options.interval, running);
    }
}

/// Sleep for `interval`, waking early when the running flag is cleared
fn sleep_cancellable(interval: Duration, running: &Arc<AtomicBool>) {
    let deadline = Instant::now() + interval;
    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        std::thread::sleep(CANCEL_SLICE.min(deadline - now));
    }
}
