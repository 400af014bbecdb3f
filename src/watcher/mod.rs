//! File watcher driving recompilation
//!
//! Implements the background half of the pipeline:
//! - Size-based change polling (1s cadence by default)
//! - Compile-on-change through the [`Compile`](crate::compiler::Compile) seam
//! - Single-slot delivery to the viewer
//! - Cooperative shutdown via a shared running flag

mod event;
mod poll;
#[cfg(test)]
mod tests;

pub use event::{WatchOptions, WatchUpdate};
pub use poll::watch;
