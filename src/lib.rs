//! asmwatch - live assembly viewer
//!
//! Watches a C source file, recompiles it to assembly on every size change,
//! and streams the result into a scrollable full-screen terminal viewer.
//! The pipeline is: change watcher (background thread) -> compiler adapter
//! (external `gcc -S`) -> single-slot delivery channel -> viewer.

pub mod compiler;
pub mod config;
pub mod error;
pub mod term;
pub mod viewer;
pub mod watcher;

// Re-exports for convenience
pub use compiler::{Compile, CompilerAdapter};
pub use config::{AsmSyntax, Config};
pub use error::{AsmwatchError, AsmwatchResult};
pub use term::detect_capabilities;
pub use viewer::{RenderStyle, ViewerOptions};
pub use watcher::{watch, WatchOptions, WatchUpdate};
