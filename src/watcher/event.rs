//! Watch update types and options

use std::path::PathBuf;
use std::time::Duration;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// File being watched and compiled
    pub target: PathBuf,
    /// Poll cadence for size checks
    pub interval: Duration,
}

/// One delivered result of a compile attempt.
///
/// Immutable once produced; ownership moves from the watcher through the
/// delivery channel to the viewer. The channel holds at most one update, so
/// the contract is latest-wins, not all-results-delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchUpdate {
    /// A successful compile; carries the full assembly text
    Assembly(String),
    /// A failed stat, compile, or read; carries the formatted message
    /// shown in place of the assembly
    Failed(String),
}

impl WatchUpdate {
    pub fn is_failure(&self) -> bool {
        matches!(self, WatchUpdate::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_flag() {
        assert!(WatchUpdate::Failed("boom".into()).is_failure());
        assert!(!WatchUpdate::Assembly(".globl main".into()).is_failure());
    }
}
