//! Tests for the watcher module

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tempfile::tempdir;

use super::event::{WatchOptions, WatchUpdate};
use super::poll::watch;
use crate::compiler::Compile;
use crate::error::{AsmwatchError, AsmwatchResult};

/// Fast cadence so tests settle quickly
const TEST_INTERVAL: Duration = Duration::from_millis(10);
/// Generous bound for an update that must arrive
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);
/// Window in which an update must NOT arrive (several poll cycles)
const QUIET_WINDOW: Duration = Duration::from_millis(150);

/// Replace the target atomically (write + rename) so the watcher never
/// observes a half-written size
fn set_content(target: &Path, content: &str) {
    let staging = target.with_extension("tmp");
    fs::write(&staging, content).unwrap();
    fs::rename(&staging, target).unwrap();
}

/// Compiler double: counts invocations, fails on demand
struct FakeCompiler {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeCompiler {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Compile for FakeCompiler {
    fn compile(&self, _target: &Path) -> AsmwatchResult<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) {
            Err(AsmwatchError::Compile {
                detail: "simulated diagnostic".to_string(),
            })
        } else {
            Ok(format!(".globl main # compile {n}\n"))
        }
    }
}

struct Harness {
    rx: Receiver<WatchUpdate>,
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Harness {
    fn start(target: PathBuf, compiler: Arc<FakeCompiler>) -> Self {
        let (tx, rx) = sync_channel(1);
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = std::thread::spawn(move || {
            let options = WatchOptions {
                target,
                interval: TEST_INTERVAL,
            };
            watch(&options, &*compiler, &tx, &running_clone);
        });

        Self {
            rx,
            running,
            handle,
        }
    }

    fn expect_update(&self) -> WatchUpdate {
        self.rx
            .recv_timeout(DELIVERY_TIMEOUT)
            .expect("expected an update from the watcher")
    }

    fn expect_quiet(&self) {
        match self.rx.recv_timeout(QUIET_WINDOW) {
            Err(RecvTimeoutError::Timeout) => {}
            other => panic!("expected no update, got {other:?}"),
        }
    }

    fn stop(self) {
        self.running.store(false, Ordering::SeqCst);
        self.handle.join().expect("watcher thread panicked");
    }
}

#[test]
fn stable_size_never_compiles() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("main.c");
    fs::write(&target, "1234567890").unwrap(); // 10 bytes

    let compiler = Arc::new(FakeCompiler::new());
    let harness = Harness::start(target, compiler.clone());

    // Several polls with the size pinned at 10 bytes: nothing may happen.
    harness.expect_quiet();
    assert_eq!(compiler.calls(), 0);

    harness.stop();
}

#[test]
fn growth_compiles_exactly_once() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("main.c");
    fs::write(&target, "1234567890").unwrap();

    let compiler = Arc::new(FakeCompiler::new());
    let harness = Harness::start(target.clone(), compiler.clone());
    harness.expect_quiet();

    set_content(&target, "12345678901234567890"); // 10 -> 20 bytes

    let update = harness.expect_update();
    assert!(matches!(update, WatchUpdate::Assembly(ref s) if s.contains("compile 1")));

    // Size is stable again: no duplicate invocation.
    harness.expect_quiet();
    assert_eq!(compiler.calls(), 1);

    harness.stop();
}

#[test]
fn failed_compile_is_delivered_and_watching_continues() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("main.c");
    fs::write(&target, "1234567890").unwrap();

    let compiler = Arc::new(FakeCompiler::new());
    let harness = Harness::start(target.clone(), compiler.clone());
    harness.expect_quiet();

    // Grow to 20 bytes with the compiler broken: the diagnostic is the payload.
    compiler.set_failing(true);
    set_content(&target, "12345678901234567890");
    let update = harness.expect_update();
    match update {
        WatchUpdate::Failed(message) => {
            assert!(message.contains("simulated diagnostic"));
            assert!(!message.is_empty());
        }
        other => panic!("expected failure, got {other:?}"),
    }

    // Grow to 30 bytes with the compiler fixed: the loop kept watching.
    compiler.set_failing(false);
    set_content(&target, "123456789012345678901234567890");
    let update = harness.expect_update();
    assert!(matches!(update, WatchUpdate::Assembly(_)));
    assert_eq!(compiler.calls(), 2);

    harness.stop();
}

#[test]
fn stat_failure_is_reported_and_recovered_from() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("not-yet-created.c");

    let compiler = Arc::new(FakeCompiler::new());
    let harness = Harness::start(target.clone(), compiler.clone());

    let update = harness.expect_update();
    match update {
        WatchUpdate::Failed(message) => assert!(message.contains("cannot stat")),
        other => panic!("expected stat failure, got {other:?}"),
    }

    // File appears: treated as a change, compiled on the next poll.
    set_content(&target, "int main(void) { return 0; }\n");
    loop {
        match harness.expect_update() {
            WatchUpdate::Failed(_) => continue, // stale stat reports may still drain
            WatchUpdate::Assembly(_) => break,
        }
    }
    assert!(compiler.calls() >= 1);

    harness.stop();
}

#[test]
fn cancellation_stops_the_loop() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("main.c");
    fs::write(&target, "1234567890").unwrap();

    let compiler = Arc::new(FakeCompiler::new());
    let harness = Harness::start(target, compiler);

    // stop() joins; a hung loop would hang the test here
    harness.stop();
}

#[test]
fn watcher_exits_when_consumer_is_gone() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("main.c");
    fs::write(&target, "1234567890").unwrap();

    let compiler = Arc::new(FakeCompiler::new());
    let harness = Harness::start(target.clone(), compiler);

    // Let the watcher prime its baseline before the channel goes away, so
    // the growth below is seen as a change.
    std::thread::sleep(Duration::from_millis(100));

    drop(harness.rx);
    // Next delivery attempt hits a closed channel and the loop returns.
    set_content(&target, "12345678901234567890");
    harness.handle.join().expect("watcher thread panicked");
}
