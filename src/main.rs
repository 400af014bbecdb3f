//! asmwatch CLI - live assembly viewer
//!
//! Usage: asmwatch --file <path>
//!
//! Watches the given C source file, recompiles it on every size change, and
//! shows the assembly in a full-screen scrollable viewer. Quit with `q`,
//! `Esc`, or `Ctrl+C`.

mod cli;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{bail, Result};
use clap::Parser;

use asmwatch::compiler::CompilerAdapter;
use asmwatch::config::Config;
use asmwatch::term::detect_capabilities;
use asmwatch::viewer::{self, RenderStyle, ViewerOptions};
use asmwatch::watcher::{watch, WatchOptions};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.has_target() {
        // Original behavior: message on stdout, exit status 1, before any
        // background work starts.
        println!("Cannot open file: pass --file <path> to a C source file");
        std::process::exit(1);
    }

    let mut config = Config::load_or_default();
    if let Some(command) = cli.compiler {
        config.compiler.command = command;
    }
    if let Some(syntax) = cli.syntax {
        config.compiler.syntax = syntax.into();
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.watch.interval_ms = interval_ms;
    }

    let caps = detect_capabilities();
    if !caps.is_tty {
        bail!("asmwatch needs an interactive terminal (stdout is not a tty)");
    }

    let style = RenderStyle::resolve(&config.output, &caps);
    let compiler = CompilerAdapter::new(&config.compiler)?;

    // Single-slot handoff between the watcher thread and the viewer
    let (tx, rx) = mpsc::sync_channel(1);
    let running = Arc::new(AtomicBool::new(true));

    let watch_options = WatchOptions {
        target: cli.file.clone(),
        interval: config.watch.interval(),
    };
    let watcher = thread::spawn({
        let running = running.clone();
        move || watch(&watch_options, &compiler, &tx, &running)
    });

    let viewer_options = ViewerOptions {
        target: cli.file,
        style,
    };
    let result = viewer::run(&viewer_options, &rx, &running);

    // Wind the watcher down: clear the flag and close the channel so a send
    // parked on the full slot wakes up.
    running.store(false, Ordering::SeqCst);
    drop(rx);
    let _ = watcher.join();

    result.map_err(Into::into)
}
