//! External compiler invocation
//!
//! Wraps the fixed command form `<compiler> -S <-masm=...> -o <intermediate>
//! <target>` and reads the emitted assembly back. Every failure is returned
//! to the caller; retry policy lives in the watch loop, not here.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

use crate::config::CompilerConfig;
use crate::error::{AsmwatchError, AsmwatchResult};

/// Seam between the watch loop and the external tool, so tests can drive the
/// loop with a fake compiler.
pub trait Compile {
    /// Compile `target` to textual assembly
    fn compile(&self, target: &Path) -> AsmwatchResult<String>;
}

/// Invokes the configured external compiler and reads the intermediate
/// assembly file back.
///
/// The intermediate file is a scoped temp file owned by the adapter and
/// removed when the adapter is dropped, on every exit path. It is rewritten
/// by each invocation; invocations are serialized by the watch loop, so
/// there are no concurrent writers.
pub struct CompilerAdapter {
    command: String,
    syntax_flag: &'static str,
    intermediate: NamedTempFile,
}

impl CompilerAdapter {
    pub fn new(config: &CompilerConfig) -> AsmwatchResult<Self> {
        let intermediate = tempfile::Builder::new()
            .prefix("asmwatch-")
            .suffix(".s")
            .tempfile()?;

        Ok(Self {
            command: config.command.clone(),
            syntax_flag: config.syntax.flag(),
            intermediate,
        })
    }

    /// Check if the configured compiler is installed and available
    pub fn check_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl Compile for CompilerAdapter {
    fn compile(&self, target: &Path) -> AsmwatchResult<String> {
        let output = Command::new(&self.command)
            .arg("-S")
            .arg(self.syntax_flag)
            .arg("-o")
            .arg(self.intermediate.path())
            .arg(target)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| AsmwatchError::Compile {
                detail: format!("failed to run {}: {}", self.command, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                format!("{} exited with {}", self.command, output.status)
            } else {
                stderr.trim_end().to_string()
            };
            return Err(AsmwatchError::Compile { detail });
        }

        fs::read_to_string(self.intermediate.path()).map_err(|e| AsmwatchError::AsmRead {
            path: self.intermediate.path().to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use std::fs;

    fn adapter_for(command: &str) -> CompilerAdapter {
        let config = CompilerConfig {
            command: command.to_string(),
            ..CompilerConfig::default()
        };
        CompilerAdapter::new(&config).unwrap()
    }

    #[cfg(unix)]
    fn fake_compiler(dir: &Path, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fakecc");
        fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[test]
    fn missing_tool_is_a_compile_failure() {
        let adapter = adapter_for("asmwatch-no-such-compiler");
        let err = adapter.compile(Path::new("main.c")).unwrap_err();
        match err {
            AsmwatchError::Compile { detail } => {
                assert!(detail.contains("asmwatch-no-such-compiler"))
            }
            other => panic!("expected Compile, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn successful_compile_returns_intermediate_contents() {
        let dir = tempfile::tempdir().unwrap();
        // Args are: -S -masm=... -o <out> <target>; copy target to out.
        let script = fake_compiler(dir.path(), "cp \"$5\" \"$4\"");
        let target = dir.path().join("main.c");
        fs::write(&target, ".globl main\n").unwrap();

        let adapter = adapter_for(script.to_str().unwrap());
        let asm = adapter.compile(&target).unwrap();
        assert_eq!(asm, ".globl main\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_surfaces_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_compiler(dir.path(), "echo 'main.c:1: error: boom' >&2; exit 1");

        let adapter = adapter_for(script.to_str().unwrap());
        let err = adapter.compile(Path::new("main.c")).unwrap_err();
        match err {
            AsmwatchError::Compile { detail } => assert!(detail.contains("boom")),
            other => panic!("expected Compile, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_without_stderr_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_compiler(dir.path(), "exit 3");

        let adapter = adapter_for(script.to_str().unwrap());
        let err = adapter.compile(Path::new("main.c")).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn intermediate_is_removed_on_drop() {
        let adapter = adapter_for("gcc");
        let path = adapter.intermediate.path().to_path_buf();
        assert!(path.exists());
        drop(adapter);
        assert!(!path.exists());
    }

    #[test]
    fn check_available_does_not_panic() {
        let adapter = adapter_for("asmwatch-no-such-compiler");
        assert!(!adapter.check_available());
    }
}
