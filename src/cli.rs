use std::path::PathBuf;

use asmwatch::config::AsmSyntax;
use clap::{Parser, ValueEnum};

/// Sentinel default carried over from the original tool: running without
/// `--file` exits with an error instead of watching the current directory.
pub const DEFAULT_FILE: &str = "./";

/// asmwatch - live assembly viewer for C sources
#[derive(Parser, Debug)]
#[command(name = "asmwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the C source file to watch
    #[arg(short, long, default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Compiler executable (default: asmwatch.toml, else gcc)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Assembly dialect requested from the compiler
    #[arg(long, value_enum)]
    pub syntax: Option<SyntaxArg>,

    /// Poll interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

impl Cli {
    /// Whether a real target was given (anything but the sentinel default)
    pub fn has_target(&self) -> bool {
        self.file.as_os_str() != DEFAULT_FILE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyntaxArg {
    Intel,
    Att,
}

impl From<SyntaxArg> for AsmSyntax {
    fn from(arg: SyntaxArg) -> Self {
        match arg {
            SyntaxArg::Intel => AsmSyntax::Intel,
            SyntaxArg::Att => AsmSyntax::Att,
        }
    }
}
