//! Configuration module for asmwatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Project config (./asmwatch.toml)
//! 3. Built-in defaults (lowest priority)

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AsmwatchError, AsmwatchResult};

/// Name of the optional project config file, looked up in the working
/// directory.
pub const CONFIG_FILE: &str = "asmwatch.toml";

/// Assembly dialect requested from the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AsmSyntax {
    /// `-masm=intel`
    #[default]
    Intel,
    /// `-masm=att`
    Att,
}

impl AsmSyntax {
    /// The `-masm=` flag passed to the compiler
    pub fn flag(self) -> &'static str {
        match self {
            AsmSyntax::Intel => "-masm=intel",
            AsmSyntax::Att => "-masm=att",
        }
    }
}

/// External compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Compiler executable, resolved through PATH
    #[serde(default = "default_command")]
    pub command: String,

    #[serde(default)]
    pub syntax: AsmSyntax,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            syntax: AsmSyntax::default(),
        }
    }
}

fn default_command() -> String {
    "gcc".to_string()
}

/// Polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Poll cadence for the watched file, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    1000
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Output/appearance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Prefer unicode box-drawing characters when the terminal supports them
    #[serde(default = "default_true")]
    pub unicode: bool,

    #[serde(default)]
    pub color: ColorMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            unicode: true,
            color: ColorMode::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AsmwatchResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AsmwatchError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `./asmwatch.toml` if present, falling back to defaults
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load(path).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}
