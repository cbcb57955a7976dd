//! # Runtime Configuration
//!
//! Defaults, overridden by environment variables, overridden in turn by
//! command-line flags in `main`.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per result.
    #[default]
    Text,
    /// One JSON object per result.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Command file to execute.
    pub commands_path: PathBuf,
    /// Event log, truncated at the start of every run.
    pub log_path: PathBuf,
    /// Diagnostic log filter (trace, debug, info, warn, error).
    pub log_level: String,
    /// Result output format.
    pub output: OutputFormat,
    /// Cut parsed names to `MAX_NAME_LEN` bytes.
    pub truncate_names: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            commands_path: PathBuf::from("commands.txt"),
            log_path: PathBuf::from("hash.log"),
            log_level: "warn".to_string(),
            output: OutputFormat::Text,
            truncate_names: true,
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CHASH_COMMANDS`: command file (default: commands.txt)
    /// - `CHASH_LOG_FILE`: event log (default: hash.log)
    /// - `CHASH_LOG_LEVEL` or `RUST_LOG`: diagnostic filter (default: warn)
    /// - `CHASH_OUTPUT`: text or json (default: text)
    /// - `CHASH_TRUNCATE_NAMES`: truncate long names (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            commands_path: env::var("CHASH_COMMANDS")
                .map(PathBuf::from)
                .unwrap_or(defaults.commands_path),

            log_path: env::var("CHASH_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),

            log_level: env::var("CHASH_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            output: env::var("CHASH_OUTPUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.output),

            truncate_names: env::var("CHASH_TRUNCATE_NAMES")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.truncate_names),
        }
    }
}
