//! Configuration module for bench-result-schema
//!
//! This module combines CLI arguments with environment variables using strict
//! error handling and clear priority logic.
//!
//! # Architecture
//!
//! - [`env_reader`] - environment lookup behind a trait, mockable in tests
//! - [`app_config`] - high-level application configuration with CLI integration
//!
//! # Priority Logic
//!
//! Configuration values are resolved with the following priority:
//!
//! 1. CLI parameters (highest priority)
//! 2. Environment variables ([`FORMAT_ENV`], [`LOG_ENV`])
//! 3. Hardcoded defaults (only when neither is set)
//!
//! An invalid value from any source is a [`ConfigError`]; it never falls back
//! to the default.
//!
//! # Usage
//!
//! ```rust
//! use bench_result_schema::config::{AppConfig, CliArgs, InputFormat};
//!
//! let cli_args = CliArgs {
//!     input: None,
//!     format: Some("jsonl".to_owned()),
//!     fail_fast: false,
//!     quiet: false,
//!     log_level: Some("info".to_owned()),
//! };
//!
//! let config = AppConfig::from_cli(cli_args)?;
//! assert_eq!(config.format(), InputFormat::JsonLines);
//! assert_eq!(config.log_filter(), "info");
//! # Ok::<(), bench_result_schema::ConfigError>(())
//! ```

pub mod app_config;
pub mod env_reader;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use app_config::{AppConfig, CliArgs, ConfigBuilder};
pub use env_reader::{EnvReader, SystemEnvReader};

#[cfg(test)]
pub use env_reader::MockEnvReader;

/// Environment variable naming the input format
pub const FORMAT_ENV: &str = "BENCH_RESULT_SCHEMA_FORMAT";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "BENCH_RESULT_SCHEMA_LOG";

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A setting has a value outside its accepted set
    InvalidSetting {
        setting: String,
        value: String,
        expected: String,
    },
    /// The requested input file does not exist
    InputNotFound { path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSetting {
                setting,
                value,
                expected,
            } => write!(
                f,
                "Invalid setting: {setting}='{value}' (expected: {expected})"
            ),
            ConfigError::InputNotFound { path } => {
                write!(f, "Input file not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Layout of the candidate records in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// One JSON document: a single object or an array of objects
    #[default]
    Json,
    /// One JSON object per non-blank line
    JsonLines,
}

impl InputFormat {
    /// Canonical name of this format
    pub const fn as_str(self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::JsonLines => "jsonl",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(InputFormat::Json),
            "jsonl" => Ok(InputFormat::JsonLines),
            _ => Err(()),
        }
    }
}
