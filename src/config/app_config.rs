//! Application configuration module
//!
//! This module provides the main application configuration structure that combines
//! CLI arguments with environment variables using a clear priority system.

use super::{ConfigError, EnvReader, InputFormat, SystemEnvReader, FORMAT_ENV, LOG_ENV};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Default log filter when neither CLI nor environment sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI arguments structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Input file; stdin when absent
    pub input: Option<PathBuf>,
    /// Input format name (overrides environment)
    pub format: Option<String>,
    /// Stop at the first rejected record
    pub fail_fast: bool,
    /// Suppress per-record rejection messages
    pub quiet: bool,
    /// Log filter directive (overrides environment)
    pub log_level: Option<String>,
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    input: Option<PathBuf>,
    format: InputFormat,
    fail_fast: bool,
    quiet: bool,
    log_filter: String,
}

/// Configuration builder for functional composition
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    input: Option<PathBuf>,
    format: Option<InputFormat>,
    fail_fast: bool,
    quiet: bool,
    log_filter: Option<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: None,
            format: None,
            fail_fast: false,
            quiet: false,
            log_filter: None,
        }
    }

    /// Set the input file
    #[must_use]
    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    /// Set the input format
    #[must_use]
    pub const fn with_format(mut self, format: InputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set fail-fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set quiet mode
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: String) -> Self {
        self.log_filter = Some(filter);
        self
    }

    /// Build the final AppConfig
    pub fn build(self) -> AppConfig {
        AppConfig {
            input: self.input,
            format: self.format.unwrap_or_default(),
            fail_fast: self.fail_fast,
            quiet: self.quiet,
            log_filter: self
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        }
    }
}

impl AppConfig {
    /// Create AppConfig from CLI arguments and the process environment
    ///
    /// Priority order:
    /// 1. CLI parameters (highest priority)
    /// 2. Environment variables
    /// 3. Hardcoded defaults
    pub fn from_cli(cli_args: CliArgs) -> Result<Self, ConfigError> {
        Self::from_cli_with_reader(cli_args, &SystemEnvReader)
    }

    /// Create AppConfig from CLI arguments and a custom environment reader
    pub fn from_cli_with_reader<R: EnvReader>(
        cli_args: CliArgs,
        reader: &R,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::new()
            .with_input(Self::resolve_input(cli_args.input)?)
            .with_fail_fast(cli_args.fail_fast)
            .with_quiet(cli_args.quiet);

        if let Some(format) = Self::resolve_format(cli_args.format.as_deref(), reader)? {
            builder = builder.with_format(format);
        }
        if let Some(filter) = Self::resolve_log_filter(cli_args.log_level, reader)? {
            builder = builder.with_log_filter(filter);
        }

        Ok(builder.build())
    }

    fn resolve_input(input: Option<PathBuf>) -> Result<Option<PathBuf>, ConfigError> {
        match input {
            Some(path) if !path.is_file() => Err(ConfigError::InputNotFound { path }),
            other => Ok(other),
        }
    }

    fn resolve_format<R: EnvReader>(
        cli_value: Option<&str>,
        reader: &R,
    ) -> Result<Option<InputFormat>, ConfigError> {
        let (setting, value) = match cli_value {
            Some(value) => ("--format", value.to_owned()),
            None => match reader.get_var(FORMAT_ENV)? {
                Some(value) => (FORMAT_ENV, value),
                None => return Ok(None),
            },
        };

        value
            .parse()
            .map(Some)
            .map_err(|()| ConfigError::InvalidSetting {
                setting: setting.to_owned(),
                value,
                expected: "json or jsonl".to_owned(),
            })
    }

    fn resolve_log_filter<R: EnvReader>(
        cli_value: Option<String>,
        reader: &R,
    ) -> Result<Option<String>, ConfigError> {
        let (setting, value) = match cli_value {
            Some(value) => ("--log-level", value),
            None => match reader.get_var(LOG_ENV)? {
                Some(value) => (LOG_ENV, value),
                None => return Ok(None),
            },
        };

        match EnvFilter::try_new(&value) {
            Ok(_) => Ok(Some(value)),
            Err(_) => Err(ConfigError::InvalidSetting {
                setting: setting.to_owned(),
                value,
                expected: "tracing filter directive, e.g. 'info' or 'bench_result_schema=debug'"
                    .to_owned(),
            }),
        }
    }

    /// Input file, or `None` for stdin
    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    /// Input format
    pub fn format(&self) -> InputFormat {
        self.format
    }

    /// Whether ingestion stops at the first rejection
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Whether per-record rejection messages are suppressed
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Log filter directive for the tracing subscriber
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}
