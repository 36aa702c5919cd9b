//! Environment reader module
//!
//! This module provides a small abstraction over process environment
//! variables so configuration resolution can be tested without touching
//! the real environment.

use super::ConfigError;
use std::env::{self, VarError};

/// Trait for reading configuration values from the environment
pub trait EnvReader {
    /// Get a variable by name; `Ok(None)` when it is not set
    fn get_var(&self, key: &str) -> Result<Option<String>, ConfigError>;
}

/// Reader backed by the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvReader;

impl EnvReader for SystemEnvReader {
    fn get_var(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidSetting {
                setting: key.to_owned(),
                value: raw.to_string_lossy().into_owned(),
                expected: "valid UTF-8".to_owned(),
            }),
        }
    }
}

/// Mock environment reader for testing
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockEnvReader {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvReader {
    /// Create a new mock reader with no variables set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the mock reader
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

#[cfg(test)]
impl EnvReader for MockEnvReader {
    fn get_var(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.vars.get(key).cloned())
    }
}
