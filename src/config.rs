//! Configuration management and validation.
//!
//! Provides the parsing configuration shared by the narrative and tabular
//! passes, loadable from a JSON file and overridable from the command line.

use crate::constants::{DEFAULT_MAX_ERROR_SAMPLES, DEFAULT_TABULAR_DELIMITER};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Global configuration for trace parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Log narrative lines that produced no record at warn level instead of debug
    pub warn_on_skipped_lines: bool,

    /// Maximum number of skip messages kept in parse statistics
    pub max_error_samples: usize,

    /// Field delimiter of the battery-harness table
    pub tabular_delimiter: char,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            warn_on_skipped_lines: false,
            max_error_samples: DEFAULT_MAX_ERROR_SAMPLES,
            tabular_delimiter: DEFAULT_TABULAR_DELIMITER,
        }
    }
}

impl TraceConfig {
    /// Load configuration from a JSON file, filling absent keys with defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Surface skipped narrative lines as warnings
    pub fn with_skip_warnings(mut self) -> Self {
        self.warn_on_skipped_lines = true;
        self
    }

    /// Set the number of retained skip messages
    pub fn with_max_error_samples(mut self, max_error_samples: usize) -> Self {
        self.max_error_samples = max_error_samples;
        self
    }

    /// Set the tabular delimiter
    pub fn with_tabular_delimiter(mut self, delimiter: char) -> Self {
        self.tabular_delimiter = delimiter;
        self
    }

    /// Tabular delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        let delimiter = self.tabular_delimiter;
        if !delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Tabular delimiter {:?} must be a single ASCII character",
                delimiter
            )));
        }
        Ok(delimiter as u8)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let delimiter = self.delimiter_byte()?;

        // The delimiter may not collide with the numeric grammar or the quote character
        if delimiter.is_ascii_alphanumeric()
            || matches!(delimiter, b' ' | b'\n' | b'\r' | b'.' | b'-' | b'+' | b'"')
        {
            return Err(Error::configuration(format!(
                "Tabular delimiter {:?} conflicts with numeric fields",
                self.tabular_delimiter
            )));
        }

        Ok(())
    }
}
