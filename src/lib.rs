//! UKF Trace Library
//!
//! A Rust library for turning the human-readable output of unscented Kalman
//! filter test harnesses into typed, column-oriented time-series datasets.
//!
//! This library provides tools for:
//! - Classifying narrative harness logs into marker-delimited sections
//! - Extracting delimited and pattern-based records per section schema
//! - Strict parsing of the battery-model harness CSV table by column name
//! - Accumulating equal-length named series ready for a plotting front end
//! - Acquiring harness output from files or from a completed child process

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod trace_parser;
    }
    pub mod adapters {
        pub mod line_source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::dataset::TimeSeriesDataset;
pub use app::models::{Measurement, RawLine, Schema, Section};
pub use app::services::trace_parser::{NarrativeDatasets, TraceParser};
pub use config::TraceConfig;

/// Result type alias for the UKF trace parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trace acquisition and parsing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A numeric token does not match the signed decimal grammar
    #[error("Malformed number '{token}' at line {line}")]
    MalformedNumber { token: String, line: usize },

    /// Tabular header lacks a required column
    #[error("Missing required column '{column}' in table header")]
    MissingColumn { column: String },

    /// Tabular row cannot supply a required column
    #[error("Malformed row at line {line}: column '{column}' {reason}")]
    MalformedRow {
        line: usize,
        column: String,
        reason: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// External harness could not be run or exited unsuccessfully
    #[error("Failed to acquire output from '{command}': {message}")]
    Acquisition { command: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Record shape does not match the dataset it was appended to
    #[error("Dataset shape error in {schema}: {message}")]
    DatasetShape { schema: String, message: String },

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a malformed number error
    pub fn malformed_number(token: impl Into<String>, line: usize) -> Self {
        Self::MalformedNumber {
            token: token.into(),
            line,
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a malformed row error
    pub fn malformed_row(line: usize, column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an acquisition error
    pub fn acquisition(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Acquisition {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a dataset shape error
    pub fn dataset_shape(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DatasetShape {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
