//! Command-line argument definitions for the UKF trace parser
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::{DEFAULT_NARRATIVE_COMMAND, DEFAULT_TABULAR_COMMAND};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the UKF trace parser
///
/// Converts the text output of the UKF test harnesses into typed
/// time-series datasets.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ukf-trace",
    version,
    about = "Parse UKF harness output into typed time-series datasets",
    long_about = "Parses the output of the UKF test harnesses, either a saved log file or the \
                  captured stdout of a harness run. The scalar harness prints a narrative log with \
                  three marker-delimited sections; the battery ECM harness prints a CSV table."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a narrative log from the scalar UKF harness
    Narrative(TraceArgs),
    /// Parse the CSV table printed by the battery ECM harness
    Tabular(TraceArgs),
}

/// Arguments shared by both parse commands
#[derive(Debug, Clone, Parser)]
pub struct TraceArgs {
    /// Saved harness output to parse
    ///
    /// If neither a file nor --run is given, the default harness binary for
    /// the command is run from the current directory.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Run a harness and parse its standard output
    ///
    /// The first value is the program, the rest are passed as arguments.
    #[arg(
        long = "run",
        value_name = "CMD",
        num_args = 1..,
        allow_hyphen_values = true,
        conflicts_with = "input",
        help = "Run a harness command and parse its stdout"
    )]
    pub run: Option<Vec<String>>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Output format for parsed datasets"
    )]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the report to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Report narrative lines that produced no record at warn level
    #[arg(
        long = "warn-skipped",
        help = "Log skipped narrative lines as warnings"
    )]
    pub warn_skipped: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for parse results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Record counts and per-column ranges
    Summary,
    /// Full datasets and statistics as JSON
    Json,
}

/// Where harness output comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// A saved log file
    File(PathBuf),
    /// A program and its arguments
    Command { program: String, args: Vec<String> },
}

impl Commands {
    /// Arguments of whichever command was selected
    pub fn trace_args(&self) -> &TraceArgs {
        match self {
            Commands::Narrative(args) | Commands::Tabular(args) => args,
        }
    }

    /// Harness run when no input is given
    pub fn default_command(&self) -> &'static str {
        match self {
            Commands::Narrative(_) => DEFAULT_NARRATIVE_COMMAND,
            Commands::Tabular(_) => DEFAULT_TABULAR_COMMAND,
        }
    }

    /// Resolve the input source from the arguments
    pub fn input_spec(&self) -> InputSpec {
        let args = self.trace_args();

        if let Some(path) = &args.input {
            return InputSpec::File(path.clone());
        }

        match args.run.as_deref() {
            Some([program, rest @ ..]) => InputSpec::Command {
                program: program.clone(),
                args: rest.to_vec(),
            },
            _ => InputSpec::Command {
                program: self.default_command().to_string(),
                args: Vec::new(),
            },
        }
    }
}

impl TraceArgs {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            if !input.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input.display()
                )));
            }

            if !input.is_file() {
                return Err(Error::configuration(format!(
                    "Input path is not a file: {}",
                    input.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Configuration file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Get the appropriate log level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
