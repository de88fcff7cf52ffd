//! Acquisition of harness output as an ordered sequence of lines
//!
//! The parser only ever sees buffered lines. Where they come from, a saved
//! log file or the captured stdout of a harness run, is decided here.

use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

use crate::{Error, Result};

/// A supplier of raw harness output lines
pub trait LineSource {
    /// Human-readable description for logs and error messages
    fn describe(&self) -> String;

    /// Read every line, fully buffered, without trailing newlines
    fn read_lines(&self) -> Result<Vec<String>>;
}

/// Lines read from a saved log file
#[derive(Debug, Clone)]
pub struct FileLineSource {
    path: PathBuf,
}

impl FileLineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineSource for FileLineSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::io(format!("Failed to read file {}", self.path.display()), e)
        })?;

        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        debug!("Read {} lines from {}", lines.len(), self.path.display());
        Ok(lines)
    }
}

/// Captured stdout of a completed harness process
#[derive(Debug, Clone)]
pub struct CommandLineSource {
    program: String,
    args: Vec<String>,
}

impl CommandLineSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl LineSource for CommandLineSource {
    fn describe(&self) -> String {
        format!("command `{}`", self.command_line())
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        info!("Running harness: {}", self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| Error::acquisition(self.command_line(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::acquisition(
                self.command_line(),
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            Error::acquisition(self.command_line(), format!("stdout is not UTF-8: {}", e))
        })?;

        let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        debug!("Captured {} lines from {}", lines.len(), self.program);
        Ok(lines)
    }
}

impl LineSource for Vec<String> {
    fn describe(&self) -> String {
        format!("{} in-memory lines", self.len())
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

impl LineSource for [&str] {
    fn describe(&self) -> String {
        format!("{} in-memory lines", self.len())
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.iter().map(|line| line.to_string()).collect())
    }
}
