//! Core trace parser implementation
//!
//! This module drives the narrative and tabular passes: classification,
//! dispatch to the section extractors, dataset accumulation and statistics.

use tracing::{debug, info, warn};

use super::classifier::SectionClassifier;
use super::record_parser::extract_record;
use super::stats::{NarrativeDatasets, NarrativeResult, ParseStats, TabularResult};
use super::tabular::TabularExtractor;
use crate::Result;
use crate::app::adapters::line_source::LineSource;
use crate::app::models::{IgnoreReason, LineLabel, RawLine, Section};
use crate::config::TraceConfig;

/// Parser for UKF harness output
///
/// Every pass owns its own classifier state and dataset accumulators, so a
/// single parser can be shared across threads and reused freely.
#[derive(Debug, Clone, Default)]
pub struct TraceParser {
    config: TraceConfig,
}

impl TraceParser {
    /// Create a parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: TraceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Parse a narrative log
    ///
    /// Never fails: lines that do not fit their section are skipped and
    /// counted, and whatever was accumulated is returned.
    pub fn parse_narrative(&self, lines: &[RawLine]) -> NarrativeResult {
        let mut stats = ParseStats::new();
        let mut datasets = NarrativeDatasets::new();
        stats.total_lines = lines.len();

        for (line, label) in SectionClassifier::new(lines) {
            let section = match label {
                LineLabel::Ignore(reason) => {
                    stats.lines_ignored += 1;
                    if reason == IgnoreReason::Marker {
                        debug!("Line {}: section marker {:?}", line.index, line.trimmed());
                    }
                    continue;
                }
                LineLabel::Unsectioned => {
                    self.skip(&mut stats, line, "no active section");
                    continue;
                }
                LineLabel::Data(section) => section,
            };

            match extract_record(section, line) {
                Ok(Some(record)) => match datasets.append(&record) {
                    Ok(()) => stats.records_parsed += 1,
                    Err(e) => self.skip(&mut stats, line, &e.to_string()),
                },
                Ok(None) => {
                    let reason = format!("does not match the {} layout", section);
                    self.skip(&mut stats, line, &reason);
                }
                Err(e) => self.skip(&mut stats, line, &e.to_string()),
            }
        }

        for section in Section::ALL {
            debug!("{}: {} records", section, datasets.record_count(section));
        }
        info!(
            "Parsed {} records from {} lines ({} skipped)",
            stats.records_parsed, stats.total_lines, stats.lines_skipped
        );

        NarrativeResult { datasets, stats }
    }

    /// Parse the battery-harness table
    ///
    /// Strict: the first missing column, short row or malformed number
    /// aborts the pass.
    pub fn parse_tabular(&self, lines: &[RawLine]) -> Result<TabularResult> {
        self.config.validate()?;
        let extractor = TabularExtractor::new(self.config.delimiter_byte()?);
        let mut stats = ParseStats::new();

        let dataset = extractor.extract(lines, &mut stats)?;

        info!(
            "Parsed {} table rows from {} lines",
            stats.records_parsed, stats.total_lines
        );

        Ok(TabularResult { dataset, stats })
    }

    /// Acquire lines from `source` and parse them as a narrative log
    pub fn parse_narrative_source<S>(&self, source: &S) -> Result<NarrativeResult>
    where
        S: LineSource + ?Sized,
    {
        info!("Parsing narrative log from {}", source.describe());
        let lines = RawLine::from_lines(source.read_lines()?);
        Ok(self.parse_narrative(&lines))
    }

    /// Acquire lines from `source` and parse them as a battery table
    pub fn parse_tabular_source<S>(&self, source: &S) -> Result<TabularResult>
    where
        S: LineSource + ?Sized,
    {
        info!("Parsing battery table from {}", source.describe());
        let lines = RawLine::from_lines(source.read_lines()?);
        self.parse_tabular(&lines)
    }

    fn skip(&self, stats: &mut ParseStats, line: &RawLine, reason: &str) {
        let message = format!("Line {}: {} ({:?})", line.index, reason, line.trimmed());

        if self.config.warn_on_skipped_lines {
            warn!("Skipped {}", message);
        } else {
            debug!("Skipped {}", message);
        }

        stats.record_skip(message, self.config.max_error_samples);
    }
}
