//! Parsing statistics and result structures for trace processing
//!
//! This module provides types for tracking how many lines became records,
//! and for handing the finished datasets to the rendering front end.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Result;
use crate::app::models::dataset::TimeSeriesDataset;
use crate::app::models::{ExtractedRecord, Record, Section};

/// Simple parsing statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of input lines
    pub total_lines: usize,

    /// Lines carrying no data (markers, blank lines, column headers)
    pub lines_ignored: usize,

    /// Number of records successfully extracted
    pub records_parsed: usize,

    /// Candidate lines that produced no record
    pub lines_skipped: usize,

    /// Sample of skip reasons for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_lines: 0,
            lines_ignored: 0,
            records_parsed: 0,
            lines_skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Count a skipped line, keeping at most `max_samples` messages
    pub fn record_skip(&mut self, message: impl Into<String>, max_samples: usize) {
        self.lines_skipped += 1;
        if self.errors.len() < max_samples {
            self.errors.push(message.into());
        }
    }

    /// Lines that reached an extractor or carried no section
    pub fn candidate_lines(&self) -> usize {
        self.records_parsed + self.lines_skipped
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let candidates = self.candidate_lines();
        if candidates == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / candidates as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Datasets produced by one narrative pass, at most one per section
///
/// A section's dataset is created when its first record arrives, so a
/// section that yielded nothing has no dataset and a record count of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NarrativeDatasets {
    datasets: BTreeMap<Section, TimeSeriesDataset>,
}

impl NarrativeDatasets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its section's dataset, creating the dataset on first use
    pub fn append(&mut self, record: &ExtractedRecord) -> Result<()> {
        let section = record.section();

        if let Some(dataset) = self.datasets.get_mut(&section) {
            return dataset.push(record);
        }

        let mut dataset = TimeSeriesDataset::new(record.schema());
        dataset.push(record)?;
        self.datasets.insert(section, dataset);
        Ok(())
    }

    pub fn get(&self, section: Section) -> Option<&TimeSeriesDataset> {
        self.datasets.get(&section)
    }

    /// Number of records parsed for a section, zero when it produced none
    pub fn record_count(&self, section: Section) -> usize {
        self.get(section).map_or(0, TimeSeriesDataset::len)
    }

    /// Number of sections that produced at least one record
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Datasets in section order
    pub fn iter(&self) -> impl Iterator<Item = (Section, &TimeSeriesDataset)> {
        self.datasets.iter().map(|(section, dataset)| (*section, dataset))
    }
}

/// Result of a narrative pass
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeResult {
    /// Datasets keyed by section
    pub datasets: NarrativeDatasets,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Result of a tabular pass
#[derive(Debug, Clone, Serialize)]
pub struct TabularResult {
    /// The battery dataset
    pub dataset: TimeSeriesDataset,

    /// Basic parsing statistics
    pub stats: ParseStats,
}
