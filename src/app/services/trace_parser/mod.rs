//! Multi-schema parser for UKF harness output
//!
//! Two harnesses feed this parser. The scalar UKF harness prints a narrative
//! log where marker lines switch between three record formats; the battery
//! ECM harness prints a single CSV table with a named header row.
//!
//! ## Architecture
//!
//! - [`parser`] - Orchestration of the narrative and tabular passes
//! - [`classifier`] - Marker detection and per-line section labels
//! - [`record_parser`] - Per-section record extractors
//! - [`tabular`] - Header-driven extraction of the battery table
//! - [`column_mapping`] - Header name to position mapping
//! - [`field_parsers`] - Numeric field grammar and token splitting
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use ukf_trace::{RawLine, Section, TraceParser};
//!
//! let lines = RawLine::from_lines([
//!     "Case 3: Very small measurement noise.",
//!     "k= 0  t=0.00  x_true=0.0000  z_meas=0.0001  x_est=0.0001",
//! ]);
//!
//! let result = TraceParser::new().parse_narrative(&lines);
//! assert_eq!(result.datasets.record_count(Section::LowNoise), 1);
//! ```

pub mod classifier;
pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod tabular;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::SectionClassifier;
pub use column_mapping::ColumnMapping;
pub use parser::TraceParser;
pub use stats::{NarrativeDatasets, NarrativeResult, ParseStats, TabularResult};
pub use tabular::TabularExtractor;
