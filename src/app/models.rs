//! Domain models for UKF harness traces
//!
//! This module contains the line, section and record types produced while
//! parsing harness output. The column-oriented result container lives in
//! [`dataset`].

pub mod dataset;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    BATTERY_COLUMNS, LOW_NOISE_MARKER, MISSING_MEASUREMENT_MARKER, NORMAL_OPERATION_MARKER,
    WITH_MEASUREMENT_LITERAL, WITHOUT_MEASUREMENT_LITERAL, columns,
};

/// A single line of harness output with its original 0-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Position of the line in the acquired sequence
    pub index: usize,

    /// Line content without the trailing newline
    pub text: String,
}

impl RawLine {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Number an ordered sequence of lines from zero
    pub fn from_lines<I, S>(lines: I) -> Vec<RawLine>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(index, text)| RawLine::new(index, text))
            .collect()
    }

    /// Line content with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the line carries no visible content
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sections and line labels
// ---------------------------------------------------------------------------

/// Narrative log sections, each opened by a marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Delimited rows with position and velocity, measurement every step
    NormalOperation,
    /// Pattern rows flagging steps where the measurement was withheld
    MissingMeasurement,
    /// Pattern rows with a near noise-free measurement
    LowNoise,
}

impl Section {
    /// All sections in log order
    pub const ALL: [Section; 3] = [
        Section::NormalOperation,
        Section::MissingMeasurement,
        Section::LowNoise,
    ];

    /// Marker literal that opens this section
    pub fn marker(&self) -> &'static str {
        match self {
            Section::NormalOperation => NORMAL_OPERATION_MARKER,
            Section::MissingMeasurement => MISSING_MEASUREMENT_MARKER,
            Section::LowNoise => LOW_NOISE_MARKER,
        }
    }

    /// Section owning a marker line, if the line carries one of the marker literals
    pub fn from_marker_line(line: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|section| line.contains(section.marker()))
    }

    /// Record schema of the section's data lines
    pub fn schema(&self) -> Schema {
        match self {
            Section::NormalOperation => Schema::NormalOperation,
            Section::MissingMeasurement => Schema::MissingMeasurement,
            Section::LowNoise => Schema::LowNoise,
        }
    }

    /// Display title handed to the rendering front end
    pub fn title(&self) -> &'static str {
        self.schema().title()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.schema().name())
    }
}

/// Why a line carries no data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Section marker line
    Marker,
    /// Empty or whitespace-only line
    Blank,
    /// Column header line of the delimited section
    ColumnHeader,
}

/// Classification of a single narrative line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLabel {
    /// Line carries no data
    Ignore(IgnoreReason),
    /// Non-blank line seen before any marker
    Unsectioned,
    /// Candidate data line of the active section
    Data(Section),
}

impl LineLabel {
    /// Section whose extractor should see this line
    pub fn section(&self) -> Option<Section> {
        match self {
            LineLabel::Data(section) => Some(*section),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Schemas and field values
// ---------------------------------------------------------------------------

/// Value type of a dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Float,
    Integer,
    Flag,
}

/// Name and value type of one dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn float(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Float,
    }
}

const fn integer(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Integer,
    }
}

const fn flag(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        kind: ColumnKind::Flag,
    }
}

const NORMAL_OPERATION_COLUMNS: [ColumnSpec; 6] = [
    float(columns::TIME),
    float(columns::X_TRUE),
    float(columns::V_TRUE),
    float(columns::Z_MEAS),
    float(columns::X_EST),
    float(columns::V_EST),
];

const MISSING_MEASUREMENT_COLUMNS: [ColumnSpec; 5] = [
    integer(columns::INDEX),
    float(columns::TIME),
    flag(columns::HAS_MEAS),
    float(columns::X_TRUE),
    float(columns::X_EST),
];

const LOW_NOISE_COLUMNS: [ColumnSpec; 5] = [
    integer(columns::INDEX),
    float(columns::TIME),
    float(columns::X_TRUE),
    float(columns::Z_MEAS),
    float(columns::X_EST),
];

const BATTERY_SCHEMA_COLUMNS: [ColumnSpec; 17] = [
    integer(BATTERY_COLUMNS[0]),
    float(BATTERY_COLUMNS[1]),
    float(BATTERY_COLUMNS[2]),
    float(BATTERY_COLUMNS[3]),
    float(BATTERY_COLUMNS[4]),
    float(BATTERY_COLUMNS[5]),
    float(BATTERY_COLUMNS[6]),
    float(BATTERY_COLUMNS[7]),
    float(BATTERY_COLUMNS[8]),
    float(BATTERY_COLUMNS[9]),
    float(BATTERY_COLUMNS[10]),
    float(BATTERY_COLUMNS[11]),
    float(BATTERY_COLUMNS[12]),
    float(BATTERY_COLUMNS[13]),
    float(BATTERY_COLUMNS[14]),
    float(BATTERY_COLUMNS[15]),
    float(BATTERY_COLUMNS[16]),
];

/// Record layouts a dataset can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    NormalOperation,
    MissingMeasurement,
    LowNoise,
    Battery,
}

impl Schema {
    /// Stable identifier used in logs and exported data
    pub fn name(&self) -> &'static str {
        match self {
            Schema::NormalOperation => "normal_operation",
            Schema::MissingMeasurement => "missing_measurement",
            Schema::LowNoise => "low_noise",
            Schema::Battery => "battery",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Schema::NormalOperation => "Case 1: Normal operation",
            Schema::MissingMeasurement => "Case 2: Missing measurements",
            Schema::LowNoise => "Case 3: Very small measurement noise",
            Schema::Battery => "Battery ECM estimator",
        }
    }

    /// Ordered column layout
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            Schema::NormalOperation => &NORMAL_OPERATION_COLUMNS,
            Schema::MissingMeasurement => &MISSING_MEASUREMENT_COLUMNS,
            Schema::LowNoise => &LOW_NOISE_COLUMNS,
            Schema::Battery => &BATTERY_SCHEMA_COLUMNS,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single typed field of an extracted record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            FieldValue::Float(_) => ColumnKind::Float,
            FieldValue::Integer(_) => ColumnKind::Integer,
            FieldValue::Flag(_) => ColumnKind::Flag,
        }
    }
}

/// A schema-shaped record that can be appended to a dataset
pub trait Record {
    /// Schema the record conforms to
    fn schema(&self) -> Schema;

    /// Field values in the schema's column order
    fn values(&self) -> Vec<FieldValue>;
}

// ---------------------------------------------------------------------------
// Narrative records
// ---------------------------------------------------------------------------

/// Whether the filter consumed a measurement on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measurement {
    WithMeasurement,
    WithoutMeasurement,
}

impl Measurement {
    /// Match one of the two flag literals printed by the harness
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            WITH_MEASUREMENT_LITERAL => Some(Measurement::WithMeasurement),
            WITHOUT_MEASUREMENT_LITERAL => Some(Measurement::WithoutMeasurement),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Measurement::WithMeasurement)
    }
}

/// Normal-operation row: `k, t, x_true, v_true, z_meas, x_est, v_est`
///
/// The leading step index is not kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalOperationRecord {
    pub time: f64,
    pub x_true: f64,
    pub v_true: f64,
    pub z_meas: f64,
    pub x_est: f64,
    pub v_est: f64,
}

impl Record for NormalOperationRecord {
    fn schema(&self) -> Schema {
        Schema::NormalOperation
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Float(self.time),
            FieldValue::Float(self.x_true),
            FieldValue::Float(self.v_true),
            FieldValue::Float(self.z_meas),
            FieldValue::Float(self.x_est),
            FieldValue::Float(self.v_est),
        ]
    }
}

/// Missing-measurement row: `k=.. t=.. (with meas|NO meas) x_true=.. x_est=..`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingMeasurementRecord {
    pub index: i64,
    pub time: f64,
    pub measurement: Measurement,
    pub x_true: f64,
    pub x_est: f64,
}

impl Record for MissingMeasurementRecord {
    fn schema(&self) -> Schema {
        Schema::MissingMeasurement
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Integer(self.index),
            FieldValue::Float(self.time),
            FieldValue::Flag(self.measurement.is_present()),
            FieldValue::Float(self.x_true),
            FieldValue::Float(self.x_est),
        ]
    }
}

/// Low-noise row: `k=.. t=.. x_true=.. z_meas=.. x_est=..`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowNoiseRecord {
    pub index: i64,
    pub time: f64,
    pub x_true: f64,
    pub z_meas: f64,
    pub x_est: f64,
}

impl Record for LowNoiseRecord {
    fn schema(&self) -> Schema {
        Schema::LowNoise
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Integer(self.index),
            FieldValue::Float(self.time),
            FieldValue::Float(self.x_true),
            FieldValue::Float(self.z_meas),
            FieldValue::Float(self.x_est),
        ]
    }
}

/// Record produced by one narrative extractor invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractedRecord {
    NormalOperation(NormalOperationRecord),
    MissingMeasurement(MissingMeasurementRecord),
    LowNoise(LowNoiseRecord),
}

impl ExtractedRecord {
    /// Section the record belongs to
    pub fn section(&self) -> Section {
        match self {
            ExtractedRecord::NormalOperation(_) => Section::NormalOperation,
            ExtractedRecord::MissingMeasurement(_) => Section::MissingMeasurement,
            ExtractedRecord::LowNoise(_) => Section::LowNoise,
        }
    }
}

impl Record for ExtractedRecord {
    fn schema(&self) -> Schema {
        self.section().schema()
    }

    fn values(&self) -> Vec<FieldValue> {
        match self {
            ExtractedRecord::NormalOperation(record) => record.values(),
            ExtractedRecord::MissingMeasurement(record) => record.values(),
            ExtractedRecord::LowNoise(record) => record.values(),
        }
    }
}

// ---------------------------------------------------------------------------
// Battery table record
// ---------------------------------------------------------------------------

/// One row of the battery-model harness table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryRecord {
    pub k: i64,
    pub t: f64,
    /// Load current `I`
    pub current: f64,
    pub soc_true: f64,
    pub soc_est: f64,
    pub temp_true: f64,
    pub temp_est: f64,
    /// Estimated hysteresis state `H_est`
    pub hysteresis_est: f64,
    pub v_true: f64,
    pub v_meas: f64,
    pub v_est: f64,
    pub r0_true: f64,
    pub r0_model: f64,
    pub r1_true: f64,
    pub r1_model: f64,
    pub c1_true: f64,
    pub c1_model: f64,
}

impl Record for BatteryRecord {
    fn schema(&self) -> Schema {
        Schema::Battery
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Integer(self.k),
            FieldValue::Float(self.t),
            FieldValue::Float(self.current),
            FieldValue::Float(self.soc_true),
            FieldValue::Float(self.soc_est),
            FieldValue::Float(self.temp_true),
            FieldValue::Float(self.temp_est),
            FieldValue::Float(self.hysteresis_est),
            FieldValue::Float(self.v_true),
            FieldValue::Float(self.v_meas),
            FieldValue::Float(self.v_est),
            FieldValue::Float(self.r0_true),
            FieldValue::Float(self.r0_model),
            FieldValue::Float(self.r1_true),
            FieldValue::Float(self.r1_model),
            FieldValue::Float(self.c1_true),
            FieldValue::Float(self.c1_model),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_line_numbering() {
        let lines = RawLine::from_lines(["a", "  ", "b"]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].index, 2);
        assert_eq!(lines[2].text, "b");
        assert!(lines[1].is_blank());
    }

    #[test]
    fn test_section_from_marker_line() {
        assert_eq!(
            Section::from_marker_line("Case 1: Normal operation with measurement every step."),
            Some(Section::NormalOperation)
        );
        assert_eq!(
            Section::from_marker_line("Case 2: Missing measurement from k=20 to k=29."),
            Some(Section::MissingMeasurement)
        );
        assert_eq!(
            Section::from_marker_line("Case 3: Very small measurement noise (R ~ 0)."),
            Some(Section::LowNoise)
        );
        assert_eq!(Section::from_marker_line("Case 4: nothing"), None);
        assert_eq!(Section::from_marker_line("Time step dt = 0.100, N = 50"), None);
    }

    #[test]
    fn test_schema_columns_match_record_values() {
        let normal = NormalOperationRecord {
            time: 0.1,
            x_true: 0.1,
            v_true: 1.0,
            z_meas: 0.12,
            x_est: 0.02,
            v_est: 0.5,
        };
        let gap = MissingMeasurementRecord {
            index: 20,
            time: 2.0,
            measurement: Measurement::WithoutMeasurement,
            x_true: 1.0,
            x_est: 0.98,
        };
        let low_noise = LowNoiseRecord {
            index: 1,
            time: 0.2,
            x_true: 0.2,
            z_meas: 0.2,
            x_est: 0.2,
        };

        for record in [
            ExtractedRecord::NormalOperation(normal),
            ExtractedRecord::MissingMeasurement(gap),
            ExtractedRecord::LowNoise(low_noise),
        ] {
            let columns = record.schema().columns();
            let values = record.values();
            assert_eq!(columns.len(), values.len());
            for (column, value) in columns.iter().zip(&values) {
                assert_eq!(column.kind, value.kind(), "column {}", column.name);
            }
        }
    }

    #[test]
    fn test_battery_schema_uses_header_names() {
        let names: Vec<&str> = Schema::Battery.columns().iter().map(|c| c.name).collect();
        assert_eq!(names, BATTERY_COLUMNS.to_vec());
        assert_eq!(Schema::Battery.columns()[0].kind, ColumnKind::Integer);
    }

    #[test]
    fn test_measurement_literals() {
        assert_eq!(
            Measurement::from_literal("with meas"),
            Some(Measurement::WithMeasurement)
        );
        assert_eq!(
            Measurement::from_literal("NO meas"),
            Some(Measurement::WithoutMeasurement)
        );
        assert_eq!(Measurement::from_literal("no meas"), None);
        assert!(Measurement::WithMeasurement.is_present());
        assert!(!Measurement::WithoutMeasurement.is_present());
    }

    #[test]
    fn test_line_label_section() {
        assert_eq!(
            LineLabel::Data(Section::LowNoise).section(),
            Some(Section::LowNoise)
        );
        assert_eq!(LineLabel::Ignore(IgnoreReason::Blank).section(), None);
        assert_eq!(LineLabel::Unsectioned.section(), None);
    }
}
