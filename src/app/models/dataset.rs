//! Column-oriented time-series container
//!
//! A [`TimeSeriesDataset`] owns one ordered series per schema column. Records
//! are appended to every series or to none, so all series always share one
//! length.

use indexmap::IndexMap;
use serde::Serialize;

use super::{ColumnKind, FieldValue, Record, Schema};
use crate::constants::columns;
use crate::{Error, Result};

/// Values of one named series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesValues {
    Float(Vec<f64>),
    Integer(Vec<i64>),
    Flag(Vec<bool>),
}

impl SeriesValues {
    fn empty(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Float => SeriesValues::Float(Vec::new()),
            ColumnKind::Integer => SeriesValues::Integer(Vec::new()),
            ColumnKind::Flag => SeriesValues::Flag(Vec::new()),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            SeriesValues::Float(_) => ColumnKind::Float,
            SeriesValues::Integer(_) => ColumnKind::Integer,
            SeriesValues::Flag(_) => ColumnKind::Flag,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesValues::Float(values) => values.len(),
            SeriesValues::Integer(values) => values.len(),
            SeriesValues::Flag(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Minimum and maximum of a numeric series
    pub fn range(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = match self {
            SeriesValues::Float(values) => values.clone(),
            SeriesValues::Integer(values) => values.iter().map(|&v| v as f64).collect(),
            SeriesValues::Flag(_) => return None,
        };

        let mut iter = values.into_iter();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }

    /// Number of `true` entries in a flag series
    pub fn count_true(&self) -> Option<usize> {
        match self {
            SeriesValues::Flag(values) => Some(values.iter().filter(|&&v| v).count()),
            _ => None,
        }
    }

    // Caller has already checked the kind
    fn push_unchecked(&mut self, value: FieldValue) {
        match (self, value) {
            (SeriesValues::Float(values), FieldValue::Float(v)) => values.push(v),
            (SeriesValues::Integer(values), FieldValue::Integer(v)) => values.push(v),
            (SeriesValues::Flag(values), FieldValue::Flag(v)) => values.push(v),
            _ => unreachable!("series kind checked before append"),
        }
    }
}

/// `(time, value)` points split by a boolean flag column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagSplit {
    /// Points where the flag is set
    pub flagged: Vec<(f64, f64)>,
    /// Points where the flag is clear
    pub unflagged: Vec<(f64, f64)>,
}

/// Equal-length named series accumulated for one schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesDataset {
    schema: Schema,
    columns: IndexMap<&'static str, SeriesValues>,
}

impl TimeSeriesDataset {
    /// Create an empty dataset with one series per schema column
    pub fn new(schema: Schema) -> Self {
        let columns = schema
            .columns()
            .iter()
            .map(|spec| (spec.name, SeriesValues::empty(spec.kind)))
            .collect();

        Self { schema, columns }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Number of records appended so far
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, SeriesValues::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in schema order
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.keys().copied()
    }

    /// Named series with their values, in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SeriesValues)> {
        self.columns.iter().map(|(name, values)| (*name, values))
    }

    pub fn column(&self, name: &str) -> Option<&SeriesValues> {
        self.columns.get(name)
    }

    pub fn floats(&self, name: &str) -> Option<&[f64]> {
        match self.column(name)? {
            SeriesValues::Float(values) => Some(values),
            _ => None,
        }
    }

    pub fn integers(&self, name: &str) -> Option<&[i64]> {
        match self.column(name)? {
            SeriesValues::Integer(values) => Some(values),
            _ => None,
        }
    }

    pub fn flags(&self, name: &str) -> Option<&[bool]> {
        match self.column(name)? {
            SeriesValues::Flag(values) => Some(values),
            _ => None,
        }
    }

    /// Append a record to every series
    ///
    /// The record is validated against the schema before any series is
    /// touched, so a rejected record leaves the dataset unchanged.
    pub fn push(&mut self, record: &impl Record) -> Result<()> {
        if record.schema() != self.schema {
            return Err(Error::dataset_shape(
                self.schema.name(),
                format!("cannot append a {} record", record.schema()),
            ));
        }

        let values = record.values();
        if values.len() != self.columns.len() {
            return Err(Error::dataset_shape(
                self.schema.name(),
                format!(
                    "record has {} fields, expected {}",
                    values.len(),
                    self.columns.len()
                ),
            ));
        }

        for ((name, series), value) in self.columns.iter().zip(&values) {
            if series.kind() != value.kind() {
                return Err(Error::dataset_shape(
                    self.schema.name(),
                    format!(
                        "column '{}' holds {:?} values, got {:?}",
                        name,
                        series.kind(),
                        value.kind()
                    ),
                ));
            }
        }

        for (series, value) in self.columns.values_mut().zip(values) {
            series.push_unchecked(value);
        }

        Ok(())
    }

    /// Whether every series has the same length
    pub fn is_consistent(&self) -> bool {
        let expected = self.len();
        self.columns.values().all(|series| series.len() == expected)
    }

    /// Split a value series against time by a boolean flag column
    ///
    /// Returns `None` unless the dataset has a float time column `t`, a flag
    /// column `flag` and a float column `value`.
    pub fn split_by_flag(&self, flag: &str, value: &str) -> Option<FlagSplit> {
        let time = self.floats(columns::TIME)?;
        let flags = self.flags(flag)?;
        let values = self.floats(value)?;

        let mut split = FlagSplit::default();
        for ((&t, &set), &v) in time.iter().zip(flags).zip(values) {
            if set {
                split.flagged.push((t, v));
            } else {
                split.unflagged.push((t, v));
            }
        }

        Some(split)
    }
}
