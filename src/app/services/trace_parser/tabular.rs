//! Strict extraction of the battery-harness table
//!
//! The battery harness prints a machine-generated CSV table with a named
//! header row. Unlike the narrative log, any defect aborts the pass: a
//! missing header column, a row without a required cell, or a cell that
//! fails the numeric grammar.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use super::column_mapping::ColumnMapping;
use super::field_parsers::{parse_index, parse_number};
use super::stats::ParseStats;
use crate::app::models::dataset::TimeSeriesDataset;
use crate::app::models::{BatteryRecord, RawLine, Schema};
use crate::constants::BATTERY_COLUMNS;
use crate::{Error, Result};

/// Header-driven extractor for the battery table
#[derive(Debug, Clone)]
pub struct TabularExtractor {
    delimiter: u8,
}

impl Default for TabularExtractor {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl TabularExtractor {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Extract the battery dataset from the buffered lines
    ///
    /// Blank lines are dropped first; the first remaining line is the header.
    pub fn extract(&self, lines: &[RawLine], stats: &mut ParseStats) -> Result<TimeSeriesDataset> {
        stats.total_lines += lines.len();

        let kept: Vec<&RawLine> = lines.iter().filter(|line| !line.is_blank()).collect();
        stats.lines_ignored += lines.len() - kept.len();

        let content = kept
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing("Failed to read table header", e))?
            .clone();

        let mapping = ColumnMapping::analyze(&headers, &BATTERY_COLUMNS)?;
        if !kept.is_empty() {
            stats.lines_ignored += 1;
        }
        if !mapping.extra_columns.is_empty() {
            debug!("Ignoring extra table columns: {:?}", mapping.extra_columns);
        }

        let mut dataset = TimeSeriesDataset::new(Schema::Battery);

        for (row_no, result) in reader.records().enumerate() {
            let record = result.map_err(|e| Error::csv_parsing(format!("Table row {}", row_no), e))?;

            // Map the reader's 1-based line back to the original line position
            let kept_position = record
                .position()
                .map(|pos| pos.line() as usize - 1)
                .unwrap_or(row_no + 1);
            let line = kept
                .get(kept_position)
                .map_or(kept_position, |raw| raw.index);

            let battery = parse_battery_row(&record, &mapping, line)?;
            dataset.push(&battery)?;
            stats.records_parsed += 1;
        }

        Ok(dataset)
    }
}

/// Look up a required cell by column name
fn required_cell<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    column: &str,
    line: usize,
) -> Result<&'a str> {
    let index = mapping
        .get_index(column)
        .ok_or_else(|| Error::missing_column(column))?;

    let value = record
        .get(index)
        .ok_or_else(|| Error::malformed_row(line, column, "is missing"))?;

    if value.is_empty() {
        return Err(Error::malformed_row(line, column, "is empty"));
    }

    Ok(value)
}

fn parse_battery_row(record: &StringRecord, mapping: &ColumnMapping, line: usize) -> Result<BatteryRecord> {
    let number = |column: &str| parse_number(required_cell(record, mapping, column, line)?, line);

    Ok(BatteryRecord {
        k: parse_index(required_cell(record, mapping, "k", line)?, line)?,
        t: number("t")?,
        current: number("I")?,
        soc_true: number("SOC_true")?,
        soc_est: number("SOC_est")?,
        temp_true: number("T_true")?,
        temp_est: number("T_est")?,
        hysteresis_est: number("H_est")?,
        v_true: number("V_true")?,
        v_meas: number("V_meas")?,
        v_est: number("V_est")?,
        r0_true: number("R0_true")?,
        r0_model: number("R0_model")?,
        r1_true: number("R1_true")?,
        r1_model: number("R1_model")?,
        c1_true: number("C1_true")?,
        c1_model: number("C1_model")?,
    })
}
