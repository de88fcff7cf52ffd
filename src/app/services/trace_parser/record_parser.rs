//! Record extraction for narrative log sections
//!
//! Each section has its own extractor, a pure function from one line to an
//! optional record. `Ok(None)` means the line does not have the section's
//! shape (banners, separators, failure messages) and contributes nothing.
//! An error is only returned when a line has the right shape but one of its
//! numeric fields does not parse; the orchestrator downgrades that to a skip.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::field_parsers::{parse_index, parse_number, split_fields};
use crate::Result;
use crate::app::models::{
    ExtractedRecord, LowNoiseRecord, Measurement, MissingMeasurementRecord,
    NormalOperationRecord, RawLine, Section,
};
use crate::constants::{
    INTEGER_PATTERN, NORMAL_OPERATION_DELIMITER, NORMAL_OPERATION_FIELD_COUNT, NUMBER_PATTERN,
    WITH_MEASUREMENT_LITERAL, WITHOUT_MEASUREMENT_LITERAL,
};

// Every value is closed by whitespace or end of line, so a malformed token
// never matches as its valid prefix.
static MISSING_MEASUREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"k=\s*(?P<k>{int})\s+t=(?P<t>{num})\s+\((?P<flag>{with}|{without})\)\s+x_true=(?P<x_true>{num})\s+x_est=(?P<x_est>{num})(?:\s|$)",
        int = INTEGER_PATTERN,
        num = NUMBER_PATTERN,
        with = regex::escape(WITH_MEASUREMENT_LITERAL),
        without = regex::escape(WITHOUT_MEASUREMENT_LITERAL),
    );
    Regex::new(&pattern).expect("static regex must compile")
});

static LOW_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"k=\s*(?P<k>{int})\s+t=(?P<t>{num})\s+x_true=(?P<x_true>{num})\s+z_meas=(?P<z_meas>{num})\s+x_est=(?P<x_est>{num})(?:\s|$)",
        int = INTEGER_PATTERN,
        num = NUMBER_PATTERN,
    );
    Regex::new(&pattern).expect("static regex must compile")
});

/// Run the extractor bound to `section` on one line
pub fn extract_record(section: Section, line: &RawLine) -> Result<Option<ExtractedRecord>> {
    let record = match section {
        Section::NormalOperation => {
            extract_normal_operation(line)?.map(ExtractedRecord::NormalOperation)
        }
        Section::MissingMeasurement => {
            extract_missing_measurement(line)?.map(ExtractedRecord::MissingMeasurement)
        }
        Section::LowNoise => extract_low_noise(line)?.map(ExtractedRecord::LowNoise),
    };
    Ok(record)
}

/// Extract a delimited normal-operation row
///
/// The row must have exactly seven comma-separated fields; the first one is
/// the step index and is discarded.
pub fn extract_normal_operation(line: &RawLine) -> Result<Option<NormalOperationRecord>> {
    let fields = split_fields(line.trimmed(), NORMAL_OPERATION_DELIMITER);
    if fields.len() != NORMAL_OPERATION_FIELD_COUNT {
        return Ok(None);
    }

    let number = |position: usize| parse_number(fields[position], line.index);

    Ok(Some(NormalOperationRecord {
        time: number(1)?,
        x_true: number(2)?,
        v_true: number(3)?,
        z_meas: number(4)?,
        x_est: number(5)?,
        v_est: number(6)?,
    }))
}

/// Extract a missing-measurement row with its measurement flag
pub fn extract_missing_measurement(line: &RawLine) -> Result<Option<MissingMeasurementRecord>> {
    let Some(caps) = MISSING_MEASUREMENT_RE.captures(line.trimmed()) else {
        return Ok(None);
    };

    // The pattern only admits the two flag literals
    let Some(measurement) = Measurement::from_literal(&caps["flag"]) else {
        return Ok(None);
    };

    Ok(Some(MissingMeasurementRecord {
        index: parse_index(&caps["k"], line.index)?,
        time: captured_number(&caps, "t", line)?,
        measurement,
        x_true: captured_number(&caps, "x_true", line)?,
        x_est: captured_number(&caps, "x_est", line)?,
    }))
}

/// Extract a low-noise row
pub fn extract_low_noise(line: &RawLine) -> Result<Option<LowNoiseRecord>> {
    let Some(caps) = LOW_NOISE_RE.captures(line.trimmed()) else {
        return Ok(None);
    };

    Ok(Some(LowNoiseRecord {
        index: parse_index(&caps["k"], line.index)?,
        time: captured_number(&caps, "t", line)?,
        x_true: captured_number(&caps, "x_true", line)?,
        z_meas: captured_number(&caps, "z_meas", line)?,
        x_est: captured_number(&caps, "x_est", line)?,
    }))
}

fn captured_number(caps: &Captures<'_>, name: &str, line: &RawLine) -> Result<f64> {
    parse_number(&caps[name], line.index)
}
