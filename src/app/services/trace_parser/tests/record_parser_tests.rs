//! Tests for the per-section record extractors

use super::*;
use crate::Error;
use crate::app::models::{ExtractedRecord, Measurement, Section};
use crate::app::services::trace_parser::record_parser::{
    extract_low_noise, extract_missing_measurement, extract_normal_operation, extract_record,
};

fn line(text: &str) -> RawLine {
    RawLine::new(3, text)
}

#[test]
fn test_normal_operation_row() {
    let record = extract_normal_operation(&line(" 0, 0.10, 0.1000, 1.0000, 0.1243, 0.0200, 0.5000"))
        .unwrap()
        .unwrap();

    assert_eq!(record.time, 0.10);
    assert_eq!(record.x_true, 0.1000);
    assert_eq!(record.v_true, 1.0000);
    assert_eq!(record.z_meas, 0.1243);
    assert_eq!(record.x_est, 0.0200);
    assert_eq!(record.v_est, 0.5000);
}

#[test]
fn test_normal_operation_accepts_signs_and_exponents() {
    let record = extract_normal_operation(&line("12, 1.30, -1.5e-3, +2, 3E2, -0.0001, 1.0e+1"))
        .unwrap()
        .unwrap();

    assert_eq!(record.x_true, -0.0015);
    assert_eq!(record.v_true, 2.0);
    assert_eq!(record.z_meas, 300.0);
    assert_eq!(record.v_est, 10.0);
}

#[test]
fn test_normal_operation_wrong_field_count_is_no_record() {
    assert!(extract_normal_operation(&line("0, 0.10, 0.1, 1.0, 0.1, 0.0")).unwrap().is_none());
    assert!(
        extract_normal_operation(&line("0, 0.10, 0.1, 1.0, 0.1, 0.0, 0.5, 9"))
            .unwrap()
            .is_none()
    );
    assert!(extract_normal_operation(&line("ukf_update failed at k=3: -2")).unwrap().is_none());
}

#[test]
fn test_normal_operation_bad_number_is_error() {
    match extract_normal_operation(&line("0, 0.10, nan, 1.0, 0.1, 0.0, 0.5")) {
        Err(Error::MalformedNumber { token, line }) => {
            assert_eq!(token, "nan");
            assert_eq!(line, 3);
        }
        other => panic!("expected malformed number, got {:?}", other),
    }
}

#[test]
fn test_missing_measurement_without_flag() {
    let record = extract_missing_measurement(&line("k=20 t=2.00 (NO meas) x_true=1.0000 x_est=0.9800"))
        .unwrap()
        .unwrap();

    assert_eq!(record.index, 20);
    assert_eq!(record.time, 2.00);
    assert_eq!(record.measurement, Measurement::WithoutMeasurement);
    assert_eq!(record.x_true, 1.0);
    assert_eq!(record.x_est, 0.98);
}

#[test]
fn test_missing_measurement_with_flag_and_padding() {
    let record = extract_missing_measurement(&line("k= 5 t=0.60 (with meas) x_true=0.600 x_est=0.611"))
        .unwrap()
        .unwrap();

    assert_eq!(record.index, 5);
    assert_eq!(record.measurement, Measurement::WithMeasurement);
    assert!(record.measurement.is_present());
}

#[test]
fn test_missing_measurement_harness_spacing() {
    let record = extract_missing_measurement(&line("k=21 t=2.10 (NO meas)  x_true=2.100 x_est=2.087"))
        .unwrap()
        .unwrap();
    assert_eq!(record.index, 21);
    assert_eq!(record.x_est, 2.087);
}

#[test]
fn test_missing_measurement_non_matching() {
    for text in [
        "k=20 t=2.00 (maybe meas) x_true=1.0 x_est=0.9",
        "k=20 t=2.00 x_true=1.0 z_meas=1.0 x_est=0.9",
        "ukf_predict failed at k=20: -1",
        "---------------",
    ] {
        assert!(extract_missing_measurement(&line(text)).unwrap().is_none(), "{}", text);
    }
}

#[test]
fn test_low_noise_row() {
    let record = extract_low_noise(&line("k= 3 t=0.40 x_true=0.40000 z_meas=0.40001 x_est=0.39999"))
        .unwrap()
        .unwrap();

    assert_eq!(record.index, 3);
    assert_eq!(record.time, 0.40);
    assert_eq!(record.x_true, 0.4);
    assert_eq!(record.z_meas, 0.40001);
    assert_eq!(record.x_est, 0.39999);
}

#[test]
fn test_low_noise_rejects_flagged_layout() {
    assert!(
        extract_low_noise(&line("k=20 t=2.00 (NO meas) x_true=1.0 x_est=0.9"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_malformed_trailing_number_is_no_record() {
    for token in ["1.2.3", "1e", "0.98abc"] {
        let gap = format!("k=20 t=2.00 (NO meas)  x_true=1.0 x_est={}", token);
        assert!(extract_missing_measurement(&line(&gap)).unwrap().is_none(), "{}", gap);

        let low = format!("k= 1 t=0.10 x_true=1.0 z_meas=2.0 x_est={}", token);
        assert!(extract_low_noise(&line(&low)).unwrap().is_none(), "{}", low);
    }
}

#[test]
fn test_trailing_whitespace_still_matches() {
    let record = extract_low_noise(&line("k= 1 t=0.10 x_true=1.0 z_meas=2.0 x_est=1.5 \t"))
        .unwrap()
        .unwrap();
    assert_eq!(record.x_est, 1.5);
}

#[test]
fn test_index_overflow_is_error() {
    let result = extract_low_noise(&line(
        "k=99999999999999999999 t=0.40 x_true=0.4 z_meas=0.4 x_est=0.4",
    ));
    assert!(matches!(result, Err(Error::MalformedNumber { .. })));
}

#[test]
fn test_extract_record_dispatches_by_section() {
    let row = line("k= 1 t=0.20 x_true=0.2 z_meas=0.2 x_est=0.2");

    match extract_record(Section::LowNoise, &row).unwrap() {
        Some(ExtractedRecord::LowNoise(record)) => assert_eq!(record.index, 1),
        other => panic!("expected low-noise record, got {:?}", other),
    }

    assert!(extract_record(Section::MissingMeasurement, &row).unwrap().is_none());
    assert!(extract_record(Section::NormalOperation, &row).unwrap().is_none());
}
