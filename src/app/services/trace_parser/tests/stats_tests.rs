//! Tests for parsing statistics and dataset accumulation

use crate::app::models::{
    ExtractedRecord, LowNoiseRecord, Measurement, MissingMeasurementRecord, Section,
};
use crate::app::services::trace_parser::stats::{NarrativeDatasets, ParseStats};

fn low_noise(index: i64) -> ExtractedRecord {
    ExtractedRecord::LowNoise(LowNoiseRecord {
        index,
        time: index as f64 * 0.1,
        x_true: 1.0,
        z_meas: 1.0,
        x_est: 1.0,
    })
}

#[test]
fn test_parse_stats_creation() {
    let stats = ParseStats::new();
    assert_eq!(stats.total_lines, 0);
    assert_eq!(stats.records_parsed, 0);
    assert_eq!(stats.lines_skipped, 0);
    assert!(stats.errors.is_empty());
    assert_eq!(stats, ParseStats::default());
}

#[test]
fn test_success_rate_calculation() {
    let mut stats = ParseStats::new();
    assert_eq!(stats.success_rate(), 0.0);
    assert!(!stats.is_successful());

    stats.records_parsed = 95;
    stats.lines_skipped = 5;
    assert_eq!(stats.candidate_lines(), 100);
    assert_eq!(stats.success_rate(), 95.0);
    assert!(stats.is_successful());

    stats.lines_skipped = 25;
    assert!(!stats.is_successful());
}

#[test]
fn test_record_skip_caps_samples() {
    let mut stats = ParseStats::new();
    for i in 0..5 {
        stats.record_skip(format!("skip {}", i), 2);
    }
    assert_eq!(stats.lines_skipped, 5);
    assert_eq!(stats.errors, vec!["skip 0", "skip 1"]);
}

#[test]
fn test_stats_serialize_round_trip() {
    let mut stats = ParseStats::new();
    stats.total_lines = 4;
    stats.record_skip("Line 2: no active section", 10);

    let json = serde_json::to_string(&stats).unwrap();
    let back: ParseStats = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stats);
}

#[test]
fn test_datasets_created_lazily() {
    let mut datasets = NarrativeDatasets::new();
    assert!(datasets.is_empty());
    assert_eq!(datasets.record_count(Section::LowNoise), 0);

    datasets.append(&low_noise(0)).unwrap();
    datasets.append(&low_noise(1)).unwrap();

    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets.record_count(Section::LowNoise), 2);
    assert!(datasets.get(Section::NormalOperation).is_none());
}

#[test]
fn test_datasets_iterate_in_section_order() {
    let mut datasets = NarrativeDatasets::new();
    datasets.append(&low_noise(0)).unwrap();
    datasets
        .append(&ExtractedRecord::MissingMeasurement(MissingMeasurementRecord {
            index: 0,
            time: 0.0,
            measurement: Measurement::WithMeasurement,
            x_true: 0.0,
            x_est: 0.0,
        }))
        .unwrap();

    let order: Vec<Section> = datasets.iter().map(|(section, _)| section).collect();
    assert_eq!(order, vec![Section::MissingMeasurement, Section::LowNoise]);
}

#[test]
fn test_datasets_serialize_by_section_name() {
    let mut datasets = NarrativeDatasets::new();
    datasets.append(&low_noise(3)).unwrap();

    let value = serde_json::to_value(&datasets).unwrap();
    assert_eq!(value["low_noise"]["columns"]["k"], serde_json::json!([3]));
}
