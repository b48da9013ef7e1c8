// File: crates/slides-core/tests/loader.rs
// Purpose: CSV table parsing and the file-backed data source.

mod common;

use std::path::PathBuf;

use common::date;
use slides_core::loader::{load_category_rows, load_time_samples, load_year_table, parse_timestamp};
use slides_core::{ChartError, DataSource, FileSource, LoadError, SlideConfig, SlideData, TimeColumns};

#[test]
fn category_rows() {
    let csv = "workoutActivityType,count\nWalking,120\nRunning, 80\n";
    let rows = load_category_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].category, "Running");
    assert_eq!(rows[1].value, 80.0);
}

#[test]
fn year_table_keeps_header_order_and_zero_fills() {
    let csv = "year,Walking,Running,Cycling\n2020,10,,3\n2021,4,5,6\n";
    let t = load_year_table(csv.as_bytes()).unwrap();
    assert_eq!(t.keys, vec!["Walking", "Running", "Cycling"]);
    assert_eq!(t.years(), vec!["2020", "2021"]);
    assert_eq!(t.records[0].count("Running"), 0.0);
    assert_eq!(t.records[1].count("Cycling"), 6.0);
}

#[test]
fn year_table_serializes_in_stable_key_order() {
    let csv = "year,Walking,Running,Cycling\n2021,5,3,1\n";
    let years = load_year_table(csv.as_bytes()).unwrap();
    let json = serde_json::to_string(&years.records[0]).unwrap();
    assert_eq!(json, r#"{"year":"2021","counts":{"Cycling":1.0,"Running":3.0,"Walking":5.0}}"#);
    assert_eq!(serde_json::to_string(&load_year_table(csv.as_bytes()).unwrap().records[0]).unwrap(), json);
}

#[test]
fn missing_column_is_reported() {
    let csv = "type,count\nWalking,1\n";
    let err = load_category_rows(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "workoutActivityType"));
}

#[test]
fn bad_number_is_reported_with_row() {
    let csv = "workoutActivityType,count\nWalking,12\nRunning,lots\n";
    match load_category_rows(csv.as_bytes()) {
        Err(LoadError::BadValue { row, column, value }) => {
            assert_eq!((row, column.as_str(), value.as_str()), (2, "count", "lots"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn daily_distance_blank_is_zero_and_sorted() {
    let csv = "date,distance\n2021-10-02,3.5\n2021-10-01,\n";
    let s = load_time_samples(csv.as_bytes(), TimeColumns::DailyDistance).unwrap();
    assert_eq!(s[0].timestamp, date(2021, 10, 1));
    assert_eq!(s[0].value, 0.0);
    assert_eq!(s[1].value, 3.5);
}

#[test]
fn heart_rate_blank_value_is_a_gap() {
    let csv = "creationDate,value\n2021-10-01 08:00:00 -0700,61\n2021-10-02 08:00:00 -0700,\n";
    let s = load_time_samples(csv.as_bytes(), TimeColumns::CreationDate).unwrap();
    assert_eq!(s[0].timestamp.to_rfc3339(), "2021-10-01T15:00:00+00:00");
    assert!(s[1].value.is_nan());
}

#[test]
fn heart_rate_unparsable_value_is_a_gap() {
    let csv = "creationDate,value\n2021-10-01,61\n2021-10-02,abc\n2021-10-03,64\n";
    let s = load_time_samples(csv.as_bytes(), TimeColumns::CreationDate).unwrap();
    assert_eq!(s.len(), 3);
    assert_eq!(s[1].timestamp, date(2021, 10, 2));
    assert!(s[1].value.is_nan());
    assert_eq!(s[2].value, 64.0);
}

#[test]
fn distance_and_timestamp_cells_stay_strict() {
    let csv = "date,distance\n2021-10-01,far\n";
    assert!(matches!(
        load_time_samples(csv.as_bytes(), TimeColumns::DailyDistance),
        Err(LoadError::BadValue { row: 1, .. })
    ));
    let csv = "creationDate,value\nyesterday,61\n";
    match load_time_samples(csv.as_bytes(), TimeColumns::CreationDate) {
        Err(LoadError::BadValue { column, .. }) => assert_eq!(column, "creationDate"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn timestamp_forms() {
    let want = date(2021, 9, 7);
    assert_eq!(parse_timestamp("2021-09-07"), Some(want));
    assert_eq!(parse_timestamp("2021-09-07 00:00:00"), Some(want));
    assert_eq!(parse_timestamp("2021-09-07T00:00:00Z"), Some(want));
    assert_eq!(parse_timestamp("2021-09-07 02:00:00 +0200"), Some(want));
    assert_eq!(parse_timestamp("yesterday"), None);
}

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target/test_out").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn file_source_applies_cutoff_and_thinning() {
    let dir = fixture_dir("loader_heart");
    let mut heart = String::from("creationDate,value\n");
    for d in 1..=30 {
        heart.push_str(&format!("2021-09-{d:02} 12:00:00 +0000,{}\n", 60 + d));
    }
    std::fs::write(dir.join("heart_rate.csv"), &heart).unwrap();
    std::fs::write(dir.join("resting_heart_rate.csv"), &heart).unwrap();

    let data = FileSource::new(&dir).load(&SlideConfig::heart_rate()).unwrap();
    let SlideData::Timeline { series } = data else { panic!("expected timeline") };
    // 24 samples from 09-07 on; every 10th -> 3, every 2nd -> 12
    assert_eq!(series[0].samples.len(), 3);
    assert_eq!(series[0].samples[0].timestamp.date_naive().to_string(), "2021-09-07");
    assert_eq!(series[1].samples.len(), 12);
}

#[test]
fn file_source_fails_on_first_missing_table() {
    let dir = fixture_dir("loader_missing");
    let _ = std::fs::remove_file(dir.join("breakout_by_workout_type.csv"));
    let err = FileSource::new(&dir).load(&SlideConfig::breakdown()).unwrap_err();
    match err {
        ChartError::LoadFailure { path, .. } => assert!(path.ends_with("breakout_by_workout_type.csv")),
        other => panic!("unexpected {other}"),
    }
}
