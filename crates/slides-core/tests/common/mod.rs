// File: crates/slides-core/tests/common/mod.rs
// Purpose: Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use slides_core::{Row, SlideConfig, SlideData, TimeSample, TimeSeries, YearTable};

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn walking_running_rows() -> SlideData {
    let mut years = YearTable::new(vec!["Walking".into(), "Running".into()]);
    years.push("2020", &[("Walking", 70.0), ("Running", 30.0)]);
    years.push("2021", &[("Walking", 50.0), ("Running", 50.0)]);
    SlideData::Breakdown {
        rows: vec![Row::new("Walking", 120.0), Row::new("Running", 80.0)],
        years,
    }
}

/// Two series, one point each on 2021-10-01 and 2021-11-01.
pub fn two_series() -> SlideData {
    let points = |a: f64, b: f64| vec![TimeSample::new(date(2021, 10, 1), a), TimeSample::new(date(2021, 11, 1), b)];
    SlideData::Timeline {
        series: vec![
            TimeSeries::new("Walking", points(3.0, 9.5)),
            TimeSeries::new("Running", points(2.0, 4.0)),
        ],
    }
}

pub fn resting_series() -> SlideData {
    let values = [62.0, 71.0, 74.0, 66.0, 60.0, 72.0];
    let samples = values
        .iter()
        .enumerate()
        .map(|(i, &v)| TimeSample::new(date(2021, 10, 1 + i as u32), v))
        .collect();
    let heart = (0..6).map(|i| TimeSample::new(date(2021, 10, 1 + i), 90.0 + i as f64)).collect();
    SlideData::Timeline {
        series: vec![TimeSeries::new("Heart Rate", heart), TimeSeries::new("Resting Heart Rate", samples)],
    }
}

pub fn breakdown_config() -> SlideConfig {
    SlideConfig::breakdown()
}

pub fn walking_config() -> SlideConfig {
    SlideConfig::walking_running()
}

pub fn heart_config() -> SlideConfig {
    SlideConfig::heart_rate()
}
