// File: crates/slides-core/src/data.rs
// Summary: Immutable row records loaded once per slide activation.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One category observation (e.g. workout type and its count).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub category: String,
    pub value: f64,
}

impl Row {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self { category: category.into(), value }
    }
}

/// One year of per-category counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearSeries {
    pub year: String,
    pub counts: BTreeMap<String, f64>,
}

impl YearSeries {
    /// Count for `key`; gaps read as zero.
    pub fn count(&self, key: &str) -> f64 {
        self.counts.get(key).copied().unwrap_or(0.0)
    }
}

/// Yearly summary table. `keys` is the category column order from the header.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct YearTable {
    pub keys: Vec<String>,
    pub records: Vec<YearSeries>,
}

impl YearTable {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, records: Vec::new() }
    }

    /// Append a record; counts for keys not in `pairs` are stored as zero so
    /// every record exposes the same key set.
    pub fn push(&mut self, year: impl Into<String>, pairs: &[(&str, f64)]) {
        let mut counts: BTreeMap<String, f64> = self.keys.iter().map(|k| (k.clone(), 0.0)).collect();
        for &(k, v) in pairs {
            if let Some(slot) = counts.get_mut(k) {
                *slot = v;
            }
        }
        self.records.push(YearSeries { year: year.into(), counts });
    }

    pub fn years(&self) -> Vec<String> {
        self.records.iter().map(|r| r.year.clone()).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl TimeSample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Inclusive time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t <= self.end
    }

    /// Overlap with `other`, or `None` when disjoint.
    pub fn intersect(&self, other: &TimeWindow) -> Option<TimeWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(TimeWindow { start, end })
    }

    pub fn span_millis(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }
}

/// A labelled time series; the label is its category for legend toggling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub label: String,
    pub samples: Vec<TimeSample>,
}

impl TimeSeries {
    pub fn new(label: impl Into<String>, samples: Vec<TimeSample>) -> Self {
        Self { label: label.into(), samples }
    }

    /// Keep samples on or after midnight UTC of `cutoff`.
    pub fn since(mut self, cutoff: NaiveDate) -> Self {
        let t0 = cutoff.and_time(chrono::NaiveTime::MIN).and_utc();
        self.samples.retain(|s| s.timestamp >= t0);
        self
    }

    /// Keep every `step`-th sample, starting with the first.
    pub fn every(mut self, step: usize) -> Self {
        if step > 1 {
            self.samples = self.samples.into_iter().step_by(step).collect();
        }
        self
    }

    pub fn extent(&self) -> Option<TimeWindow> {
        extent(std::iter::once(self))
    }

    /// Samples inside `window`, in order.
    pub fn clipped(&self, window: &TimeWindow) -> TimeSeries {
        TimeSeries {
            label: self.label.clone(),
            samples: self.samples.iter().copied().filter(|s| window.contains(s.timestamp)).collect(),
        }
    }
}

/// Time extent over several series; `None` when there are no samples.
pub fn extent<'a>(series: impl IntoIterator<Item = &'a TimeSeries>) -> Option<TimeWindow> {
    let mut out: Option<TimeWindow> = None;
    for s in series {
        for p in &s.samples {
            out = Some(match out {
                None => TimeWindow::new(p.timestamp, p.timestamp),
                Some(w) => TimeWindow::new(w.start.min(p.timestamp), w.end.max(p.timestamp)),
            });
        }
    }
    out
}

/// Everything one slide loads. Immutable for the lifetime of an activation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideData {
    Breakdown { rows: Vec<Row>, years: YearTable },
    Timeline { series: Vec<TimeSeries> },
}

impl SlideData {
    /// Category key set in legend order: yearly columns first, then any
    /// breakdown labels not already present; series labels for timelines.
    pub fn categories(&self) -> Vec<String> {
        match self {
            SlideData::Breakdown { rows, years } => {
                let mut keys = years.keys.clone();
                for r in rows {
                    if !keys.contains(&r.category) {
                        keys.push(r.category.clone());
                    }
                }
                keys
            }
            SlideData::Timeline { series } => {
                let mut keys: Vec<String> = Vec::with_capacity(series.len());
                for s in series {
                    if !keys.contains(&s.label) {
                        keys.push(s.label.clone());
                    }
                }
                keys
            }
        }
    }

    /// Full time extent of the loaded series (`None` for breakdown slides).
    pub fn time_extent(&self) -> Option<TimeWindow> {
        match self {
            SlideData::Timeline { series } => extent(series),
            SlideData::Breakdown { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SlideData::Breakdown { rows, years } => rows.is_empty() && years.records.is_empty(),
            SlideData::Timeline { series } => series.iter().all(|s| s.samples.is_empty()),
        }
    }
}
