// File: crates/slides-core/src/annotation.rs
// Summary: Fixed-threshold callouts computed over the full (unfiltered, unzoomed) series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::axis::format_value;
use crate::data::TimeSeries;
use crate::geometry::Point;

/// Flags runs of a series strictly above `threshold`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRule {
    pub series: String,
    pub threshold: f64,
    pub text: String,
}

impl AnnotationRule {
    pub fn above(series: impl Into<String>, threshold: f64, text: impl Into<String>) -> Self {
        Self { series: series.into(), threshold, text: text.into() }
    }

    /// One callout per maximal run of consecutive samples above the threshold,
    /// anchored at the run's peak (first peak on ties).
    pub fn evaluate(&self, series: &TimeSeries) -> Vec<Callout> {
        if series.label != self.series {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut peak: Option<(DateTime<Utc>, f64)> = None;
        for s in &series.samples {
            if s.value > self.threshold {
                match peak {
                    Some((_, v)) if v >= s.value => {}
                    _ => peak = Some((s.timestamp, s.value)),
                }
            } else if let Some((t, v)) = peak.take() {
                out.push(self.callout(t, v));
            }
        }
        if let Some((t, v)) = peak {
            out.push(self.callout(t, v));
        }
        out
    }

    fn callout(&self, timestamp: DateTime<Utc>, value: f64) -> Callout {
        Callout {
            series: self.series.clone(),
            timestamp,
            value,
            text: format!("{} ({})", self.text, format_value(value)),
            anchor: None,
        }
    }
}

/// An overlay note pinned to one sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Callout {
    pub series: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub text: String,
    /// Pixel anchor under the current scales; `None` when the sample is outside the visible window.
    pub anchor: Option<Point>,
}

impl Callout {
    /// Same note, ignoring placement.
    pub fn same_content(&self, other: &Callout) -> bool {
        self.series == other.series
            && self.timestamp == other.timestamp
            && self.value == other.value
            && self.text == other.text
    }
}

/// Evaluate every rule against every series.
pub fn compute(rules: &[AnnotationRule], series: &[TimeSeries]) -> Vec<Callout> {
    rules
        .iter()
        .flat_map(|r| series.iter().flat_map(move |s| r.evaluate(s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimeSample;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 10, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn one_callout_per_run_at_peak() {
        let s = TimeSeries::new(
            "Resting Heart Rate",
            vec![
                TimeSample::new(day(1), 60.0),
                TimeSample::new(day(2), 72.0),
                TimeSample::new(day(3), 75.0),
                TimeSample::new(day(4), 65.0),
                TimeSample::new(day(5), 71.0),
            ],
        );
        let rule = AnnotationRule::above("Resting Heart Rate", 70.0, "Elevated");
        let got = rule.evaluate(&s);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].timestamp, day(3));
        assert_eq!(got[0].text, "Elevated (75)");
        assert_eq!(got[1].timestamp, day(5));
    }

    #[test]
    fn other_series_ignored() {
        let s = TimeSeries::new("Heart Rate", vec![TimeSample::new(day(1), 150.0)]);
        assert!(AnnotationRule::above("Resting Heart Rate", 70.0, "x").evaluate(&s).is_empty());
    }
}
