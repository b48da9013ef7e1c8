// File: crates/slides-core/src/scale.rs
// Summary: Time (X), value (Y) and band (categorical X) scale transforms.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::TimeWindow;
use crate::grid::nice_domain;

/// Horizontal time scale mapping a time window onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeScale {
    pub domain: TimeWindow,
    pub left_px: f32,
    pub right_px: f32,
}

impl TimeScale {
    pub fn new(domain: TimeWindow, left_px: f32, right_px: f32) -> Self {
        Self { domain, left_px, right_px }
    }

    fn span_ms(&self) -> f64 {
        (self.domain.span_millis() as f64).max(1.0)
    }

    #[inline]
    pub fn to_px(&self, t: DateTime<Utc>) -> f32 {
        let dt = (t - self.domain.start).num_milliseconds() as f64;
        let frac = dt / self.span_ms();
        self.left_px + (frac * (self.right_px - self.left_px) as f64) as f32
    }

    /// Invert a pixel position back to a timestamp (millisecond precision).
    pub fn from_px(&self, px: f32) -> DateTime<Utc> {
        let width = ((self.right_px - self.left_px) as f64).max(1e-9);
        let frac = (px - self.left_px) as f64 / width;
        let offset = (frac * self.span_ms()).round() as i64;
        self.domain.start + chrono::Duration::milliseconds(offset)
    }
}

/// Vertical linear value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    /// Linear scale whose domain is widened to nice tick boundaries.
    pub fn new_nice(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64, ticks: usize) -> Self {
        let (lo, hi) = nice_domain(vmin, vmax, ticks);
        Self::new_linear(top_px, bottom_px, lo, hi)
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}

/// Ordinal scale dividing a pixel range into equal bands with inner/outer padding.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandScale {
    pub domain: Vec<String>,
    pub left_px: f32,
    pub step: f32,
    pub bandwidth: f32,
}

impl BandScale {
    pub fn new(domain: Vec<String>, left_px: f32, right_px: f32, padding: f32) -> Self {
        let n = domain.len() as f32;
        let width = right_px - left_px;
        let step = width / (n - padding + 2.0 * padding).max(1.0);
        // centre the bands in the range
        let start = left_px + (width - step * (n - padding)) * 0.5;
        Self { domain, left_px: start, step, bandwidth: step * (1.0 - padding) }
    }

    /// Left edge of the band for `key`.
    pub fn position(&self, key: &str) -> Option<f32> {
        let i = self.domain.iter().position(|d| d == key)?;
        Some(self.left_px + self.step * i as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn time_scale_round_trips_edges() {
        let a = Utc.with_ymd_and_hms(2021, 10, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2021, 11, 1, 0, 0, 0).unwrap();
        let s = TimeScale::new(TimeWindow::new(a, b), 0.0, 910.0);
        assert_eq!(s.to_px(a), 0.0);
        assert_eq!(s.to_px(b), 910.0);
        assert_eq!(s.from_px(0.0), a);
        assert_eq!(s.from_px(910.0), b);
    }

    #[test]
    fn band_scale_padding() {
        let s = BandScale::new(vec!["2020".into(), "2021".into()], 0.0, 210.0, 0.1);
        // step = 210 / (2 - 0.1 + 0.2) = 100
        assert!((s.step - 100.0).abs() < 1e-4);
        assert!((s.bandwidth - 90.0).abs() < 1e-4);
        assert!((s.position("2020").unwrap() - 10.0).abs() < 1e-4);
        assert!(s.position("1999").is_none());
    }
}
