// File: crates/slides-core/src/axis.rs
// Summary: Axis model (line placement, ticks with labels, title) derived from a scale.

use serde::Serialize;

use crate::geometry::Point;
use crate::grid::{linspace, ticks};
use crate::scale::{BandScale, TimeScale, ValueScale};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tick {
    /// Pixel position along the axis (x for bottom axes, y for left axes).
    pub pos: f32,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub side: AxisSide,
    /// Axis line start (left end for bottom axes, top end for left axes).
    pub origin: Point,
    pub length: f32,
    pub ticks: Vec<Tick>,
    pub title: Option<String>,
}

/// Format for time tick labels.
pub const TIME_TICK_FORMAT: &str = "%b %Y";

impl Axis {
    /// Bottom time axis with `count` evenly spaced ticks across the domain.
    pub fn time(scale: &TimeScale, y: f32, count: usize) -> Self {
        let ticks = linspace(scale.left_px as f64, scale.right_px as f64, count)
            .into_iter()
            .map(|px| {
                let px = px as f32;
                Tick { pos: px, label: scale.from_px(px).format(TIME_TICK_FORMAT).to_string() }
            })
            .collect();
        Self {
            side: AxisSide::Bottom,
            origin: Point::new(scale.left_px, y),
            length: scale.right_px - scale.left_px,
            ticks,
            title: None,
        }
    }

    /// Left value axis with nice ticks.
    pub fn value(scale: &ValueScale, x: f32, count: usize) -> Self {
        let ticks = ticks(scale.vmin, scale.vmax, count)
            .into_iter()
            .map(|v| Tick { pos: scale.to_px(v), label: format_value(v) })
            .collect();
        Self {
            side: AxisSide::Left,
            origin: Point::new(x, scale.top_px),
            length: scale.bottom_px - scale.top_px,
            ticks,
            title: None,
        }
    }

    /// Bottom band axis with one tick per band, centred.
    pub fn band(scale: &BandScale, left: f32, right: f32, y: f32) -> Self {
        let ticks = scale
            .domain
            .iter()
            .filter_map(|k| scale.position(k).map(|x| Tick { pos: x + scale.bandwidth * 0.5, label: k.clone() }))
            .collect();
        Self { side: AxisSide::Bottom, origin: Point::new(left, y), length: right - left, ticks, title: None }
    }

    /// Axis with a line but no ticks (empty domain).
    pub fn empty(side: AxisSide, origin: Point, length: f32) -> Self {
        Self { side, origin, length, ticks: Vec::new(), title: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let t = title.into();
        self.title = (!t.is_empty()).then_some(t);
        self
    }

    /// End point of the axis line.
    pub fn end(&self) -> Point {
        match self.side {
            AxisSide::Bottom => self.origin.offset(self.length, 0.0),
            AxisSide::Left => self.origin.offset(0.0, self.length),
        }
    }
}

/// Integer values print without a fraction; others with up to two decimals.
pub fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
