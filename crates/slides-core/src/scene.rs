// File: crates/slides-core/src/scene.rs
// Summary: Backend-neutral scene description produced by the renderer and consumed by surfaces.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::annotation::Callout;
use crate::axis::Axis;
use crate::color::Rgba;
use crate::data::{TimeSeries, TimeWindow};
use crate::geometry::{Point, RectF};
use crate::layout::Slice;
use crate::scale::TimeScale;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A drawable primitive in surface pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Mark {
    /// Annular sector; angles clockwise from 12 o'clock, in radians.
    Arc {
        center: Point,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: f64,
        end_angle: f64,
        fill: Rgba,
        tooltip: Option<String>,
    },
    Rect { rect: RectF, fill: Rgba, tooltip: Option<String> },
    Circle { center: Point, radius: f32, fill: Rgba, tooltip: Option<String> },
    Path { points: Vec<Point>, stroke: Rgba, stroke_width: f32 },
    Text { at: Point, text: String, color: Rgba, size: f32, anchor: TextAnchor, rotate: bool },
}

impl Mark {
    pub fn text(at: Point, text: impl Into<String>, color: Rgba, size: f32, anchor: TextAnchor) -> Self {
        Mark::Text { at, text: text.into(), color, size, anchor, rotate: false }
    }

    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Mark::Arc { tooltip, .. } | Mark::Rect { tooltip, .. } | Mark::Circle { tooltip, .. } => {
                tooltip.as_deref()
            }
            Mark::Path { .. } | Mark::Text { .. } => None,
        }
    }

    /// Whether `p` falls on the mark's filled area.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Mark::Arc { center, inner_radius, outer_radius, start_angle, end_angle, .. } => {
                let dx = (p.x - center.x) as f64;
                let dy = (p.y - center.y) as f64;
                let r = (dx * dx + dy * dy).sqrt();
                if r < *inner_radius as f64 || r > *outer_radius as f64 {
                    return false;
                }
                let a = dx.atan2(-dy).rem_euclid(TAU);
                a >= *start_angle && a < *end_angle
            }
            Mark::Rect { rect, .. } => rect.contains(p),
            Mark::Circle { center, radius, .. } => {
                // small dots get a slightly larger pick radius
                let r = radius.max(3.0);
                let (dx, dy) = (p.x - center.x, p.y - center.y);
                dx * dx + dy * dy <= r * r
            }
            Mark::Path { .. } | Mark::Text { .. } => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendItem {
    pub key: String,
    pub color: Rgba,
    pub enabled: bool,
    /// Clickable swatch + label area.
    pub hit: RectF,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    ZoomToggle,
    ResetZoom,
    AnnotationToggle,
}

/// A clickable button drawn on the surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Control {
    pub id: ControlId,
    pub label: String,
    pub rect: RectF,
}

/// Everything a surface needs to draw one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    pub width: i32,
    pub height: i32,
    /// Cartesian plot area (stacked bars or timeline).
    pub plot: RectF,
    pub marks: Vec<Mark>,
    pub axes: Vec<Axis>,
    pub legend: Vec<LegendItem>,
    /// Donut slices with percentages of the filtered total.
    pub slices: Vec<Slice>,
    /// Enabled stack keys, bottom to top.
    pub stack_keys: Vec<String>,
    /// Enabled series clipped to `time_domain`.
    pub series: Vec<TimeSeries>,
    pub time_domain: Option<TimeWindow>,
    pub value_domain: Option<(f64, f64)>,
    pub time_scale: Option<TimeScale>,
    pub callouts: Vec<Callout>,
    pub annotations_visible: bool,
    pub controls: Vec<Control>,
}

impl Scene {
    /// Empty scene of the given size.
    pub fn new(width: i32, height: i32, plot: RectF) -> Self {
        Self { width, height, plot, annotations_visible: true, ..Default::default() }
    }

    /// Top-most mark under `p` that carries tooltip content.
    pub fn mark_at(&self, p: Point) -> Option<&Mark> {
        self.marks.iter().rev().find(|m| m.tooltip().is_some() && m.contains(p))
    }

    pub fn legend_at(&self, p: Point) -> Option<&str> {
        self.legend.iter().find(|l| l.hit.contains(p)).map(|l| l.key.as_str())
    }

    pub fn control_at(&self, p: Point) -> Option<ControlId> {
        self.controls.iter().rev().find(|c| c.rect.contains(p)).map(|c| c.id)
    }

    /// Callouts that should be drawn now.
    pub fn visible_callouts(&self) -> impl Iterator<Item = (&Callout, Point)> {
        self.callouts
            .iter()
            .filter(move |_| self.annotations_visible)
            .filter_map(|c| c.anchor.map(|a| (c, a)))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
