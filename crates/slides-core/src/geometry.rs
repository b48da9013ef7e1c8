// File: crates/slides-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and hit testing.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Point on a circle using the pie convention: angle 0 at 12 o'clock, clockwise.
#[inline]
pub fn polar(center: Point, radius: f32, angle: f64) -> Point {
    Point::new(
        center.x + (angle.sin() as f32) * radius,
        center.y - (angle.cos() as f32) * radius,
    )
}

/// Closed outline of an annular sector, sampled along both arcs.
pub fn arc_outline(center: Point, inner: f32, outer: f32, start: f64, end: f64) -> Vec<Point> {
    let sweep = (end - start).max(0.0);
    let steps = ((sweep / std::f64::consts::TAU) * 96.0).ceil().max(2.0) as usize;
    let mut pts = Vec::with_capacity(2 * (steps + 1));
    for i in 0..=steps {
        let a = start + sweep * i as f64 / steps as f64;
        pts.push(polar(center, outer, a));
    }
    for i in (0..=steps).rev() {
        let a = start + sweep * i as f64 / steps as f64;
        pts.push(polar(center, inner, a));
    }
    pts
}
