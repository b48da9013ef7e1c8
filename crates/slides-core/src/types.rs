// File: crates/slides-core/src/types.rs
// Summary: Shared sizing types (surface dimensions, margins around the plot area).

use serde::{Deserialize, Serialize};

use crate::geometry::RectF;

/// Default surface width in pixels (wide enough for donut + stacked bars side by side).
pub const WIDTH: i32 = 1000;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 400;

/// Screen margins around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }

    /// Plot rectangle left over inside a `width` x `height` box placed at (`x`, `y`).
    pub fn plot_rect(&self, x: f32, y: f32, width: f32, height: f32) -> RectF {
        let w = (width - self.hsum() as f32).max(1.0);
        let h = (height - self.vsum() as f32).max(1.0);
        RectF::from_ltwh(x + self.left as f32, y + self.top as f32, w, h)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(60, 30, 20, 40)
    }
}
