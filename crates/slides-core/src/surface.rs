// File: crates/slides-core/src/surface.rs
// Summary: Rendering-surface contract and the single paint entry point.

use crate::axis::Axis;
use crate::geometry::RectF;
use crate::scene::{Control, Mark, Scene};
use crate::tooltip::Tooltip;

/// Drawing backend a scene is painted onto (SVG document, raster canvas, ...).
pub trait RenderSurface {
    /// Remove everything previously drawn.
    fn clear(&mut self);
    fn draw_mark(&mut self, mark: &Mark);
    fn draw_axis(&mut self, axis: &Axis);
    fn draw_control(&mut self, control: &Control);
    /// Translucent drag-selection region.
    fn draw_brush(&mut self, region: RectF);
    fn draw_tooltip(&mut self, tooltip: &Tooltip);
    /// Inline message in place of a chart (load failures).
    fn show_message(&mut self, text: &str);
    fn set_loading(&mut self, loading: bool);
}

/// Extra overlays the controller layers on top of a scene.
#[derive(Clone, Debug, Default)]
pub struct Overlay<'a> {
    pub brush: Option<RectF>,
    pub tooltip: Option<&'a Tooltip>,
}

/// Clear `surface` and draw `scene` in full.
pub fn paint(scene: &Scene, overlay: &Overlay<'_>, surface: &mut dyn RenderSurface) {
    surface.clear();
    for axis in &scene.axes {
        surface.draw_axis(axis);
    }
    for mark in &scene.marks {
        surface.draw_mark(mark);
    }
    for control in &scene.controls {
        surface.draw_control(control);
    }
    if let Some(region) = overlay.brush {
        surface.draw_brush(region);
    }
    if let Some(t) = overlay.tooltip.filter(|t| t.visible) {
        surface.draw_tooltip(t);
    }
}
