// File: crates/slides-core/src/controller.rs
// Summary: InteractionController: input events -> named ChartState transitions -> repaint.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::data::SlideData;
use crate::error::ChartError;
use crate::geometry::{clamp, Point, RectF};
use crate::render::ChartRenderer;
use crate::scene::{Control, ControlId, Scene};
use crate::state::ChartState;
use crate::surface::{paint, Overlay, RenderSurface};
use crate::tooltip::Tooltip;

/// Zoom button state. `Armed` means the drag-select is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ZoomMode {
    Idle,
    Armed,
}

const CONTROL_W: f32 = 120.0;
const CONTROL_H: f32 = 24.0;
const CONTROL_GAP: f32 = 35.0;

/// Owns one slide's data, state and surface. Every handler mutates state
/// through a named transition and then repaints synchronously.
pub struct InteractionController<S: RenderSurface> {
    renderer: ChartRenderer,
    data: SlideData,
    state: ChartState,
    surface: S,
    zoom: ZoomMode,
    tooltip: Tooltip,
    /// In-progress drag selection, plot-local pixels (anchor, current).
    selection: Option<(f32, f32)>,
    scene: Scene,
    renders: u64,
}

impl<S: RenderSurface> InteractionController<S> {
    /// Build default state for `data` and paint the first frame.
    pub fn new(renderer: ChartRenderer, data: SlideData, surface: S) -> Self {
        let state = ChartState::from_data(&data);
        let mut ctl = Self {
            renderer,
            data,
            state,
            surface,
            zoom: ZoomMode::Idle,
            tooltip: Tooltip::default(),
            selection: None,
            scene: Scene::default(),
            renders: 0,
        };
        ctl.rerender();
        ctl
    }

    pub fn state(&self) -> &ChartState { &self.state }
    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn data(&self) -> &SlideData { &self.data }
    pub fn zoom_mode(&self) -> ZoomMode { self.zoom }
    pub fn tooltip(&self) -> &Tooltip { &self.tooltip }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    /// Number of repaints so far (the first paint counts).
    pub fn render_count(&self) -> u64 { self.renders }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Legend item activation.
    pub fn legend_click(&mut self, key: &str) -> Result<(), ChartError> {
        self.state.toggle_category(key)?;
        self.rerender();
        Ok(())
    }

    /// "Enable Zoom" / "Disable Zoom" button.
    pub fn zoom_button(&mut self) {
        self.zoom = match self.zoom {
            ZoomMode::Idle => ZoomMode::Armed,
            ZoomMode::Armed => ZoomMode::Idle,
        };
        self.selection = None;
        debug!(mode = ?self.zoom, "zoom toggled");
        self.rerender();
    }

    /// "Reset Zoom" button.
    pub fn reset_zoom(&mut self) {
        self.state.clear_zoom();
        self.rerender();
    }

    /// Annotation show/hide button.
    pub fn annotation_button(&mut self) {
        self.state.toggle_annotations();
        self.rerender();
    }

    /// Begin a drag at plot-local `x`; ignored unless armed.
    pub fn brush_start(&mut self, x: f32) {
        if self.zoom == ZoomMode::Armed {
            let x = self.brush_x(x);
            self.selection = Some((x, x));
        }
    }

    pub fn brush_move(&mut self, x: f32) {
        if let Some((anchor, _)) = self.selection {
            self.selection = Some((anchor, self.brush_x(x)));
            self.repaint();
        }
    }

    /// Release the drag and apply it.
    pub fn brush_end(&mut self) -> bool {
        match self.selection.take() {
            Some((a, b)) => self.select_range(a, b),
            None => false,
        }
    }

    /// Completed drag-select over plot-local pixels `[x0, x1]` (either order).
    ///
    /// Inverts the pixels through the current time scale and zooms. Returns
    /// whether the zoom was applied; idle, zero-width and out-of-extent
    /// gestures are dropped without a repaint.
    pub fn select_range(&mut self, x0: f32, x1: f32) -> bool {
        if self.zoom != ZoomMode::Armed {
            debug!("brush ignored: zoom not armed");
            return false;
        }
        let Some(scale) = self.scene.time_scale else {
            return false;
        };
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        if hi - lo < f32::EPSILON {
            return false;
        }
        let (start, end) = (scale.from_px(scale.left_px + lo), scale.from_px(scale.left_px + hi));
        match self.state.set_zoom(start, end) {
            Ok(()) => {
                self.zoom = ZoomMode::Idle;
                self.rerender();
                true
            }
            Err(e) => {
                warn!(error = %e, "brush ignored");
                false
            }
        }
    }

    /// Zoom straight to `[start, end]`, bypassing the brush. The zoom button mode is left alone.
    pub fn zoom_to(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ChartError> {
        self.state.set_zoom(start, end)?;
        self.rerender();
        Ok(())
    }

    /// Route a click in surface coordinates to a control or legend item.
    pub fn click(&mut self, at: Point) {
        if let Some(id) = self.scene.control_at(at) {
            match id {
                ControlId::ZoomToggle => self.zoom_button(),
                ControlId::ResetZoom => self.reset_zoom(),
                ControlId::AnnotationToggle => self.annotation_button(),
            }
        } else if let Some(key) = self.scene.legend_at(at).map(str::to_string) {
            // legend keys come from the state, so this cannot be unknown
            if let Err(e) = self.legend_click(&key) {
                warn!(error = %e, "legend click rejected");
            }
        }
    }

    /// Pointer moved to `at` (surface coordinates).
    pub fn pointer_move(&mut self, at: Point) {
        let hit = self.scene.mark_at(at).and_then(|m| m.tooltip()).map(str::to_string);
        match hit {
            Some(html) => self.tooltip.show(at, &html),
            None if self.tooltip.visible => self.tooltip.hide(),
            None => return,
        }
        self.repaint();
    }

    pub fn pointer_leave(&mut self) {
        if self.tooltip.visible {
            self.tooltip.hide();
            self.repaint();
        }
    }

    /// Label of the zoom button for the current mode.
    pub fn zoom_label(&self) -> &'static str {
        match self.zoom {
            ZoomMode::Idle => "Enable Zoom",
            ZoomMode::Armed => "Disable Zoom",
        }
    }

    /// Drags stay inside the plot area.
    fn brush_x(&self, x: f32) -> f32 {
        clamp(x, 0.0, self.scene.plot.width())
    }

    fn controls(&self) -> Vec<Control> {
        if !matches!(self.data, SlideData::Timeline { .. }) {
            return Vec::new();
        }
        let x = self.scene.width as f32 - 150.0;
        let y = self.scene.plot.top;
        let annotations = if self.state.annotations_visible() { "Hide Annotations" } else { "Show Annotations" };
        [
            (ControlId::ZoomToggle, self.zoom_label()),
            (ControlId::ResetZoom, "Reset Zoom"),
            (ControlId::AnnotationToggle, annotations),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (id, label))| Control {
            id,
            label: label.to_string(),
            rect: RectF::from_ltwh(x, y + i as f32 * CONTROL_GAP, CONTROL_W, CONTROL_H),
        })
        .collect()
    }

    /// Re-project the scene from state, then paint.
    fn rerender(&mut self) {
        self.scene = self.renderer.render(&self.data, &self.state);
        self.scene.controls = self.controls();
        // marks moved, so a stale tooltip would point at nothing
        self.tooltip.hide();
        self.repaint();
    }

    fn repaint(&mut self) {
        let plot = self.scene.plot;
        let brush = self.selection.map(|(a, b)| {
            RectF::from_ltrb(plot.left + a.min(b), plot.top, plot.left + a.max(b), plot.bottom)
        });
        let overlay = Overlay { brush, tooltip: Some(&self.tooltip) };
        paint(&self.scene, &overlay, &mut self.surface);
        self.renders += 1;
    }
}
