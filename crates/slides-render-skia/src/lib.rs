// File: crates/slides-render-skia/src/lib.rs
// Summary: SkiaSurface: RenderSurface over a CPU raster canvas, with PNG encoding.

use std::path::Path;

use anyhow::{anyhow, Result};
use skia_safe as skia;
use tracing::debug;

use slides_core::axis::{Axis, AxisSide};
use slides_core::geometry::arc_outline;
use slides_core::scene::{Control, Mark, TextAnchor};
use slides_core::{Point, RectF, RenderSurface, Rgba, Theme, Tooltip};

pub mod text;

pub use text::TextShaper;

pub struct RasterOptions {
    pub width: i32,
    pub height: i32,
    /// Skip all glyphs; pixel output is then identical across platforms.
    pub draw_labels: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { width: slides_core::types::WIDTH, height: slides_core::types::HEIGHT, draw_labels: true }
    }
}

pub struct SkiaSurface {
    surface: skia::Surface,
    theme: Theme,
    draw_labels: bool,
    text: TextShaper,
    loading: bool,
    message: Option<String>,
}

fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn fill(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(color(c));
    paint
}

fn stroke(c: Rgba, width: f32) -> skia::Paint {
    let mut paint = fill(c);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn rect(r: RectF) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

fn polyline(points: &[Point], close: bool) -> Option<skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut path = skia::Path::new();
    path.move_to((first.x, first.y));
    for p in rest {
        path.line_to((p.x, p.y));
    }
    if close {
        path.close();
    }
    Some(path)
}

impl SkiaSurface {
    pub fn new(opts: &RasterOptions, theme: Theme) -> Result<Self> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow!("failed to create {}x{} raster surface", opts.width, opts.height))?;
        surface.canvas().clear(color(theme.background));
        Ok(Self { surface, theme, draw_labels: opts.draw_labels, text: TextShaper::new(), loading: false, message: None })
    }

    pub fn width(&self) -> i32 { self.surface.width() }
    pub fn height(&self) -> i32 { self.surface.height() }
    pub fn is_loading(&self) -> bool { self.loading }

    /// Last message shown in place of a chart.
    pub fn message(&self) -> Option<&str> { self.message.as_deref() }

    /// Snapshot the canvas as PNG bytes.
    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn save_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        debug!(path = %path.display(), "png written");
        Ok(())
    }

    fn label(&mut self, at: Point, text: &str, c: Rgba, size: f32, anchor: TextAnchor, rotate: bool) {
        if !self.draw_labels {
            return;
        }
        let canvas = self.surface.canvas();
        if rotate {
            canvas.save();
            canvas.rotate(-90.0, Some(skia::Point::new(at.x, at.y)));
        }
        self.text.draw(canvas, text, at.x, at.y, size, color(c), anchor);
        if rotate {
            canvas.restore();
        }
    }
}

impl RenderSurface for SkiaSurface {
    fn clear(&mut self) {
        self.message = None;
        self.surface.canvas().clear(color(self.theme.background));
    }

    fn draw_mark(&mut self, mark: &Mark) {
        match mark {
            Mark::Arc { center, inner_radius, outer_radius, start_angle, end_angle, fill: c, .. } => {
                let outline = arc_outline(*center, *inner_radius, *outer_radius, *start_angle, *end_angle);
                if let Some(path) = polyline(&outline, true) {
                    self.surface.canvas().draw_path(&path, &fill(*c));
                }
            }
            Mark::Rect { rect: r, fill: c, .. } => {
                self.surface.canvas().draw_rect(rect(*r), &fill(*c));
            }
            Mark::Circle { center, radius, fill: c, .. } => {
                self.surface.canvas().draw_circle((center.x, center.y), *radius, &fill(*c));
            }
            Mark::Path { points, stroke: c, stroke_width } => {
                if let Some(path) = polyline(points, false) {
                    let mut paint = stroke(*c, *stroke_width);
                    paint.set_stroke_join(skia::paint::Join::Round);
                    self.surface.canvas().draw_path(&path, &paint);
                }
            }
            Mark::Text { at, text, color: c, size, anchor, rotate } => {
                self.label(*at, text, *c, *size, *anchor, *rotate);
            }
        }
    }

    fn draw_axis(&mut self, axis: &Axis) {
        let theme = self.theme;
        let (a, b) = (axis.origin, axis.end());
        let canvas = self.surface.canvas();
        canvas.draw_line((a.x, a.y), (b.x, b.y), &stroke(theme.axis_line, 1.0));
        let tick_paint = stroke(theme.tick, 1.0);
        for t in &axis.ticks {
            match axis.side {
                AxisSide::Bottom => canvas.draw_line((t.pos, a.y), (t.pos, a.y + 6.0), &tick_paint),
                AxisSide::Left => canvas.draw_line((a.x, t.pos), (a.x - 6.0, t.pos), &tick_paint),
            };
        }
        for t in &axis.ticks {
            let (at, anchor) = match axis.side {
                AxisSide::Bottom => (Point::new(t.pos, a.y + 18.0), TextAnchor::Middle),
                AxisSide::Left => (Point::new(a.x - 9.0, t.pos + 4.0), TextAnchor::End),
            };
            self.label(at, &t.label, theme.tick, 10.0, anchor, false);
        }
        if let Some(title) = &axis.title {
            match axis.side {
                AxisSide::Bottom => {
                    let at = Point::new(a.x + axis.length * 0.5, a.y + 35.0);
                    self.label(at, title, theme.axis_label, 12.0, TextAnchor::Middle, false);
                }
                AxisSide::Left => {
                    let at = Point::new(a.x - 45.0, a.y + axis.length * 0.5);
                    self.label(at, title, theme.axis_label, 12.0, TextAnchor::Middle, true);
                }
            }
        }
    }

    fn draw_control(&mut self, control: &Control) {
        let theme = self.theme;
        let r = rect(control.rect);
        let canvas = self.surface.canvas();
        canvas.draw_round_rect(r, 4.0, 4.0, &fill(theme.control_fill));
        canvas.draw_round_rect(r, 4.0, 4.0, &stroke(theme.control_stroke, 1.0));
        let at = Point::new(control.rect.left + control.rect.width() * 0.5, control.rect.top + 16.0);
        self.label(at, &control.label, theme.control_text, 12.0, TextAnchor::Middle, false);
    }

    fn draw_brush(&mut self, region: RectF) {
        self.surface.canvas().draw_rect(rect(region), &fill(self.theme.brush_fill));
    }

    fn draw_tooltip(&mut self, tooltip: &Tooltip) {
        let theme = self.theme;
        let lines = tooltip.lines();
        let width = lines
            .iter()
            .map(|l| if self.draw_labels { self.text.measure_width(l, 12.0) } else { l.chars().count() as f32 * 7.0 })
            .fold(0.0f32, f32::max)
            + 12.0;
        let height = lines.len() as f32 * 15.0 + 8.0;
        let p = tooltip.position;
        let r = skia::Rect::from_xywh(p.x, p.y, width, height);
        let canvas = self.surface.canvas();
        canvas.draw_round_rect(r, 3.0, 3.0, &fill(theme.tooltip_fill));
        canvas.draw_round_rect(r, 3.0, 3.0, &stroke(theme.control_stroke, 1.0));
        for (i, line) in lines.iter().enumerate() {
            self.label(p.offset(6.0, 16.0 + i as f32 * 15.0), line, theme.tooltip_text, 12.0, TextAnchor::Start, false);
        }
    }

    fn show_message(&mut self, text: &str) {
        let at = Point::new(self.width() as f32 * 0.5, self.height() as f32 * 0.5);
        self.label(at, text, self.theme.message, 14.0, TextAnchor::Middle, false);
        self.message = Some(text.to_string());
    }

    fn set_loading(&mut self, loading: bool) {
        let was = std::mem::replace(&mut self.loading, loading);
        let at = Point::new(self.width() as f32 * 0.5, self.height() as f32 * 0.5);
        if loading && !was {
            self.label(at, "Loading…", self.theme.axis_label, 14.0, TextAnchor::Middle, false);
        } else if was && !loading {
            // wipe the indicator
            self.surface.canvas().clear(color(self.theme.background));
        }
    }
}
