// File: crates/slides-core/src/svg.rs
// Summary: SVG document surface; builds markup in memory and writes it on demand.

use std::f64::consts::TAU;
use std::fmt::Write as _;
use std::path::Path;

use crate::axis::{Axis, AxisSide};
use crate::color::Rgba;
use crate::geometry::{polar, Point, RectF};
use crate::scene::{Control, Mark, TextAnchor};
use crate::surface::RenderSurface;
use crate::theme::Theme;
use crate::tooltip::Tooltip;

pub struct SvgSurface {
    width: i32,
    height: i32,
    theme: Theme,
    body: String,
    loading: bool,
}

impl SvgSurface {
    pub fn new(width: i32, height: i32, theme: Theme) -> Self {
        Self { width, height, theme, body: String::new(), loading: false }
    }

    pub fn is_loading(&self) -> bool { self.loading }

    /// Element markup drawn since the last clear.
    pub fn body(&self) -> &str { &self.body }

    /// Complete SVG document.
    pub fn document(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = self.width,
            h = self.height
        );
        let _ = write!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, self.theme.background);
        out.push_str(&self.body);
        if self.loading {
            let _ = write!(
                out,
                r#"<text class="loading" x="{}" y="{}" text-anchor="middle" fill="{}">Loading…</text>"#,
                self.width / 2,
                self.height / 2,
                self.theme.axis_label
            );
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.document())
    }

    fn text(&mut self, at: Point, text: &str, color: Rgba, size: f32, anchor: TextAnchor, extra: &str) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let _ = write!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="{}"{}{}>{}</text>"#,
            at.x,
            at.y,
            size,
            anchor,
            fill_attr(color),
            extra,
            escape(text)
        );
    }
}

fn fill_attr(c: Rgba) -> String {
    if c.a == 255 {
        format!(r#" fill="{}""#, c.with_alpha(255))
    } else {
        format!(r#" fill="{}" fill-opacity="{:.3}""#, c.with_alpha(255), c.opacity())
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Path data for an annular sector, split in halves so full circles still draw.
pub fn arc_path(center: Point, inner: f32, outer: f32, start: f64, end: f64) -> String {
    let mut d = String::new();
    let sweep = end - start;
    let mid = if sweep >= TAU - 1e-9 { Some(start + sweep * 0.5) } else { None };
    let large = if sweep > std::f64::consts::PI { 1 } else { 0 };

    let p = polar(center, outer, start);
    let _ = write!(d, "M{:.3},{:.3}", p.x, p.y);
    if let Some(m) = mid {
        let q = polar(center, outer, m);
        let _ = write!(d, "A{outer},{outer},0,0,1,{:.3},{:.3}", q.x, q.y);
    }
    let p = polar(center, outer, end);
    let _ = write!(d, "A{outer},{outer},0,{},1,{:.3},{:.3}", if mid.is_some() { 0 } else { large }, p.x, p.y);
    if inner > 0.0 {
        let p = polar(center, inner, end);
        let _ = write!(d, "L{:.3},{:.3}", p.x, p.y);
        if let Some(m) = mid {
            let q = polar(center, inner, m);
            let _ = write!(d, "A{inner},{inner},0,0,0,{:.3},{:.3}", q.x, q.y);
        }
        let p = polar(center, inner, start);
        let _ = write!(d, "A{inner},{inner},0,{},0,{:.3},{:.3}", if mid.is_some() { 0 } else { large }, p.x, p.y);
    } else {
        let _ = write!(d, "L{:.3},{:.3}", center.x, center.y);
    }
    d.push('Z');
    d
}

impl RenderSurface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn draw_mark(&mut self, mark: &Mark) {
        match mark {
            Mark::Arc { center, inner_radius, outer_radius, start_angle, end_angle, fill, .. } => {
                let d = arc_path(*center, *inner_radius, *outer_radius, *start_angle, *end_angle);
                let _ = write!(self.body, r#"<path class="arc" d="{}"{}/>"#, d, fill_attr(*fill));
            }
            Mark::Rect { rect, fill, .. } => {
                let _ = write!(
                    self.body,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}/>"#,
                    rect.left,
                    rect.top,
                    rect.width(),
                    rect.height(),
                    fill_attr(*fill)
                );
            }
            Mark::Circle { center, radius, fill, .. } => {
                let _ = write!(
                    self.body,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{}"{}/>"#,
                    center.x,
                    center.y,
                    radius,
                    fill_attr(*fill)
                );
            }
            Mark::Path { points, stroke, stroke_width } => {
                let mut d = String::new();
                for (i, p) in points.iter().enumerate() {
                    let _ = write!(d, "{}{:.2},{:.2}", if i == 0 { "M" } else { "L" }, p.x, p.y);
                }
                let _ = write!(
                    self.body,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                    d, stroke, stroke_width
                );
            }
            Mark::Text { at, text, color, size, anchor, rotate } => {
                let extra = if *rotate { format!(r#" transform="rotate(-90 {:.2} {:.2})""#, at.x, at.y) } else { String::new() };
                self.text(*at, text, *color, *size, *anchor, &extra);
            }
        }
    }

    fn draw_axis(&mut self, axis: &Axis) {
        let (a, b) = (axis.origin, axis.end());
        let theme = self.theme;
        let _ = write!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"/>"#,
            a.x, a.y, b.x, b.y, theme.axis_line
        );
        for t in &axis.ticks {
            let (p, q, label, anchor) = match axis.side {
                AxisSide::Bottom => (
                    Point::new(t.pos, a.y),
                    Point::new(t.pos, a.y + 6.0),
                    Point::new(t.pos, a.y + 18.0),
                    TextAnchor::Middle,
                ),
                AxisSide::Left => (
                    Point::new(a.x, t.pos),
                    Point::new(a.x - 6.0, t.pos),
                    Point::new(a.x - 9.0, t.pos + 4.0),
                    TextAnchor::End,
                ),
            };
            let _ = write!(
                self.body,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"/>"#,
                p.x, p.y, q.x, q.y, theme.tick
            );
            self.text(label, &t.label, theme.tick, 10.0, anchor, "");
        }
        if let Some(title) = &axis.title {
            match axis.side {
                AxisSide::Bottom => {
                    let at = Point::new(a.x + axis.length * 0.5, a.y + 35.0);
                    self.text(at, title, theme.axis_label, 12.0, TextAnchor::Middle, "");
                }
                AxisSide::Left => {
                    let at = Point::new(a.x - 45.0, a.y + axis.length * 0.5);
                    let rot = format!(r#" transform="rotate(-90 {:.2} {:.2})""#, at.x, at.y);
                    self.text(at, title, theme.axis_label, 12.0, TextAnchor::Middle, &rot);
                }
            }
        }
    }

    fn draw_control(&mut self, control: &Control) {
        let r = control.rect;
        let _ = write!(
            self.body,
            r#"<g class="control"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="4" fill="{}" stroke="{}"/>"#,
            r.left,
            r.top,
            r.width(),
            r.height(),
            self.theme.control_fill,
            self.theme.control_stroke
        );
        let at = Point::new(r.left + r.width() * 0.5, r.top + 16.0);
        let color = self.theme.control_text;
        self.text(at, &control.label, color, 12.0, TextAnchor::Middle, "");
        self.body.push_str("</g>");
    }

    fn draw_brush(&mut self, region: RectF) {
        let fill = self.theme.brush_fill;
        let _ = write!(
            self.body,
            r#"<rect class="selection" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}/>"#,
            region.left,
            region.top,
            region.width(),
            region.height(),
            fill_attr(fill)
        );
    }

    fn draw_tooltip(&mut self, tooltip: &Tooltip) {
        let lines = tooltip.lines();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * 7.0 + 12.0;
        let height = lines.len() as f32 * 15.0 + 8.0;
        let p = tooltip.position;
        let _ = write!(
            self.body,
            r#"<g class="tooltip"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="3"{} stroke="{}"/>"#,
            p.x,
            p.y,
            width,
            height,
            fill_attr(self.theme.tooltip_fill),
            self.theme.control_stroke
        );
        let color = self.theme.tooltip_text;
        for (i, line) in lines.iter().enumerate() {
            self.text(p.offset(6.0, 16.0 + i as f32 * 15.0), line, color, 12.0, TextAnchor::Start, "");
        }
        self.body.push_str("</g>");
    }

    fn show_message(&mut self, text: &str) {
        let at = Point::new(self.width as f32 * 0.5, self.height as f32 * 0.5);
        let color = self.theme.message;
        self.text(at, text, color, 14.0, TextAnchor::Middle, r#" class="message""#);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
