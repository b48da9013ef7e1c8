// File: crates/slides-core/src/theme.rs
// Summary: Light/Dark theming for scene chrome (background, axes, tooltip, controls).

use crate::color::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub tick: Rgba,
    pub tooltip_fill: Rgba,
    pub tooltip_text: Rgba,
    pub control_fill: Rgba,
    pub control_stroke: Rgba,
    pub control_text: Rgba,
    pub brush_fill: Rgba,
    pub annotation: Rgba,
    pub message: Rgba,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(255, 255, 255),
            axis_line: Rgba::rgb(0, 0, 0),
            axis_label: Rgba::rgb(0, 0, 0),
            tick: Rgba::rgb(60, 60, 70),
            tooltip_fill: Rgba::from_argb(230, 255, 255, 255),
            tooltip_text: Rgba::rgb(20, 20, 30),
            control_fill: Rgba::rgb(0xee, 0xee, 0xee),
            control_stroke: Rgba::rgb(0x99, 0x99, 0x99),
            control_text: Rgba::rgb(0x33, 0x33, 0x33),
            brush_fill: Rgba::from_argb(51, 100, 100, 100),
            annotation: Rgba::rgb(0xd6, 0x27, 0x28),
            message: Rgba::rgb(0xb0, 0x00, 0x20),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(235, 235, 245),
            tick: Rgba::rgb(150, 150, 160),
            tooltip_fill: Rgba::from_argb(230, 40, 40, 48),
            tooltip_text: Rgba::rgb(235, 235, 245),
            control_fill: Rgba::rgb(50, 50, 58),
            control_stroke: Rgba::rgb(120, 120, 130),
            control_text: Rgba::rgb(230, 230, 240),
            brush_fill: Rgba::from_argb(60, 200, 200, 200),
            annotation: Rgba::rgb(255, 230, 70),
            message: Rgba::rgb(255, 110, 110),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
