// File: crates/slides-core/src/tooltip.rs
// Summary: The single floating tooltip element shared by all marks of a slide.

use serde::Serialize;

use crate::geometry::Point;

/// Offset from the pointer to the tooltip's top-left corner.
pub const POINTER_OFFSET: (f32, f32) = (10.0, -28.0);

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Tooltip {
    pub visible: bool,
    pub position: Point,
    pub html: String,
}

impl Tooltip {
    pub fn show(&mut self, pointer: Point, html: &str) {
        self.visible = true;
        self.position = pointer.offset(POINTER_OFFSET.0, POINTER_OFFSET.1);
        self.html.clear();
        self.html.push_str(html);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.html.clear();
    }

    /// Tooltip content as plain lines (`<br>` splits lines, other tags dropped).
    pub fn lines(&self) -> Vec<String> {
        plain_lines(&self.html)
    }
}

pub fn plain_lines(html: &str) -> Vec<String> {
    html.replace("<br/>", "\n")
        .replace("<br>", "\n")
        .lines()
        .map(strip_tags)
        .collect()
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_to_lines() {
        assert_eq!(plain_lines("<strong>Walking</strong><br/>60.0%"), vec!["Walking", "60.0%"]);
        let mut t = Tooltip::default();
        t.show(Point::new(100.0, 100.0), "a<br>b");
        assert_eq!(t.position, Point::new(110.0, 72.0));
        t.hide();
        assert!(!t.visible && t.html.is_empty());
    }
}
