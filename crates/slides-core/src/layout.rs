// File: crates/slides-core/src/layout.rs
// Summary: Pie (donut) and stacked-bar layouts over the filtered rows.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::data::{Row, YearTable};

/// One donut segment with its share of the filtered total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slice {
    pub category: String,
    pub value: f64,
    /// Percentage of the filtered total, 0..=100.
    pub percent: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Slice {
    /// Tooltip label, e.g. `60.0%`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

/// Pie layout. Output keeps input order; angles are handed out largest value
/// first, clockwise from 12 o'clock. An empty or zero total yields no slices.
pub fn pie(rows: &[&Row]) -> Vec<Slice> {
    let value = |r: &Row| if r.value.is_finite() && r.value > 0.0 { r.value } else { 0.0 };
    let total: f64 = rows.iter().map(|&r| value(r)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| value(rows[b]).total_cmp(&value(rows[a])));

    let mut angles = vec![(0.0, 0.0); rows.len()];
    let mut a = 0.0;
    for &i in &order {
        let sweep = value(rows[i]) / total * TAU;
        angles[i] = (a, a + sweep);
        a += sweep;
    }

    rows.iter()
        .zip(angles)
        .map(|(&r, (start_angle, end_angle))| Slice {
            category: r.category.clone(),
            value: r.value,
            percent: value(r) / total * 100.0,
            start_angle,
            end_angle,
        })
        .collect()
}

/// One bar segment spanning cumulative counts `[y0, y1]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StackSegment {
    pub key: String,
    pub year: String,
    pub y0: f64,
    pub y1: f64,
}

impl StackSegment {
    pub fn count(&self) -> f64 { self.y1 - self.y0 }
}

/// Stack layout: one layer per key, in the order given.
pub fn stack(table: &YearTable, keys: &[&str]) -> Vec<Vec<StackSegment>> {
    let mut base = vec![0.0f64; table.records.len()];
    keys.iter()
        .map(|&key| {
            table
                .records
                .iter()
                .zip(base.iter_mut())
                .map(|(rec, y)| {
                    let y0 = *y;
                    *y += rec.count(key);
                    StackSegment { key: key.to_string(), year: rec.year.clone(), y0, y1: *y }
                })
                .collect()
        })
        .collect()
}

/// Largest per-year total over `keys`; 0 for an empty table.
pub fn stack_max(table: &YearTable, keys: &[&str]) -> f64 {
    table
        .records
        .iter()
        .map(|r| keys.iter().map(|k| r.count(k)).sum::<f64>())
        .fold(0.0, f64::max)
}
