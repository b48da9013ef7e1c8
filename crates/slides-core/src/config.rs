// File: crates/slides-core/src/config.rs
// Summary: Immutable per-slide configuration (layout, colors, labels, data files) and presets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationRule;
use crate::color::Rgba;
use crate::geometry::Point;
use crate::loader::TimeColumns;
use crate::theme::{self, Theme};
use crate::types::{Insets, HEIGHT, WIDTH};

/// Category -> color assignments, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMap(pub Vec<(String, Rgba)>);

/// Tableau 10, used for keys without an explicit color.
pub const FALLBACK_PALETTE: [Rgba; 10] = [
    Rgba::rgb(0x4e, 0x79, 0xa7),
    Rgba::rgb(0xf2, 0x8e, 0x2b),
    Rgba::rgb(0xe1, 0x57, 0x59),
    Rgba::rgb(0x76, 0xb7, 0xb2),
    Rgba::rgb(0x59, 0xa1, 0x4f),
    Rgba::rgb(0xed, 0xc9, 0x48),
    Rgba::rgb(0xb0, 0x7a, 0xa1),
    Rgba::rgb(0xff, 0x9d, 0xa7),
    Rgba::rgb(0x9c, 0x75, 0x5f),
    Rgba::rgb(0xba, 0xb0, 0xac),
];

impl ColorMap {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .filter_map(|&(k, hex)| Rgba::from_hex(hex).map(|c| (k.to_string(), c)))
                .collect(),
        )
    }

    /// Color for `key`; unknown keys take the palette entry for their legend index.
    pub fn color(&self, key: &str, index: usize) -> Rgba {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonutSpec {
    /// Side of the square box holding the donut, at the left of the surface.
    pub size: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl Default for DonutSpec {
    fn default() -> Self {
        Self { size: 400.0, inner_radius: 100.0, outer_radius: 180.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mark", rename_all = "snake_case")]
pub enum SeriesMark {
    Dots { radius: f32 },
    Line { width: f32 },
}

/// One time series on a timeline slide and where it comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub label: String,
    pub file: String,
    pub columns: TimeColumns,
    pub mark: SeriesMark,
    pub unit: String,
    /// Drop samples before this date.
    #[serde(default)]
    pub since: Option<NaiveDate>,
    /// Keep every n-th sample after the cutoff (1 keeps all).
    #[serde(default = "one")]
    pub every: usize,
}

fn one() -> usize { 1 }

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideLayout {
    /// Donut of category totals beside stacked bars of yearly counts.
    /// The bar chart box sits right of the donut and is `bar_width` wide.
    Breakdown { breakdown_file: String, yearly_file: String, donut: DonutSpec, bar_width: f32 },
    /// Time series with brush zoom and threshold annotations.
    Timeline { series: Vec<SeriesSpec>, y_padding: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideConfig {
    pub id: String,
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub layout: SlideLayout,
    #[serde(default)]
    pub colors: ColorMap,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    pub tick_count: usize,
    /// Top-left of the legend column.
    pub legend_origin: Point,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationRule>,
    pub failure_message: String,
}

fn default_theme() -> String { "light".to_string() }

impl SlideConfig {
    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }

    /// File names this slide loads, in load order.
    pub fn files(&self) -> Vec<&str> {
        match &self.layout {
            SlideLayout::Breakdown { breakdown_file, yearly_file, .. } => {
                vec![breakdown_file.as_str(), yearly_file.as_str()]
            }
            SlideLayout::Timeline { series, .. } => series.iter().map(|s| s.file.as_str()).collect(),
        }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Workout-type donut plus stacked yearly bars.
    pub fn breakdown() -> Self {
        Self {
            id: "breakdown".into(),
            width: WIDTH + 180,
            height: HEIGHT,
            insets: Insets::new(40, 20, 20, 30),
            layout: SlideLayout::Breakdown {
                breakdown_file: "breakout_by_workout_type.csv".into(),
                yearly_file: "activity_summary_by_year.csv".into(),
                donut: DonutSpec::default(),
                bar_width: 600.0,
            },
            colors: ColorMap::new(&[
                ("Walking", "#4e79a7"),
                ("Elliptical", "#f28e2b"),
                ("Running", "#e15759"),
                ("FunctionalStrengthTraining", "#76b7b2"),
                ("Swimming", "#59a14f"),
                ("Other", "#edc948"),
                ("Cycling", "#b07aa1"),
                ("UnderwaterDiving", "#ff9da7"),
            ]),
            x_label: String::new(),
            y_label: String::new(),
            tick_count: 10,
            legend_origin: Point::new(WIDTH as f32 + 10.0, 40.0),
            theme: default_theme(),
            annotations: Vec::new(),
            failure_message: "Failed to load workout data.".into(),
        }
    }

    /// Heart-rate dots with the resting heart-rate line.
    pub fn heart_rate() -> Self {
        let cutoff = NaiveDate::from_ymd_opt(2021, 9, 7);
        Self {
            id: "heart-rate".into(),
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            layout: SlideLayout::Timeline {
                series: vec![
                    SeriesSpec {
                        label: "Heart Rate".into(),
                        file: "heart_rate.csv".into(),
                        columns: TimeColumns::CreationDate,
                        mark: SeriesMark::Dots { radius: 2.0 },
                        unit: "bpm".into(),
                        since: cutoff,
                        every: 10,
                    },
                    SeriesSpec {
                        label: "Resting Heart Rate".into(),
                        file: "resting_heart_rate.csv".into(),
                        columns: TimeColumns::CreationDate,
                        mark: SeriesMark::Line { width: 1.5 },
                        unit: "bpm".into(),
                        since: cutoff,
                        every: 2,
                    },
                ],
                y_padding: 5.0,
            },
            colors: ColorMap::new(&[("Heart Rate", "#1f77b4"), ("Resting Heart Rate", "#ff7f0e")]),
            x_label: "time".into(),
            y_label: "bpm".into(),
            tick_count: 6,
            legend_origin: Point::new(70.0, 26.0),
            theme: default_theme(),
            annotations: vec![AnnotationRule::above(
                "Resting Heart Rate",
                70.0,
                "Elevated resting heart rate",
            )],
            failure_message: "Failed to load heart rate data.".into(),
        }
    }

    /// Daily walking and running distance lines.
    pub fn walking_running() -> Self {
        Self {
            id: "walking-running".into(),
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            layout: SlideLayout::Timeline {
                series: vec![
                    SeriesSpec {
                        label: "Walking".into(),
                        file: "walking_by_day.csv".into(),
                        columns: TimeColumns::DailyDistance,
                        mark: SeriesMark::Line { width: 1.5 },
                        unit: "km".into(),
                        since: None,
                        every: 1,
                    },
                    SeriesSpec {
                        label: "Running".into(),
                        file: "running_by_day.csv".into(),
                        columns: TimeColumns::DailyDistance,
                        mark: SeriesMark::Line { width: 1.5 },
                        unit: "km".into(),
                        since: None,
                        every: 1,
                    },
                ],
                y_padding: 1.0,
            },
            colors: ColorMap::new(&[("Walking", "#4e79a7"), ("Running", "#e15759")]),
            x_label: "date".into(),
            y_label: "distance (km)".into(),
            tick_count: 6,
            legend_origin: Point::new(70.0, 26.0),
            theme: default_theme(),
            annotations: vec![
                AnnotationRule::above("Walking", 8.0, "Long walk"),
                AnnotationRule::above("Running", 8.0, "Long run"),
            ],
            failure_message: "Failed to load walking and running data.".into(),
        }
    }
}

/// Return the built-in slide presets.
pub fn presets() -> Vec<SlideConfig> {
    vec![SlideConfig::breakdown(), SlideConfig::heart_rate(), SlideConfig::walking_running()]
}

/// Find a preset by id.
pub fn find(id: &str) -> Option<SlideConfig> {
    presets().into_iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_round_trip_through_json() {
        for cfg in presets() {
            let json = cfg.to_json().unwrap();
            assert_eq!(SlideConfig::from_json(&json).unwrap(), cfg);
        }
    }

    #[test]
    fn unknown_keys_take_palette_color() {
        let cfg = SlideConfig::breakdown();
        assert_eq!(cfg.colors.color("Walking", 5), Rgba::rgb(0x4e, 0x79, 0xa7));
        assert_eq!(cfg.colors.color("Rowing", 1), FALLBACK_PALETTE[1]);
    }
}
