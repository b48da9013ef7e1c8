// File: crates/slides-core/src/render.rs
// Summary: ChartRenderer: pure projection from (loaded data, ChartState) to a Scene.

use tracing::warn;

use crate::annotation;
use crate::axis::{format_value, Axis, AxisSide};
use crate::config::{DonutSpec, SeriesMark, SeriesSpec, SlideConfig, SlideLayout};
use crate::data::{Row, SlideData, TimeSeries, YearTable};
use crate::geometry::{Point, RectF};
use crate::layout::{pie, stack, stack_max, Slice};
use crate::scale::{BandScale, TimeScale, ValueScale};
use crate::scene::{LegendItem, Mark, Scene, TextAnchor};
use crate::state::ChartState;
use crate::theme::Theme;

/// Format for timestamps inside tooltips.
pub const TOOLTIP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Legend row pitch in pixels.
const LEGEND_ROW: f32 = 18.0;

/// Band padding of the stacked bar chart.
const BAND_PADDING: f32 = 0.1;

/// Rows whose category is enabled, in load order.
pub fn filtered_rows<'a>(rows: &'a [Row], state: &ChartState) -> Vec<&'a Row> {
    rows.iter().filter(|r| state.is_enabled(&r.category)).collect()
}

/// Donut slices over the enabled rows; disabled rows do not count toward the total.
pub fn percentages(rows: &[Row], state: &ChartState) -> Vec<Slice> {
    pie(&filtered_rows(rows, state))
}

/// Enabled stack keys in header order.
pub fn stack_order(keys: &[String], state: &ChartState) -> Vec<String> {
    keys.iter().filter(|k| state.is_enabled(k)).cloned().collect()
}

/// Enabled series clipped to the visible time window.
pub fn clip_series(series: &[TimeSeries], state: &ChartState) -> Vec<TimeSeries> {
    let Some(window) = state.visible_domain() else {
        return Vec::new();
    };
    series
        .iter()
        .filter(|s| state.is_enabled(&s.label))
        .map(|s| s.clipped(&window))
        .collect()
}

/// One parametric renderer for every slide, configured by a [`SlideConfig`].
#[derive(Clone, Debug)]
pub struct ChartRenderer {
    config: SlideConfig,
    theme: Theme,
}

impl ChartRenderer {
    pub fn new(config: SlideConfig) -> Self {
        let theme = config.theme();
        Self { config, theme }
    }

    pub fn config(&self) -> &SlideConfig { &self.config }
    pub fn theme(&self) -> &Theme { &self.theme }

    /// Project data and state into a scene. Never mutates state; an empty
    /// dataset yields an empty scene with bare axes.
    pub fn render(&self, data: &SlideData, state: &ChartState) -> Scene {
        match (&self.config.layout, data) {
            (SlideLayout::Breakdown { donut, bar_width, .. }, SlideData::Breakdown { rows, years }) => {
                self.render_breakdown(rows, years, donut, *bar_width, state)
            }
            (SlideLayout::Timeline { series: specs, y_padding }, SlideData::Timeline { series }) => {
                self.render_timeline(series, specs, *y_padding, state)
            }
            _ => {
                warn!(slide = %self.config.id, "data does not match slide layout; rendering empty scene");
                Scene::new(self.config.width, self.config.height, self.timeline_plot())
            }
        }
    }

    /// Legend column: a swatch and label per category, faded when disabled.
    fn push_legend(&self, scene: &mut Scene, state: &ChartState) {
        let origin = self.config.legend_origin;
        for (i, key) in state.categories().iter().enumerate() {
            let top = origin.y + i as f32 * LEGEND_ROW;
            let color = self.color(state, key, i);
            let enabled = state.is_enabled(key);
            let shown = if enabled { color } else { color.with_alpha(70) };
            scene.marks.push(Mark::Rect { rect: RectF::from_ltwh(origin.x, top, 12.0, 12.0), fill: shown, tooltip: None });
            scene.marks.push(Mark::text(
                Point::new(origin.x + 18.0, top + 10.0),
                key.clone(),
                if enabled { self.theme.axis_label } else { self.theme.tick.with_alpha(120) },
                12.0,
                TextAnchor::Start,
            ));
            scene.legend.push(LegendItem {
                key: key.clone(),
                color,
                enabled,
                hit: RectF::from_ltwh(origin.x, top - 2.0, 160.0, LEGEND_ROW),
            });
        }
    }

    fn color(&self, state: &ChartState, key: &str, fallback: usize) -> crate::color::Rgba {
        let index = state.categories().iter().position(|c| c == key).unwrap_or(fallback);
        self.config.colors.color(key, index)
    }

    fn timeline_plot(&self) -> RectF {
        self.config.insets.plot_rect(0.0, 0.0, self.config.width as f32, self.config.height as f32)
    }

    fn render_breakdown(
        &self,
        rows: &[Row],
        years: &YearTable,
        donut: &DonutSpec,
        bar_width: f32,
        state: &ChartState,
    ) -> Scene {
        let cfg = &self.config;
        let plot = cfg.insets.plot_rect(donut.size, 0.0, bar_width, cfg.height as f32);
        let mut scene = Scene::new(cfg.width, cfg.height, plot);
        self.push_legend(&mut scene, state);

        // donut
        let center = Point::new(donut.size * 0.5, donut.size * 0.5);
        scene.slices = percentages(rows, state);
        for (i, s) in scene.slices.iter().enumerate() {
            scene.marks.push(Mark::Arc {
                center,
                inner_radius: donut.inner_radius,
                outer_radius: donut.outer_radius,
                start_angle: s.start_angle,
                end_angle: s.end_angle,
                fill: self.color(state, &s.category, i),
                tooltip: Some(format!("<strong>{}</strong><br/>{}", s.category, s.percent_label())),
            });
        }

        // stacked bars
        scene.stack_keys = stack_order(&years.keys, state);
        let keys: Vec<&str> = scene.stack_keys.iter().map(String::as_str).collect();
        let band = BandScale::new(years.years(), plot.left, plot.right, BAND_PADDING);
        let y = ValueScale::new_nice(plot.top, plot.bottom, 0.0, stack_max(years, &keys), cfg.tick_count);
        for layer in stack(years, &keys) {
            for seg in layer {
                let Some(x) = band.position(&seg.year) else { continue };
                let top = y.to_px(seg.y1);
                let rect = RectF::from_ltwh(x, top, band.bandwidth, y.to_px(seg.y0) - top);
                scene.marks.push(Mark::Rect {
                    rect,
                    fill: self.color(state, &seg.key, 0),
                    tooltip: Some(format!("<strong>{}</strong><br/>Count: {}", seg.key, format_value(seg.count()))),
                });
            }
        }
        scene.value_domain = Some((y.vmin, y.vmax));
        scene.axes.push(Axis::band(&band, plot.left, plot.right, plot.bottom).with_title(&cfg.x_label));
        scene.axes.push(Axis::value(&y, plot.left, cfg.tick_count).with_title(&cfg.y_label));
        scene.annotations_visible = state.annotations_visible();
        scene
    }

    fn render_timeline(&self, series: &[TimeSeries], specs: &[SeriesSpec], y_padding: f64, state: &ChartState) -> Scene {
        let cfg = &self.config;
        let plot = self.timeline_plot();
        let mut scene = Scene::new(cfg.width, cfg.height, plot);
        self.push_legend(&mut scene, state);
        scene.annotations_visible = state.annotations_visible();

        // y stays fitted to all loaded samples regardless of zoom or filters
        let (lo, hi) = value_extent(series)
            .map(|(lo, hi)| ((lo - y_padding).floor(), (hi + y_padding).ceil()))
            .unwrap_or((0.0, 1.0));
        let y = ValueScale::new_linear(plot.top, plot.bottom, lo, hi);
        scene.value_domain = Some((y.vmin, y.vmax));
        scene.axes.push(Axis::value(&y, plot.left, cfg.tick_count).with_title(&cfg.y_label));

        let Some(domain) = state.visible_domain() else {
            scene.axes.insert(0, Axis::empty(AxisSide::Bottom, Point::new(plot.left, plot.bottom), plot.width()).with_title(&cfg.x_label));
            return scene;
        };
        let x = TimeScale::new(domain, plot.left, plot.right);
        scene.time_domain = Some(domain);
        scene.time_scale = Some(x);
        scene.axes.insert(0, Axis::time(&x, plot.bottom, cfg.tick_count).with_title(&cfg.x_label));

        scene.series = clip_series(series, state);
        for (i, s) in scene.series.iter().enumerate() {
            let color = self.color(state, &s.label, i);
            let spec = specs.iter().find(|sp| sp.label == s.label);
            let unit = spec.map(|sp| sp.unit.as_str()).unwrap_or_default();
            match spec.map(|sp| sp.mark).unwrap_or(SeriesMark::Line { width: 1.5 }) {
                SeriesMark::Dots { radius } => {
                    for p in s.samples.iter().filter(|p| p.value.is_finite()) {
                        scene.marks.push(Mark::Circle {
                            center: Point::new(x.to_px(p.timestamp), y.to_px(p.value)),
                            radius,
                            fill: color,
                            tooltip: Some(format!(
                                "{}: {} {}<br>{}",
                                s.label,
                                format_value(p.value),
                                unit,
                                p.timestamp.format(TOOLTIP_TIME_FORMAT)
                            )),
                        });
                    }
                }
                SeriesMark::Line { width } => {
                    // gaps (non-finite values) split the line
                    for run in s.samples.split(|p| !p.value.is_finite()).filter(|r| r.len() >= 2) {
                        let points = run.iter().map(|p| Point::new(x.to_px(p.timestamp), y.to_px(p.value))).collect();
                        scene.marks.push(Mark::Path { points, stroke: color, stroke_width: width });
                    }
                }
            }
        }

        // callout content comes from the full series; only placement follows the zoom
        scene.callouts = annotation::compute(&cfg.annotations, series);
        for c in &mut scene.callouts {
            if domain.contains(c.timestamp) {
                c.anchor = Some(Point::new(x.to_px(c.timestamp), y.to_px(c.value)));
            }
        }
        let color = self.theme.annotation;
        let notes: Vec<Mark> = scene
            .visible_callouts()
            .flat_map(|(c, at)| {
                [
                    Mark::Circle { center: at, radius: 5.0, fill: color.with_alpha(90), tooltip: None },
                    Mark::text(at.offset(8.0, -8.0), c.text.clone(), color, 11.0, TextAnchor::Start),
                ]
            })
            .collect();
        scene.marks.extend(notes);
        scene
    }
}

/// Min/max over all finite sample values.
fn value_extent(series: &[TimeSeries]) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(|s| s.samples.iter())
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}
