// File: crates/slides-core/tests/controller.rs
// Purpose: InteractionController handlers, zoom button state machine, tooltips and controls.

mod common;

use common::*;
use slides_core::scene::ControlId;
use slides_core::{ChartError, ChartRenderer, InteractionController, Point, SvgSurface, Theme, ZoomMode};

fn timeline() -> InteractionController<SvgSurface> {
    let cfg = walking_config();
    let surface = SvgSurface::new(cfg.width, cfg.height, Theme::light());
    InteractionController::new(ChartRenderer::new(cfg), two_series(), surface)
}

fn breakdown() -> InteractionController<SvgSurface> {
    let cfg = breakdown_config();
    let surface = SvgSurface::new(cfg.width, cfg.height, Theme::light());
    InteractionController::new(ChartRenderer::new(cfg), walking_running_rows(), surface)
}

#[test]
fn first_paint_happens_on_construction() {
    let ctl = timeline();
    assert_eq!(ctl.render_count(), 1);
    assert!(ctl.surface().body().contains("<path"));
    assert_eq!(ctl.zoom_mode(), ZoomMode::Idle);
}

#[test]
fn brush_is_ignored_while_idle() {
    let mut ctl = timeline();
    assert!(!ctl.select_range(100.0, 400.0));
    assert!(ctl.state().zoom_domain().is_none());
    assert_eq!(ctl.render_count(), 1);
}

#[test]
fn armed_brush_zooms_once_then_disarms() {
    let mut ctl = timeline();
    ctl.zoom_button();
    assert_eq!(ctl.zoom_mode(), ZoomMode::Armed);
    assert_eq!(ctl.zoom_label(), "Disable Zoom");

    // plot is 910 px wide: the right half maps to 2021-10-16 12:00 .. 2021-11-01
    assert!(ctl.select_range(910.0, 455.0));
    assert_eq!(ctl.zoom_mode(), ZoomMode::Idle);
    let z = ctl.state().zoom_domain().unwrap();
    assert_eq!(z.start.to_rfc3339(), "2021-10-16T12:00:00+00:00");
    assert_eq!(z.end, date(2021, 11, 1));
    for s in &ctl.scene().series {
        assert_eq!(s.samples.len(), 1);
        assert_eq!(s.samples[0].timestamp, date(2021, 11, 1));
    }

    // auto-disarmed: a second drag does nothing
    assert!(!ctl.select_range(0.0, 100.0));
}

#[test]
fn drag_gesture_goes_through_start_move_end() {
    let mut ctl = timeline();
    ctl.zoom_button();
    ctl.brush_start(0.0);
    ctl.brush_move(200.0);
    assert!(ctl.surface().body().contains(r#"class="selection""#));
    assert!(ctl.brush_end());
    assert!(ctl.state().zoom_domain().is_some());
    assert!(!ctl.surface().body().contains(r#"class="selection""#));
}

#[test]
fn degenerate_or_outside_gestures_are_dropped_silently() {
    let mut ctl = timeline();
    ctl.zoom_button();
    let renders = ctl.render_count();
    assert!(!ctl.select_range(300.0, 300.0));
    assert!(!ctl.select_range(2000.0, 3000.0));
    assert_eq!(ctl.render_count(), renders);
    assert!(ctl.state().zoom_domain().is_none());
    assert_eq!(ctl.zoom_mode(), ZoomMode::Armed);
}

#[test]
fn disable_zoom_returns_to_idle() {
    let mut ctl = timeline();
    ctl.zoom_button();
    ctl.zoom_button();
    assert_eq!(ctl.zoom_mode(), ZoomMode::Idle);
    assert_eq!(ctl.scene().controls[0].label, "Enable Zoom");
}

#[test]
fn reset_restores_full_extent() {
    let mut ctl = timeline();
    let full = ctl.scene().time_domain;
    ctl.zoom_button();
    ctl.select_range(0.0, 300.0);
    assert_ne!(ctl.scene().time_domain, full);
    ctl.reset_zoom();
    assert_eq!(ctl.scene().time_domain, full);
}

#[test]
fn legend_click_toggles_and_repaints() {
    let mut ctl = timeline();
    ctl.legend_click("Walking").unwrap();
    assert_eq!(ctl.render_count(), 2);
    assert!(!ctl.state().is_enabled("Walking"));
    assert_eq!(ctl.scene().series.len(), 1);

    let err = ctl.legend_click("Rowing").unwrap_err();
    assert!(matches!(err, ChartError::UnknownCategory(_)));
    assert_eq!(ctl.render_count(), 2);
}

#[test]
fn clicks_route_to_controls_and_legend() {
    let mut ctl = timeline();
    let zoom = ctl.scene().controls.iter().find(|c| c.id == ControlId::ZoomToggle).unwrap().rect;
    ctl.click(Point::new(zoom.left + 5.0, zoom.top + 5.0));
    assert_eq!(ctl.zoom_mode(), ZoomMode::Armed);

    let notes = ctl.scene().controls.iter().find(|c| c.id == ControlId::AnnotationToggle).unwrap().rect;
    ctl.click(Point::new(notes.left + 5.0, notes.top + 5.0));
    assert!(!ctl.state().annotations_visible());

    let walking = ctl.scene().legend.iter().find(|l| l.key == "Walking").unwrap().hit;
    ctl.click(Point::new(walking.left + 4.0, walking.top + 6.0));
    assert!(!ctl.state().is_enabled("Walking"));
}

#[test]
fn breakdown_has_no_zoom_controls() {
    let ctl = breakdown();
    assert!(ctl.scene().controls.is_empty());
}

#[test]
fn tooltip_follows_pointer_over_arcs() {
    let mut ctl = breakdown();
    // 3 o'clock on the ring lies inside the Walking segment (0..216 degrees)
    ctl.pointer_move(Point::new(340.0, 200.0));
    let tip = ctl.tooltip();
    assert!(tip.visible);
    assert_eq!(tip.html, "<strong>Walking</strong><br/>60.0%");
    assert_eq!(tip.position, Point::new(350.0, 172.0));
    assert!(ctl.surface().body().contains(r#"class="tooltip""#));

    // donut hole
    ctl.pointer_move(Point::new(200.0, 200.0));
    assert!(!ctl.tooltip().visible);

    ctl.pointer_move(Point::new(340.0, 200.0));
    ctl.pointer_leave();
    assert!(!ctl.tooltip().visible);
    assert!(!ctl.surface().body().contains(r#"class="tooltip""#));
}

#[test]
fn disabling_walking_reprojects_percentages() {
    let mut ctl = breakdown();
    ctl.legend_click("Walking").unwrap();
    let slices = &ctl.scene().slices;
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].percent_label(), "100.0%");
}

#[test]
fn zoom_to_applies_window_without_touching_mode() {
    let mut ctl = timeline();
    ctl.zoom_to(date(2021, 10, 20), date(2021, 12, 1)).unwrap();
    assert_eq!(ctl.zoom_mode(), ZoomMode::Idle);
    // stored as the overlap with the loaded extent
    let z = ctl.state().zoom_domain().unwrap();
    assert_eq!((z.start, z.end), (date(2021, 10, 20), date(2021, 11, 1)));

    let err = ctl.zoom_to(date(2022, 1, 1), date(2021, 12, 1)).unwrap_err();
    assert!(matches!(err, ChartError::InvalidZoomRange { .. }));
    assert_eq!(ctl.state().zoom_domain(), Some(z));
}

#[test]
fn drag_past_the_plot_edges_is_clamped() {
    let mut ctl = timeline();
    let full = ctl.state().full_extent();
    ctl.zoom_button();
    ctl.brush_start(-50.0);
    ctl.brush_move(5000.0);
    assert!(ctl.brush_end());
    assert_eq!(ctl.state().zoom_domain(), full);
}
