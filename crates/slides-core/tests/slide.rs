// File: crates/slides-core/tests/slide.rs
// Purpose: Slide activation, load failure handling and teardown.

use std::path::PathBuf;

use slides_core::{FileSource, Mark, SlideConfig, Slide, SvgSurface, Theme};

fn surface(cfg: &SlideConfig) -> SvgSurface {
    SvgSurface::new(cfg.width, cfg.height, Theme::light())
}

#[test]
fn failed_load_shows_message_and_no_chart() {
    let cfg = SlideConfig::heart_rate();
    let source = FileSource::new("target/test_out/does_not_exist");
    let slide = Slide::activate(cfg.clone(), &source, surface(&cfg));
    assert!(slide.controller().is_none());
    assert_eq!(slide.failure(), Some("Failed to load heart rate data."));
    let body = slide.surface().body();
    assert!(body.contains("Failed to load heart rate data."));
    assert!(!body.contains("<circle"));
    assert!(!slide.surface().is_loading());
}

#[test]
fn successful_load_paints_and_teardown_clears() {
    let dir = PathBuf::from("target/test_out/slide_breakdown");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("breakout_by_workout_type.csv"), "workoutActivityType,count\nWalking,120\nRunning,80\n").unwrap();
    std::fs::write(dir.join("activity_summary_by_year.csv"), "year,Walking,Running\n2020,70,30\n2021,50,50\n").unwrap();

    let cfg = SlideConfig::breakdown();
    let slide = Slide::activate(cfg.clone(), &FileSource::new(&dir), surface(&cfg));
    let ctl = slide.controller().expect("slide should be ready");
    let arcs = ctl.scene().marks.iter().filter(|m| matches!(m, Mark::Arc { .. })).count();
    assert_eq!(arcs, 2);
    assert!(slide.surface().body().contains(r#"class="arc""#));

    let surface = slide.teardown();
    assert!(surface.body().is_empty());
}
