// File: crates/slides-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot of the heart-rate slide with bless flow.
// Behavior:
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if the snapshot exists, compares decoded pixels for an exact match.
// - Else, logs a note and returns without failing.

use chrono::{TimeZone, Utc};
use slides_core::{ChartRenderer, InteractionController, SlideConfig, SlideData, Theme, TimeSample, TimeSeries};
use slides_render_skia::{RasterOptions, SkiaSurface};

fn render_bytes() -> Vec<u8> {
    let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2021, 10, d, h, 0, 0).unwrap();
    let heart = (1..=10u32)
        .flat_map(|d| (0..4u32).map(move |q| (d, q)))
        .map(|(d, q)| TimeSample::new(day(d, q * 6), 60.0 + ((d * 7 + q * 13) % 40) as f64))
        .collect();
    let resting = [62.0, 64.0, 71.0, 74.0, 68.0, 63.0, 61.0, 72.0, 66.0, 65.0]
        .iter()
        .enumerate()
        .map(|(i, &v)| TimeSample::new(day(i as u32 + 1, 0), v))
        .collect();
    let data = SlideData::Timeline {
        series: vec![TimeSeries::new("Heart Rate", heart), TimeSeries::new("Resting Heart Rate", resting)],
    };

    let cfg = SlideConfig::heart_rate();
    let opts = RasterOptions { width: cfg.width, height: cfg.height, draw_labels: false };
    let surface = SkiaSurface::new(&opts, Theme::light()).expect("raster surface");
    let mut ctl = InteractionController::new(ChartRenderer::new(cfg), data, surface);
    ctl.surface_mut().encode_png().expect("encode")
}

#[test]
fn golden_heart_rate_slide() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("heart_rate.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
