// File: crates/slides-demo/src/main.rs
// Summary: Demo loads a slide's CSV tables, applies scripted interactions, and writes SVG/PNG/JSON output.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use slides_core::config::{self, SlideConfig};
use slides_core::loader::parse_timestamp;
use slides_core::{FileSource, RenderSurface, Slide, SvgSurface};
use slides_render_skia::{RasterOptions, SkiaSurface};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Png,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Png => "png",
            Format::Json => "json",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "slides-demo", version, about = "Render workout chart slides")]
struct Cli {
    /// Directory holding the slide CSV files
    #[arg(long, default_value = "crates/slides-demo/data")]
    data_dir: PathBuf,

    /// Slide preset id (breakdown, heart-rate, walking-running); all presets when omitted
    #[arg(long)]
    slide: Option<String>,

    /// JSON slide configuration, used instead of a preset
    #[arg(long, conflicts_with = "slide")]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "target/slides")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Theme override (light, dark)
    #[arg(long)]
    theme: Option<String>,

    /// Legend entries to switch off before rendering (repeatable)
    #[arg(long)]
    disable: Vec<String>,

    /// Zoom window as START..END (RFC 3339 timestamps or plain dates)
    #[arg(long, value_parser = parse_window)]
    zoom: Option<(DateTime<Utc>, DateTime<Utc>)>,

    #[arg(long)]
    hide_annotations: bool,

    /// Skip glyph rendering in PNG output
    #[arg(long)]
    no_labels: bool,
}

fn parse_window(s: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), String> {
    let (a, b) = s.split_once("..").ok_or_else(|| format!("expected START..END, got '{s}'"))?;
    let start = parse_timestamp(a.trim()).ok_or_else(|| format!("bad start timestamp '{a}'"))?;
    let end = parse_timestamp(b.trim()).ok_or_else(|| format!("bad end timestamp '{b}'"))?;
    Ok((start, end))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    let cli = Cli::parse();
    let configs = select_configs(&cli)?;
    let source = FileSource::new(&cli.data_dir);
    info!(data_dir = %cli.data_dir.display(), slides = configs.len(), "rendering");

    let mut failed = Vec::new();
    for mut cfg in configs {
        if let Some(theme) = &cli.theme {
            cfg.theme = theme.clone();
        }
        let out = cli.out.join(format!("{}.{}", cfg.id, cli.format.extension()));
        if let Some(message) = render_one(&cli, cfg.clone(), &source, &out)? {
            failed.push(format!("{}: {message}", cfg.id));
        }
        if out.exists() {
            println!("Wrote {}", out.display());
        }
    }

    if !failed.is_empty() {
        bail!("{} slide(s) failed to load: {}", failed.len(), failed.join("; "));
    }
    Ok(())
}

fn select_configs(cli: &Cli) -> Result<Vec<SlideConfig>> {
    if let Some(path) = &cli.config {
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read config '{}'", path.display()))?;
        let cfg = SlideConfig::from_json(&text).with_context(|| format!("invalid config '{}'", path.display()))?;
        return Ok(vec![cfg]);
    }
    match &cli.slide {
        Some(id) => {
            let cfg = config::find(id).ok_or_else(|| {
                let known: Vec<String> = config::presets().into_iter().map(|c| c.id).collect();
                anyhow!("unknown slide '{id}' (known: {})", known.join(", "))
            })?;
            Ok(vec![cfg])
        }
        None => Ok(config::presets()),
    }
}

/// Activate one slide, replay the scripted interactions and write the output.
/// Returns the failure message when the slide's data could not be loaded.
fn render_one(cli: &Cli, cfg: SlideConfig, source: &FileSource, out: &Path) -> Result<Option<String>> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let theme = cfg.theme();
    match cli.format {
        Format::Svg => {
            let slide = drive(cli, Slide::activate(cfg.clone(), source, SvgSurface::new(cfg.width, cfg.height, theme)))?;
            slide.surface().write_to(out).with_context(|| format!("failed to write '{}'", out.display()))?;
            Ok(slide.failure().map(str::to_string))
        }
        Format::Png => {
            let opts = RasterOptions { width: cfg.width, height: cfg.height, draw_labels: !cli.no_labels };
            let surface = SkiaSurface::new(&opts, theme)?;
            let mut slide = drive(cli, Slide::activate(cfg, source, surface))?;
            slide.surface_mut().save_png(out)?;
            Ok(slide.failure().map(str::to_string))
        }
        Format::Json => {
            let slide = drive(cli, Slide::activate(cfg.clone(), source, SvgSurface::new(cfg.width, cfg.height, theme)))?;
            let Some(ctl) = slide.controller() else {
                return Ok(slide.failure().map(str::to_string));
            };
            std::fs::write(out, ctl.scene().to_json()?).with_context(|| format!("failed to write '{}'", out.display()))?;
            Ok(None)
        }
    }
}

fn drive<S: RenderSurface>(cli: &Cli, mut slide: Slide<S>) -> Result<Slide<S>> {
    let id = slide.id().to_string();
    if slide.controller().is_none() {
        warn!(slide = %id, "slide failed to load; writing message only");
        return Ok(slide);
    }
    if let Some(ctl) = slide.controller_mut() {
        for key in &cli.disable {
            if !ctl.state().categories().iter().any(|c| c == key) {
                warn!(slide = %id, category = %key, "not on this slide; skipped");
                continue;
            }
            ctl.legend_click(key).with_context(|| format!("cannot disable '{key}' on slide '{id}'"))?;
        }
        if let Some((start, end)) = cli.zoom {
            // breakdown slides have no time axis; a window off the data is dropped too
            if let Err(e) = ctl.zoom_to(start, end) {
                warn!(slide = %id, error = %e, "zoom ignored");
            }
        }
        if cli.hide_annotations && ctl.state().annotations_visible() {
            ctl.annotation_button();
        }
    }
    Ok(slide)
}
