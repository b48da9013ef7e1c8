// File: crates/slides-core/src/lib.rs
// Summary: Core library entry point; chart state, scene projection, interaction and loading.

pub mod annotation;
pub mod axis;
pub mod color;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod loader;
pub mod render;
pub mod scale;
pub mod scene;
pub mod slide;
pub mod state;
pub mod surface;
pub mod svg;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use annotation::{AnnotationRule, Callout};
pub use axis::Axis;
pub use color::Rgba;
pub use config::{SeriesMark, SeriesSpec, SlideConfig, SlideLayout};
pub use controller::{InteractionController, ZoomMode};
pub use data::{Row, SlideData, TimeSample, TimeSeries, TimeWindow, YearSeries, YearTable};
pub use error::{ChartError, LoadError};
pub use geometry::{Point, RectF};
pub use loader::{DataSource, FileSource, TimeColumns};
pub use render::ChartRenderer;
pub use scene::{Mark, Scene};
pub use slide::{Slide, SlidePhase};
pub use state::ChartState;
pub use surface::{paint, Overlay, RenderSurface};
pub use svg::SvgSurface;
pub use theme::Theme;
pub use tooltip::Tooltip;
