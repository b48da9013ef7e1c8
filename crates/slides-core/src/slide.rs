// File: crates/slides-core/src/slide.rs
// Summary: Slide lifecycle: clear, load behind a loading indicator, then interact or show the failure.

use tracing::{error, info};

use crate::config::SlideConfig;
use crate::controller::InteractionController;
use crate::error::ChartError;
use crate::loader::DataSource;
use crate::render::ChartRenderer;
use crate::surface::RenderSurface;

pub enum SlidePhase<S: RenderSurface> {
    Ready(InteractionController<S>),
    /// Load failed; the surface shows `message` and no chart.
    Failed { message: String, error: ChartError, surface: S },
}

/// One activation of a slide. State and surface content live until [`Slide::teardown`].
pub struct Slide<S: RenderSurface> {
    id: String,
    phase: SlidePhase<S>,
}

impl<S: RenderSurface> Slide<S> {
    /// Clear `surface`, load every table through `source`, and paint the first frame.
    /// The renderer never runs before the load has finished.
    pub fn activate(config: SlideConfig, source: &dyn DataSource, mut surface: S) -> Self {
        surface.clear();
        surface.set_loading(true);
        let loaded = source.load(&config);
        surface.set_loading(false);

        let id = config.id.clone();
        let phase = match loaded {
            Ok(data) => {
                info!(slide = %id, "slide ready");
                SlidePhase::Ready(InteractionController::new(ChartRenderer::new(config), data, surface))
            }
            Err(err) => {
                error!(slide = %id, error = %err, "failed to load slide data");
                surface.show_message(&config.failure_message);
                SlidePhase::Failed { message: config.failure_message, error: err, surface }
            }
        };
        Self { id, phase }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn phase(&self) -> &SlidePhase<S> { &self.phase }

    pub fn controller(&self) -> Option<&InteractionController<S>> {
        match &self.phase {
            SlidePhase::Ready(c) => Some(c),
            SlidePhase::Failed { .. } => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut InteractionController<S>> {
        match &mut self.phase {
            SlidePhase::Ready(c) => Some(c),
            SlidePhase::Failed { .. } => None,
        }
    }

    /// The user-visible failure message, if loading failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            SlidePhase::Failed { message, .. } => Some(message.as_str()),
            SlidePhase::Ready(_) => None,
        }
    }

    pub fn surface(&self) -> &S {
        match &self.phase {
            SlidePhase::Ready(c) => c.surface(),
            SlidePhase::Failed { surface, .. } => surface,
        }
    }

    pub fn surface_mut(&mut self) -> &mut S {
        match &mut self.phase {
            SlidePhase::Ready(c) => c.surface_mut(),
            SlidePhase::Failed { surface, .. } => surface,
        }
    }

    /// Remove every mark and hand the surface back for the next activation.
    pub fn teardown(self) -> S {
        let mut surface = match self.phase {
            SlidePhase::Ready(c) => c.into_surface(),
            SlidePhase::Failed { surface, .. } => surface,
        };
        surface.clear();
        surface.set_loading(false);
        surface
    }
}
