// File: crates/slides-core/src/state.rs
// First-class view state: disabled categories, zoom window, annotation visibility.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::data::{SlideData, TimeWindow};
use crate::error::ChartError;

/// Minimal state needed to reproduce the current rendering from the loaded data.
///
/// Mutated only through the named transitions below. `disabled` is always a
/// subset of `categories`, and `zoom` is always inside `full_extent`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartState {
    categories: Vec<String>,
    full_extent: Option<TimeWindow>,
    disabled: BTreeSet<String>,
    zoom: Option<TimeWindow>,
    annotations_visible: bool,
}

impl ChartState {
    /// Defaults for a fresh activation: nothing disabled, no zoom, annotations shown.
    pub fn new(categories: Vec<String>, full_extent: Option<TimeWindow>) -> Self {
        Self {
            categories,
            full_extent,
            disabled: BTreeSet::new(),
            zoom: None,
            annotations_visible: true,
        }
    }

    pub fn from_data(data: &SlideData) -> Self {
        Self::new(data.categories(), data.time_extent())
    }

    /// Known category keys, in load order.
    pub fn categories(&self) -> &[String] { &self.categories }
    pub fn disabled_categories(&self) -> &BTreeSet<String> { &self.disabled }
    pub fn zoom_domain(&self) -> Option<TimeWindow> { self.zoom }
    pub fn full_extent(&self) -> Option<TimeWindow> { self.full_extent }
    pub fn annotations_visible(&self) -> bool { self.annotations_visible }

    pub fn is_enabled(&self, category: &str) -> bool {
        !self.disabled.contains(category)
    }

    /// Enabled categories in load order.
    pub fn enabled_categories(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).filter(|c| self.is_enabled(c)).collect()
    }

    /// Active time window: the zoom if set, else the full extent.
    pub fn visible_domain(&self) -> Option<TimeWindow> {
        self.zoom.or(self.full_extent)
    }

    /// Flip membership of `name` in the disabled set.
    pub fn toggle_category(&mut self, name: &str) -> Result<(), ChartError> {
        if !self.categories.iter().any(|c| c == name) {
            return Err(ChartError::UnknownCategory(name.to_string()));
        }
        if !self.disabled.remove(name) {
            self.disabled.insert(name.to_string());
        }
        debug!(category = name, enabled = self.is_enabled(name), "toggled category");
        Ok(())
    }

    /// Replace the zoom window.
    ///
    /// Rejects `start > end`, windows that do not touch the data extent and
    /// windows that only share one instant with it, leaving the current zoom
    /// untouched. A window that overhangs the extent
    /// is stored as its overlap with it.
    pub fn set_zoom(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ChartError> {
        let invalid = || ChartError::InvalidZoomRange { start, end };
        if start > end {
            return Err(invalid());
        }
        let full = self.full_extent.ok_or_else(invalid)?;
        let window = TimeWindow::new(start, end).intersect(&full).ok_or_else(invalid)?;
        // touching the extent at a single instant collapses the axis
        if window.start == window.end && start != end {
            return Err(invalid());
        }
        debug!(start = %window.start, end = %window.end, "zoom set");
        self.zoom = Some(window);
        Ok(())
    }

    /// Back to the full extent. Idempotent.
    pub fn clear_zoom(&mut self) {
        if self.zoom.take().is_some() {
            debug!("zoom cleared");
        }
    }

    pub fn toggle_annotations(&mut self) {
        self.annotations_visible = !self.annotations_visible;
    }

    pub fn set_annotations(&mut self, visible: bool) {
        self.annotations_visible = visible;
    }
}
