// File: crates/slides-core/src/error.rs
// Summary: Error taxonomy for loading slide data and validating state transitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by the slide model.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A required table failed to open or parse. Terminal for the activation.
    #[error("failed to load '{}': {source}", path.display())]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
    /// A toggle named a category absent from the loaded key set.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    /// A zoom window was inverted or fell entirely outside the data extent.
    #[error("invalid zoom range {start} .. {end}")]
    InvalidZoomRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Per-table cause of a [`ChartError::LoadFailure`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: cannot parse '{value}' in column '{column}'")]
    BadValue {
        row: usize,
        column: String,
        value: String,
    },
}

impl LoadError {
    /// Attach the offending file path.
    pub fn at(self, path: impl Into<PathBuf>) -> ChartError {
        ChartError::LoadFailure { path: path.into(), source: self }
    }
}
