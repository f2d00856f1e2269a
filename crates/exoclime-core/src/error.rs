//! Error taxonomy for the circulation core.

use thiserror::Error;

/// Errors surfaced by grid construction, the circulation engine, and record parsing.
///
/// None of these are recovered from inside the crate; they pass straight to the caller.
#[derive(Debug, Error)]
pub enum CirculationError {
    /// Topography grid does not match the `(height, width)` fixed at engine construction.
    #[error("topography shape {}×{} does not match engine shape {}×{}", .found.0, .found.1, .expected.0, .expected.1)]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// An engine or grid was requested with a zero dimension.
    #[error("grid dimensions must be non-zero, got {height}×{width}")]
    EmptyGrid { height: usize, width: usize },

    /// A row-major data vector whose length is not `height × width`.
    #[error("grid data length {len} does not match {height}×{width}")]
    GridLength {
        height: usize,
        width: usize,
        len: usize,
    },

    /// A report whose wind components do not cover its topography grid.
    #[error("report wind shape {}×{} does not match topography shape {}×{}", .wind.0, .wind.1, .topography.0, .topography.1)]
    ReportShape {
        topography: (usize, usize),
        wind: (usize, usize),
    },

    /// Catalog record or report JSON could not be parsed.
    #[error("invalid record: {0}")]
    Record(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CirculationError>;
