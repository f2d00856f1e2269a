//! Row → latitude mapping for the equirectangular wind grid.
//!
//! Row 0 is the south pole (−90°), the last row the north pole (+90°), spaced
//! evenly with both poles included. Latitude depends on the row only, so every
//! generator here returns a grid that is constant along each row.
//!
//! The engine works from [`row_latitudes`]; the `*_grid` functions are the
//! per-cell view for callers that want latitude aligned with a wind field,
//! such as renderers and exporters.

use crate::grid::ScalarGrid;

/// Latitude of `row` in degrees for a grid with `height` rows.
///
/// Computed as `180·row/(H−1) − 90` so the poles and, for odd heights, the
/// equator row come out exact. A single-row grid sits at −90°.
pub fn row_latitude_deg(row: usize, height: usize) -> f64 {
    if height < 2 {
        return -90.0;
    }
    (180.0 * row as f64) / (height - 1) as f64 - 90.0
}

/// −1 south of the equator, +1 north of it, 0 exactly on it.
pub fn hemisphere_sign(lat_deg: f64) -> f64 {
    if lat_deg > 0.0 {
        1.0
    } else if lat_deg < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Per-row latitudes, length = `height`.
pub fn row_latitudes(height: usize) -> Vec<f64> {
    (0..height).map(|r| row_latitude_deg(r, height)).collect()
}

/// Signed latitude in degrees, shape `(height, width)`.
pub fn latitude_grid(height: usize, width: usize) -> ScalarGrid {
    ScalarGrid::from_fn(height, width, |r, _| row_latitude_deg(r, height) as f32)
}

/// |latitude| in degrees, shape `(height, width)`.
pub fn abs_latitude_grid(height: usize, width: usize) -> ScalarGrid {
    ScalarGrid::from_fn(height, width, |r, _| row_latitude_deg(r, height).abs() as f32)
}

/// Hemisphere sign (−1, 0, +1), shape `(height, width)`.
pub fn hemisphere_sign_grid(height: usize, width: usize) -> ScalarGrid {
    ScalarGrid::from_fn(height, width, |r, _| hemisphere_sign(row_latitude_deg(r, height)) as f32)
}
