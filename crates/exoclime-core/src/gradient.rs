//! Finite-difference elevation gradient used for orographic deflection.
//!
//! Unit grid spacing, no wraparound:
//! ```text
//!   interior:   d[i] = (z[i+1] − z[i−1]) / 2
//!   first cell: d[0] =  z[1] − z[0]
//!   last cell:  d[n] =  z[n] − z[n−1]
//! ```
//! An axis of length 1 has zero gradient.

#[cfg(feature = "threading")]
use rayon::prelude::*;

use crate::grid::ScalarGrid;

/// Elevation change per cell along both grid axes.
pub struct TopographicGradient {
    /// d(elevation)/d(row): positive where terrain rises northward.
    pub north_south: ScalarGrid,
    /// d(elevation)/d(col): positive where terrain rises eastward.
    pub east_west: ScalarGrid,
}

/// Difference of `at(i)` along an axis of length `n` at index `i`.
#[inline]
fn axis_diff(n: usize, i: usize, at: impl Fn(usize) -> f64) -> f64 {
    if n < 2 {
        0.0
    } else if i == 0 {
        at(1) - at(0)
    } else if i == n - 1 {
        at(n - 1) - at(n - 2)
    } else {
        (at(i + 1) - at(i - 1)) / 2.0
    }
}

fn fill_row(grid: &ScalarGrid, r: usize, ns_row: &mut [f32], ew_row: &mut [f32]) {
    let (h, w) = grid.shape();
    for c in 0..w {
        ns_row[c] = axis_diff(h, r, |i| grid.get(i, c) as f64) as f32;
        ew_row[c] = axis_diff(w, c, |j| grid.get(r, j) as f64) as f32;
    }
}

/// Compute the row-axis and column-axis gradients of `grid`.
pub fn topographic_gradient(grid: &ScalarGrid) -> TopographicGradient {
    let (h, w) = grid.shape();
    let mut north_south = ScalarGrid::flat(h, w);
    let mut east_west = ScalarGrid::flat(h, w);
    if w == 0 {
        return TopographicGradient { north_south, east_west };
    }

    #[cfg(feature = "threading")]
    north_south
        .data
        .par_chunks_mut(w)
        .zip(east_west.data.par_chunks_mut(w))
        .enumerate()
        .for_each(|(r, (ns, ew))| fill_row(grid, r, ns, ew));

    #[cfg(not(feature = "threading"))]
    north_south
        .data
        .chunks_mut(w)
        .zip(east_west.data.chunks_mut(w))
        .enumerate()
        .for_each(|(r, (ns, ew))| fill_row(grid, r, ns, ew));

    TopographicGradient { north_south, east_west }
}
