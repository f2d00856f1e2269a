//! Stand-ins for the upstream catalog and topography stages.
//!
//! Used by the harness and tests to drive the engine without the real pipeline.
//! Every topography returned here is min–max normalised to [0, 1].

use noise::{NoiseFn, Perlin};

use crate::grid::{ScalarGrid, TopographyGrid};
use crate::params::PlanetaryParameters;

/// Spread of the volcano peak, in squared pixels.
const VOLCANO_SPREAD: f64 = 15_000.0;

/// fBm settings for [`fractal_topography`].
const FRACTAL_OCTAVES: u32 = 6;
const FRACTAL_PERSISTENCE: f64 = 0.5;
const FRACTAL_LACUNARITY: f64 = 2.0;
/// Feature size in pixels of the lowest octave.
const FRACTAL_SCALE: f64 = 50.0;

/// TRAPPIST-1 e: a late M-dwarf host and a 6.1-day orbit.
pub fn trappist_1e() -> PlanetaryParameters {
    PlanetaryParameters::new(Some(-2.28), Some(6.1)).with_name("TRAPPIST-1 e")
}

pub fn flat_topography(height: usize, width: usize) -> TopographyGrid {
    ScalarGrid::flat(height, width)
}

/// One Gaussian peak centred on the grid.
pub fn volcano_topography(height: usize, width: usize) -> TopographyGrid {
    let (cx, cy) = ((width / 2) as f64, (height / 2) as f64);
    ScalarGrid::from_fn(height, width, |r, c| {
        let dx = c as f64 - cx;
        let dy = r as f64 - cy;
        (-(dx * dx + dy * dy) / VOLCANO_SPREAD).exp() as f32
    })
    .normalized()
}

/// Perlin fBm relief, deterministic for a given `seed`.
pub fn fractal_topography(height: usize, width: usize, seed: u32) -> TopographyGrid {
    let perlin = Perlin::new(seed);
    ScalarGrid::from_fn(height, width, |r, c| {
        let (x, y) = (c as f64 / FRACTAL_SCALE, r as f64 / FRACTAL_SCALE);
        let mut value = 0.0f64;
        let mut amp = 1.0f64;
        let mut freq = 1.0f64;
        for _ in 0..FRACTAL_OCTAVES {
            value += amp * perlin.get([x * freq, y * freq]);
            amp *= FRACTAL_PERSISTENCE;
            freq *= FRACTAL_LACUNARITY;
        }
        value as f32
    })
    .normalized()
}
