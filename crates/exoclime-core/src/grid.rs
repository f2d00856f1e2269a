use serde::{Deserialize, Serialize};

use crate::error::{CirculationError, Result};

/// A 2D scalar grid stored as f32, row-major.
/// Shapes are always written `(height, width)`; row 0 is the southernmost row.
/// Per-cell math is done in f64 and stored as f32.
/// Deserialisation goes through [`ScalarGrid::from_vec`], so a grid read from
/// JSON always holds exactly `height × width` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct ScalarGrid {
    /// Row-major values, length = `height × width`.
    pub data: Vec<f32>,
    pub height: usize,
    pub width: usize,
}

/// Unchecked wire form of [`ScalarGrid`].
#[derive(Deserialize)]
struct RawGrid {
    data: Vec<f32>,
    height: usize,
    width: usize,
}

impl TryFrom<RawGrid> for ScalarGrid {
    type Error = CirculationError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        ScalarGrid::from_vec(raw.height, raw.width, raw.data)
    }
}

/// Normalised elevation in [0, 1], as handed over by the topography stage.
pub type TopographyGrid = ScalarGrid;

impl ScalarGrid {
    /// Create a new grid filled with the given value.
    pub fn new(height: usize, width: usize, fill: f32) -> Self {
        Self {
            data: vec![fill; height * width],
            height,
            width,
        }
    }

    /// Create an all-zero grid.
    pub fn flat(height: usize, width: usize) -> Self {
        Self::new(height, width, 0.0)
    }

    /// Wrap an existing row-major vector. Fails if its length is not `height × width`.
    pub fn from_vec(height: usize, width: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != height * width {
            return Err(CirculationError::GridLength { height, width, len: data.len() });
        }
        Ok(Self { data, height, width })
    }

    /// Build a grid by evaluating `f(row, col)` at every cell.
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(height * width);
        for r in 0..height {
            for c in 0..width {
                data.push(f(r, c));
            }
        }
        Self { data, height, width }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: f32) {
        self.data[row * self.width + col] = val;
    }

    /// Borrow one row as a slice.
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Min–max rescale to [0, 1]. A constant grid maps to all zeros.
    pub fn normalized(&self) -> Self {
        let lo = self.min_value() as f64;
        let range = self.max_value() as f64 - lo;
        let data = if range > 0.0 {
            self.data.iter().map(|&v| ((v as f64 - lo) / range) as f32).collect()
        } else {
            vec![0.0; self.data.len()]
        };
        Self { data, height: self.height, width: self.width }
    }
}
