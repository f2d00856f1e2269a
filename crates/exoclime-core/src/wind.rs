use serde::{Deserialize, Serialize};

use crate::grid::ScalarGrid;

/// Near-surface wind vectors, one per topography cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindField {
    /// Zonal component, positive eastward.
    pub u: ScalarGrid,
    /// Meridional component, positive northward.
    pub v: ScalarGrid,
}

/// Aggregate statistics over a wind field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSummary {
    pub mean_u: f64,
    pub mean_v: f64,
    pub mean_speed: f64,
    pub max_speed: f64,
}

impl WindField {
    pub fn shape(&self) -> (usize, usize) {
        self.u.shape()
    }

    /// Vector magnitude at `(row, col)`.
    pub fn speed(&self, row: usize, col: usize) -> f64 {
        let u = self.u.get(row, col) as f64;
        let v = self.v.get(row, col) as f64;
        u.hypot(v)
    }

    /// Bearing the wind blows towards, degrees clockwise from north in [0, 360).
    /// Calm cells report 0°.
    pub fn direction_deg(&self, row: usize, col: usize) -> f64 {
        let u = self.u.get(row, col) as f64;
        let v = self.v.get(row, col) as f64;
        if u == 0.0 && v == 0.0 {
            return 0.0;
        }
        u.atan2(v).to_degrees().rem_euclid(360.0)
    }

    pub fn summary(&self) -> WindSummary {
        let n = self.u.data.len();
        if n == 0 {
            return WindSummary { mean_u: 0.0, mean_v: 0.0, mean_speed: 0.0, max_speed: 0.0 };
        }
        let (mut su, mut sv, mut ss, mut max) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        for (&u, &v) in self.u.data.iter().zip(&self.v.data) {
            let (u, v) = (u as f64, v as f64);
            let s = u.hypot(v);
            su += u;
            sv += v;
            ss += s;
            max = max.max(s);
        }
        let n = n as f64;
        WindSummary { mean_u: su / n, mean_v: sv / n, mean_speed: ss / n, max_speed: max }
    }
}
