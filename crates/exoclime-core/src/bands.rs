//! Three-cell circulation bands and their base winds.
//!
//! Bands partition |latitude| ∈ [0, 90] into half-open intervals, closed only at 90°:
//!
//! | Band   | |lat| (°) | U (zonal)   | V (meridional)       |
//! |--------|-----------|-------------|----------------------|
//! | Hadley | [0, 30)   | −F          | −s · F · 0.3         |
//! | Ferrel | [30, 60)  | +F · 0.8    | +s · F · 0.2         |
//! | Polar  | [60, 90]  | −F · 0.6    | −s · F · 0.4         |
//!
//! `F` is the global force, `s` the hemisphere sign. Hadley and polar cells give
//! easterlies with equatorward drift; the Ferrel cell gives westerlies with
//! poleward drift.

use serde::{Deserialize, Serialize};

/// Upper (exclusive) edge of the Hadley cell.
pub const HADLEY_LIMIT_DEG: f64 = 30.0;
/// Upper (exclusive) edge of the Ferrel cell.
pub const FERREL_LIMIT_DEG: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CirculationBand {
    Hadley,
    Ferrel,
    Polar,
}

impl CirculationBand {
    pub const ALL: [CirculationBand; 3] = [Self::Hadley, Self::Ferrel, Self::Polar];

    /// Band containing `abs_lat_deg`. Anything at or beyond 60° is polar.
    pub fn from_abs_latitude(abs_lat_deg: f64) -> Self {
        if abs_lat_deg < HADLEY_LIMIT_DEG {
            Self::Hadley
        } else if abs_lat_deg < FERREL_LIMIT_DEG {
            Self::Ferrel
        } else {
            Self::Polar
        }
    }

    /// `(lower, upper)` bounds in degrees of |latitude|.
    pub fn latitude_range(self) -> (f64, f64) {
        match self {
            Self::Hadley => (0.0, HADLEY_LIMIT_DEG),
            Self::Ferrel => (HADLEY_LIMIT_DEG, FERREL_LIMIT_DEG),
            Self::Polar  => (FERREL_LIMIT_DEG, 90.0),
        }
    }

    /// True if `abs_lat_deg` falls in this band's interval.
    pub fn contains(self, abs_lat_deg: f64) -> bool {
        let (lo, hi) = self.latitude_range();
        match self {
            Self::Polar => (lo..=hi).contains(&abs_lat_deg),
            _ => (lo..hi).contains(&abs_lat_deg),
        }
    }

    /// `(zonal, meridional)` multipliers applied to the global force.
    /// The meridional one is for the northern hemisphere (sign = +1).
    pub fn multipliers(self) -> (f64, f64) {
        match self {
            Self::Hadley => (-1.0, -0.3),
            Self::Ferrel => ( 0.8,  0.2),
            Self::Polar  => (-0.6, -0.4),
        }
    }

    /// Base `(u, v)` for this band.
    pub fn base_wind(self, hemisphere_sign: f64, global_force: f64) -> (f64, f64) {
        let (ku, kv) = self.multipliers();
        (global_force * ku, hemisphere_sign * global_force * kv)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hadley => "hadley",
            Self::Ferrel => "ferrel",
            Self::Polar  => "polar",
        }
    }
}
