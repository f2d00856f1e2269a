//! Planet-specific forcing coefficients.
//!
//! Two scalars drive the whole circulation pass:
//!   - thermal intensity  = sqrt(L) · 3, with L = 10^st_lum (1.0 when unknown,
//!     st_lum clamped to ±60)
//!   - Coriolis factor    = 1 / sqrt(max(P, 0.1)), with P = orbital period in days
//!
//! Luminosity enters as a square root to damp the spread between M dwarfs and
//! bright hosts; the period clamp keeps near-zero periods finite.

use serde::{Deserialize, Serialize};

use crate::params::PlanetaryParameters;

/// Luminosity used when the record carries none.
pub const BASELINE_LUMINOSITY: f64 = 1.0;
/// Orbital period used when the record carries none, in days.
pub const BASELINE_PERIOD_DAYS: f64 = 1.0;
/// Shortest period the Coriolis factor responds to, in days.
pub const MIN_PERIOD_DAYS: f64 = 0.1;
/// Bound on |log10 luminosity|. Keeps the thermal intensity finite and
/// non-zero, and the resulting wind components representable as f32.
pub const MAX_ABS_LOG_LUMINOSITY: f64 = 60.0;
/// Wind-speed scale applied to sqrt(luminosity).
pub const THERMAL_SCALE: f64 = 3.0;

/// Forcing pair computed once per planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCoefficients {
    pub thermal_intensity: f64,
    pub coriolis_factor: f64,
}

impl CalibrationCoefficients {
    /// Single scalar combining stellar heating and rotation.
    #[inline]
    pub fn global_force(&self) -> f64 {
        self.thermal_intensity * self.coriolis_factor
    }
}

/// Maps a sparse planetary record onto [`CalibrationCoefficients`].
pub struct CalibrationModel;

impl CalibrationModel {
    /// Total over its input: missing or non-finite fields fall back to the baselines.
    pub fn calibrate(params: &PlanetaryParameters) -> CalibrationCoefficients {
        CalibrationCoefficients {
            thermal_intensity: thermal_intensity(params.stellar_log_luminosity),
            coriolis_factor: coriolis_factor(params.orbital_period_days),
        }
    }
}

/// `sqrt(10^log_lum) · 3`, with `log_lum` clamped to ±[`MAX_ABS_LOG_LUMINOSITY`].
pub fn thermal_intensity(log_luminosity: Option<f64>) -> f64 {
    let luminosity = log_luminosity
        .filter(|l| l.is_finite())
        .map_or(BASELINE_LUMINOSITY, |l| {
            10f64.powf(l.clamp(-MAX_ABS_LOG_LUMINOSITY, MAX_ABS_LOG_LUMINOSITY))
        });
    luminosity.sqrt() * THERMAL_SCALE
}

/// `1 / sqrt(max(period, 0.1))`.
pub fn coriolis_factor(period_days: Option<f64>) -> f64 {
    let period = period_days
        .filter(|p| p.is_finite())
        .unwrap_or(BASELINE_PERIOD_DAYS);
    1.0 / period.max(MIN_PERIOD_DAYS).sqrt()
}
