//! Serialisable hand-off record for downstream rendering.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationCoefficients;
use crate::engine::CirculationEngine;
use crate::error::{CirculationError, Result};
use crate::grid::TopographyGrid;
use crate::params::PlanetaryParameters;
use crate::wind::{WindField, WindSummary};

/// Everything a renderer needs: the relief, the wind field and how it was forced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculationReport {
    pub planet_name: Option<String>,
    pub coefficients: CalibrationCoefficients,
    pub global_force: f64,
    pub topography: TopographyGrid,
    pub wind: WindField,
    pub summary: WindSummary,
}

impl CirculationReport {
    /// Run `engine` on `topography` and package the result.
    pub fn build(
        engine: &CirculationEngine,
        params: &PlanetaryParameters,
        topography: TopographyGrid,
    ) -> Result<Self> {
        let wind = engine.compute(&topography)?;
        let summary = wind.summary();
        Ok(Self {
            planet_name: params.name.clone(),
            coefficients: engine.coefficients(),
            global_force: engine.global_force(),
            topography,
            wind,
            summary,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a report, rejecting one whose U or V grid is not the topography's shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let report: Self = serde_json::from_str(json)?;
        let topography = report.topography.shape();
        for wind in [report.wind.u.shape(), report.wind.v.shape()] {
            if wind != topography {
                return Err(CirculationError::ReportShape { topography, wind });
            }
        }
        Ok(report)
    }
}
