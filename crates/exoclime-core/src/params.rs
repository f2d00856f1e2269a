//! Caller-supplied inputs: the planetary record and the engine grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Grid shape of the reference configuration.
pub const DEFAULT_HEIGHT: usize = 512;
pub const DEFAULT_WIDTH: usize = 1024;

/// Stellar/orbital parameters from the cleaned catalog record.
///
/// Field names follow the catalog columns (`st_lum`, `pl_orbper`, `pl_name`), so a
/// record deserialises directly; absent or `null` fields stay `None` and any other
/// columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryParameters {
    #[serde(rename = "pl_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// log10 of stellar luminosity relative to the Sun.
    #[serde(rename = "st_lum", default)]
    pub stellar_log_luminosity: Option<f64>,
    /// Orbital period in days. Treated as the rotation period (tidal locking).
    #[serde(rename = "pl_orbper", default)]
    pub orbital_period_days: Option<f64>,
}

impl PlanetaryParameters {
    pub fn new(stellar_log_luminosity: Option<f64>, orbital_period_days: Option<f64>) -> Self {
        Self { name: None, stellar_log_luminosity, orbital_period_days }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse a single catalog record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Construction-time grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub height: usize,
    pub width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { height: DEFAULT_HEIGHT, width: DEFAULT_WIDTH }
    }
}
