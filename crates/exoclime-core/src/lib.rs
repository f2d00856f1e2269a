//! Near-surface wind fields for exoplanet surface maps.
//!
//! A [`CalibrationModel`] turns stellar luminosity and orbital period into two
//! forcing coefficients; a [`CirculationEngine`] combines them with a
//! three-cell latitude band model and the topography gradient to produce a
//! zonal/meridional [`WindField`] on the same grid as the relief.
//!
//! The crate does no I/O and installs no logger. Progress goes through an
//! injected [`CirculationObserver`].

pub mod bands;
pub mod calibration;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod grid;
pub mod latitude;
pub mod observer;
pub mod params;
pub mod report;
pub mod synthetic;
pub mod wind;

pub use bands::CirculationBand;
pub use calibration::{CalibrationCoefficients, CalibrationModel};
pub use engine::{CirculationEngine, RowForcing};
pub use error::{CirculationError, Result};
pub use gradient::{topographic_gradient, TopographicGradient};
pub use grid::{ScalarGrid, TopographyGrid};
pub use observer::{CirculationEvent, CirculationObserver, LogObserver, NullObserver};
pub use params::{EngineConfig, PlanetaryParameters};
pub use report::CirculationReport;
pub use wind::{WindField, WindSummary};
