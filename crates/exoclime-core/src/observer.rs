//! Injected progress reporting for the engine.
//!
//! The crate never configures a logger. Callers pick an observer; [`LogObserver`]
//! forwards to the `log` facade, which stays silent until a binary installs a backend.

use std::sync::Arc;

use crate::calibration::CalibrationCoefficients;
use crate::wind::WindSummary;

/// Something the engine reports while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum CirculationEvent {
    /// Coefficients fixed at construction.
    Calibrated {
        coefficients: CalibrationCoefficients,
        height: usize,
        width: usize,
    },
    CirculationStarted { global_force: f64 },
    CirculationFinished { summary: WindSummary },
    /// A topography grid was refused; no output was produced.
    ShapeRejected {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

pub trait CirculationObserver: Send + Sync {
    fn on_event(&self, event: &CirculationEvent);
}

impl<T: CirculationObserver + ?Sized> CirculationObserver for Arc<T> {
    fn on_event(&self, event: &CirculationEvent) {
        (**self).on_event(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CirculationObserver for NullObserver {
    fn on_event(&self, _event: &CirculationEvent) {}
}

/// Writes events through the `log` crate under the `exoclime` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CirculationObserver for LogObserver {
    fn on_event(&self, event: &CirculationEvent) {
        match event {
            CirculationEvent::Calibrated { coefficients, height, width } => log::debug!(
                target: "exoclime",
                "calibrated {height}×{width}: thermal_intensity={:.4} coriolis_factor={:.4}",
                coefficients.thermal_intensity,
                coefficients.coriolis_factor,
            ),
            CirculationEvent::CirculationStarted { global_force } => log::info!(
                target: "exoclime",
                "computing global circulation (global_force={global_force:.4})"
            ),
            CirculationEvent::CirculationFinished { summary } => log::info!(
                target: "exoclime",
                "circulation done: mean speed {:.4}, max speed {:.4}",
                summary.mean_speed,
                summary.max_speed,
            ),
            CirculationEvent::ShapeRejected { expected, found } => log::error!(
                target: "exoclime",
                "topography {}×{} rejected, engine expects {}×{}",
                found.0, found.1, expected.0, expected.1,
            ),
        }
    }
}
