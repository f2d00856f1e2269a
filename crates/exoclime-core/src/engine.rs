//! Global circulation pass: latitude bands plus orographic deflection.
//!
//! Pipeline for one call of [`CirculationEngine::compute`]:
//!   1. Shape check against the `(height, width)` fixed at construction.
//!   2. Central-difference elevation gradient.
//!   3. Per-row band and hemisphere sign (precomputed at construction).
//!   4. Base wind from the band table, scaled by the global force.
//!   5. Coupling: U += ∂z/∂row · F · 3, V −= ∂z/∂col · F · 3.
//!
//! The sign convention turns the flow around high ground instead of through it.

#[cfg(feature = "threading")]
use rayon::prelude::*;

use crate::bands::CirculationBand;
use crate::calibration::{CalibrationCoefficients, CalibrationModel};
use crate::error::{CirculationError, Result};
use crate::gradient::topographic_gradient;
use crate::grid::{ScalarGrid, TopographyGrid};
use crate::latitude::{hemisphere_sign, row_latitudes};
use crate::observer::{CirculationEvent, CirculationObserver, LogObserver};
use crate::params::{EngineConfig, PlanetaryParameters};
use crate::wind::WindField;

/// Gain applied to the elevation gradient in the coupling step.
pub const OROGRAPHIC_GAIN: f64 = 3.0;

/// Latitude-only forcing for one grid row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowForcing {
    pub latitude_deg: f64,
    pub band: CirculationBand,
    pub hemisphere_sign: f64,
}

impl RowForcing {
    fn at_latitude(latitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            band: CirculationBand::from_abs_latitude(latitude_deg.abs()),
            hemisphere_sign: hemisphere_sign(latitude_deg),
        }
    }

    #[inline]
    fn base_wind(&self, global_force: f64) -> (f64, f64) {
        self.band.base_wind(self.hemisphere_sign, global_force)
    }
}

/// Stateless wind-field transform over a fixed grid shape.
///
/// The calibration pair is computed once in the constructor and never changes.
pub struct CirculationEngine {
    height: usize,
    width: usize,
    coefficients: CalibrationCoefficients,
    rows: Vec<RowForcing>,
    observer: Box<dyn CirculationObserver>,
}

impl CirculationEngine {
    /// Engine reporting through [`LogObserver`].
    pub fn new(params: &PlanetaryParameters, height: usize, width: usize) -> Result<Self> {
        Self::with_observer(params, height, width, Box::new(LogObserver))
    }

    pub fn from_config(params: &PlanetaryParameters, config: &EngineConfig) -> Result<Self> {
        Self::new(params, config.height, config.width)
    }

    pub fn with_observer(
        params: &PlanetaryParameters,
        height: usize,
        width: usize,
        observer: Box<dyn CirculationObserver>,
    ) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(CirculationError::EmptyGrid { height, width });
        }
        let coefficients = CalibrationModel::calibrate(params);
        let rows = row_latitudes(height).into_iter().map(RowForcing::at_latitude).collect();
        observer.on_event(&CirculationEvent::Calibrated { coefficients, height, width });
        Ok(Self { height, width, coefficients, rows, observer })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn coefficients(&self) -> CalibrationCoefficients {
        self.coefficients
    }

    pub fn global_force(&self) -> f64 {
        self.coefficients.global_force()
    }

    /// Latitude, band and hemisphere sign per row, south to north.
    pub fn row_forcing(&self) -> &[RowForcing] {
        &self.rows
    }

    /// Band of each row, south to north.
    pub fn row_bands(&self) -> Vec<CirculationBand> {
        self.rows.iter().map(|r| r.band).collect()
    }

    /// Band-model wind with no topographic coupling.
    pub fn base_field(&self) -> WindField {
        let gf = self.global_force();
        let mut u = ScalarGrid::flat(self.height, self.width);
        let mut v = ScalarGrid::flat(self.height, self.width);
        for (r, row) in self.rows.iter().enumerate() {
            let (ub, vb) = row.base_wind(gf);
            for c in 0..self.width {
                u.set(r, c, ub as f32);
                v.set(r, c, vb as f32);
            }
        }
        WindField { u, v }
    }

    /// Compute the wind field for `topography`.
    ///
    /// Fails with [`CirculationError::ShapeMismatch`] if the grid is not the
    /// engine's `(height, width)`; nothing is allocated in that case.
    pub fn compute(&self, topography: &TopographyGrid) -> Result<WindField> {
        let expected = self.shape();
        let found = topography.shape();
        if found != expected {
            self.observer.on_event(&CirculationEvent::ShapeRejected { expected, found });
            return Err(CirculationError::ShapeMismatch { expected, found });
        }

        let gf = self.global_force();
        self.observer.on_event(&CirculationEvent::CirculationStarted { global_force: gf });

        let gradient = topographic_gradient(topography);
        let coupling = gf * OROGRAPHIC_GAIN;
        let w = self.width;
        let mut u = ScalarGrid::flat(self.height, w);
        let mut v = ScalarGrid::flat(self.height, w);

        let fill = |(r, (u_row, v_row)): (usize, (&mut [f32], &mut [f32]))| {
            let (ub, vb) = self.rows[r].base_wind(gf);
            let ns = gradient.north_south.row(r);
            let ew = gradient.east_west.row(r);
            for c in 0..w {
                u_row[c] = (ub + ns[c] as f64 * coupling) as f32;
                v_row[c] = (vb - ew[c] as f64 * coupling) as f32;
            }
        };

        #[cfg(feature = "threading")]
        u.data.par_chunks_mut(w).zip(v.data.par_chunks_mut(w)).enumerate().for_each(fill);

        #[cfg(not(feature = "threading"))]
        u.data.chunks_mut(w).zip(v.data.chunks_mut(w)).enumerate().for_each(fill);

        let field = WindField { u, v };
        self.observer.on_event(&CirculationEvent::CirculationFinished { summary: field.summary() });
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latitude::{hemisphere_sign_grid, latitude_grid};
    use crate::observer::NullObserver;
    use crate::synthetic::{flat_topography, volcano_topography};
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder(Mutex<Vec<CirculationEvent>>);

    impl CirculationObserver for Recorder {
        fn on_event(&self, event: &CirculationEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    fn trappist(h: usize, w: usize) -> CirculationEngine {
        let params = PlanetaryParameters::new(Some(-2.28), Some(6.1));
        CirculationEngine::with_observer(&params, h, w, Box::new(NullObserver)).unwrap()
    }

    /// Reference scenario: TRAPPIST-1 e on the 512×1024 grid, flat terrain.
    #[test]
    fn trappist_flat_hadley_rows() {
        let (h, w) = (512, 1024);
        let engine = trappist(h, w);
        assert_relative_eq!(engine.coefficients().thermal_intensity, 0.217, epsilon = 1e-3);
        assert_relative_eq!(engine.coefficients().coriolis_factor, 0.405, epsilon = 1e-3);
        assert_relative_eq!(engine.global_force(), 0.088, epsilon = 1e-3);

        let wind = engine.compute(&flat_topography(h, w)).unwrap();
        assert_eq!(wind.shape(), (h, w));

        let mut hadley_rows = 0;
        for (r, row) in engine.row_forcing().iter().enumerate() {
            if row.band != CirculationBand::Hadley {
                continue;
            }
            hadley_rows += 1;
            let expected_v = -row.hemisphere_sign * 0.0264;
            for c in 0..w {
                assert_relative_eq!(wind.u.get(r, c) as f64, -0.088, epsilon = 1e-3);
                assert_relative_eq!(wind.v.get(r, c) as f64, expected_v, epsilon = 1e-3);
            }
            assert!(wind.u.row(r).iter().all(|&x| x == wind.u.get(r, 0)));
            assert!(wind.v.row(r).iter().all(|&x| x == wind.v.get(r, 0)));
        }
        // |lat| < 30° covers a third of the rows.
        assert!((165..=175).contains(&hadley_rows), "{hadley_rows} Hadley rows");
    }

    #[test]
    fn flat_topography_equals_base_field() {
        let engine = trappist(64, 128);
        let wind = engine.compute(&ScalarGrid::new(64, 128, 0.35)).unwrap();
        assert_eq!(wind, engine.base_field());
    }

    #[test]
    fn extreme_luminosity_stays_finite() {
        let params = PlanetaryParameters::new(Some(400.0), None);
        let engine = CirculationEngine::with_observer(&params, 3, 3, Box::new(NullObserver)).unwrap();
        assert!(engine.global_force().is_finite());

        let wind = engine.compute(&flat_topography(3, 3)).unwrap();
        assert!(wind.u.data.iter().chain(&wind.v.data).all(|x| x.is_finite()));
        assert_eq!(wind, engine.base_field());

        let peak = engine.compute(&volcano_topography(3, 3)).unwrap();
        assert!(peak.u.data.iter().chain(&peak.v.data).all(|x| x.is_finite()));
    }

    #[test]
    fn band_pattern_across_latitudes() {
        let engine = trappist(181, 4); // 1° rows, exact equator at row 90
        let gf = engine.global_force();
        let wind = engine.compute(&flat_topography(181, 4)).unwrap();

        // +45°: Ferrel westerlies, poleward.
        assert_relative_eq!(wind.u.get(135, 0) as f64, gf * 0.8, epsilon = 1e-6);
        assert!(wind.v.get(135, 0) > 0.0);
        // −75°: polar easterlies, drifting north (equatorward).
        assert_relative_eq!(wind.u.get(15, 0) as f64, -gf * 0.6, epsilon = 1e-6);
        assert!(wind.v.get(15, 0) > 0.0);
        // Equator row: no meridional component.
        assert_eq!(wind.v.get(90, 0), 0.0);
        // Band edges: 30° → Ferrel, 60° → Polar.
        assert_eq!(engine.row_forcing()[120].band, CirculationBand::Ferrel);
        assert_eq!(engine.row_forcing()[150].band, CirculationBand::Polar);
        assert_eq!(engine.row_forcing()[119].band, CirculationBand::Hadley);
    }

    #[test]
    fn row_forcing_matches_latitude_grids() {
        let (h, w) = (37, 5);
        let engine = trappist(h, w);
        let lat = latitude_grid(h, w);
        let sign = hemisphere_sign_grid(h, w);
        for (r, row) in engine.row_forcing().iter().enumerate() {
            assert_eq!(row.latitude_deg as f32, lat.get(r, w - 1));
            assert_eq!(row.hemisphere_sign as f32, sign.get(r, 0));
        }
    }

    #[test]
    fn every_row_in_exactly_one_band() {
        let engine = trappist(97, 2);
        for row in engine.row_forcing() {
            let lat = row.latitude_deg.abs();
            let n = CirculationBand::ALL.iter().filter(|b| b.contains(lat)).count();
            assert_eq!(n, 1, "lat {}", row.latitude_deg);
            assert!(row.band.contains(lat));
        }
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let recorder = Arc::new(Recorder::default());
        let engine = CirculationEngine::with_observer(
            &PlanetaryParameters::default(),
            32,
            64,
            Box::new(recorder.clone()),
        )
        .unwrap();

        for bad in [flat_topography(64, 32), flat_topography(32, 63), flat_topography(1, 1)] {
            let err = engine.compute(&bad).unwrap_err();
            match err {
                CirculationError::ShapeMismatch { expected, found } => {
                    assert_eq!(expected, (32, 64));
                    assert_eq!(found, bad.shape());
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
        let events = recorder.0.lock().unwrap();
        assert!(matches!(events[0], CirculationEvent::Calibrated { height: 32, width: 64, .. }));
        assert_eq!(events.len(), 4);
        assert!(events[1..].iter().all(|e| matches!(e, CirculationEvent::ShapeRejected { .. })));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let p = PlanetaryParameters::default();
        assert!(matches!(
            CirculationEngine::new(&p, 0, 10),
            Err(CirculationError::EmptyGrid { height: 0, width: 10 })
        ));
        assert!(CirculationEngine::new(&p, 10, 0).is_err());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let engine = trappist(96, 192);
        let topo = volcano_topography(96, 192);
        let a = engine.compute(&topo).unwrap();
        let b = engine.compute(&topo).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wind_deflects_around_peak() {
        let (h, w) = (96, 192);
        let engine = trappist(h, w);
        let base = engine.base_field();
        let wind = engine.compute(&volcano_topography(h, w)).unwrap();
        let (r, c) = (h / 2, w / 2);

        // West flank (terrain rising eastward): V pushed south.
        assert!(wind.v.get(r, c - 20) < base.v.get(r, c - 20));
        // East flank: V pushed north.
        assert!(wind.v.get(r, c + 20) > base.v.get(r, c + 20));
        // South flank (terrain rising northward): U pushed east.
        assert!(wind.u.get(r - 20, c) > base.u.get(r - 20, c));
        // North flank: U pushed west.
        assert!(wind.u.get(r + 20, c) < base.u.get(r + 20, c));
    }

    #[test]
    fn coupling_scales_with_gradient() {
        // Eastward ramp with slope 0.01 per column: V shifted by −0.01·F·3 everywhere.
        let (h, w) = (16, 32);
        let engine = trappist(h, w);
        let ramp = ScalarGrid::from_fn(h, w, |_, c| c as f32 * 0.01);
        let wind = engine.compute(&ramp).unwrap();
        let base = engine.base_field();
        let shift = -0.01 * engine.global_force() * OROGRAPHIC_GAIN;
        for r in 0..h {
            for c in 0..w {
                assert_relative_eq!(
                    (wind.v.get(r, c) - base.v.get(r, c)) as f64,
                    shift,
                    epsilon = 1e-6
                );
                assert_eq!(wind.u.get(r, c), base.u.get(r, c));
            }
        }
    }

    #[test]
    fn events_for_successful_run() {
        let recorder = Arc::new(Recorder::default());
        let engine = CirculationEngine::with_observer(
            &PlanetaryParameters::default(),
            8,
            8,
            Box::new(recorder.clone()),
        )
        .unwrap();
        engine.compute(&flat_topography(8, 8)).unwrap();
        let events = recorder.0.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], CirculationEvent::CirculationStarted { global_force: 3.0 });
        assert!(matches!(events[2], CirculationEvent::CirculationFinished { .. }));
    }

    #[test]
    fn from_config_uses_config_shape() {
        let engine =
            CirculationEngine::from_config(&PlanetaryParameters::default(), &EngineConfig::default())
                .unwrap();
        assert_eq!(engine.shape(), (512, 1024));
        assert_eq!(engine.row_bands().len(), 512);
    }

    /// Full reference-size pass in release builds.
    #[cfg(not(debug_assertions))]
    #[test]
    fn reference_grid_within_250ms() {
        let engine = trappist(512, 1024);
        let topo = volcano_topography(512, 1024);
        let t = std::time::Instant::now();
        let _ = engine.compute(&topo).unwrap();
        let ms = t.elapsed().as_millis();
        assert!(ms < 250, "circulation pass took {ms} ms, budget is 250 ms");
    }
}
