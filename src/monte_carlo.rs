use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::common::Real;
use crate::error::{RadarError, Result};
use crate::params::RadarParameters;
use crate::performance::calculate_pd;
use crate::simulation::run_simulation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub snr_db: Real,
    pub detection_rate: Real,
    pub theoretical_pd: Real,
}

/// Fraction of `trials` independent runs that detect the target.
///
/// Trial `i` draws from its own generator seeded with `seed + i`, so any
/// subset of trials can be reproduced in isolation.
pub fn detection_rate(params: &RadarParameters, trials: usize, seed: u64) -> Result<Real> {
    if trials == 0 {
        return Err(RadarError::invalid("trials", 0.0, "must be at least one"));
    }
    params.validate()?;

    let mut detections = 0;
    for i in 0..trials {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        if run_simulation(params, &mut rng)?.target_detected {
            detections += 1;
        }
    }

    let rate = detections as Real / trials as Real;
    debug!(trials, detections, rate, "monte carlo finished");
    Ok(rate)
}

/// Empirical detection rate next to the analytic Pd for each SNR.
pub fn snr_sweep(
    params: &RadarParameters,
    snrs_db: &[Real],
    trials: usize,
    seed: u64,
) -> Result<Vec<SweepPoint>> {
    snrs_db
        .iter()
        .map(|&snr_db| {
            let point_params = RadarParameters {
                snr_db,
                ..params.clone()
            };
            Ok(SweepPoint {
                snr_db,
                detection_rate: detection_rate(&point_params, trials, seed)?,
                theoretical_pd: calculate_pd(snr_db, params.pfa)?,
            })
        })
        .collect()
}
