use ndarray_rand::rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::channel::corrupt;
use crate::common::{Mask, Real, Signal, Storable};
use crate::detector::{detect, mask_indices, Detection};
use crate::error::Result;
use crate::matched::PulseCompression;
use crate::params::RadarParameters;
use crate::performance::Metrics;
use crate::propagation::propagate;
use crate::spectrum::Spectrum;
use crate::waveform::Waveform;

/// Every intermediate signal of one run plus the analytic metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub time: Signal,
    pub waveform: Signal,
    pub echo: Signal,
    pub received_signal: Signal,
    pub filter_output: Signal,
    pub detection_mask: Mask,
    pub target_detected: bool,
    pub delay_samples: usize,
    pub threshold: Real,
    pub theoretical_pd: Real,
    pub doppler_shift_hz: Real,
    pub max_range_meters: Real,
    sample_freq: Real,
}

/// Runs waveform → propagation → clutter and noise → matched filter → detection.
///
/// Parameters are validated before anything is computed. All randomness is
/// drawn from `rng`.
pub fn run_simulation<R: Rng>(params: &RadarParameters, rng: &mut R) -> Result<SimulationResult> {
    params.validate()?;

    let metrics = Metrics::from_parameters(params)?;

    let waveform = Waveform::generate(params.carrier_freq, params.duration, params.sample_freq)?;
    let echo = propagate(
        &waveform,
        params.distance,
        params.velocity,
        params.carrier_freq,
        params.attenuation,
    )?;
    let received_signal = corrupt(&echo.samples, params.clutter_level_db, params.snr_db, rng);
    let filter_output = received_signal.pulse_compress(&waveform);
    let Detection {
        mask,
        threshold,
        target_detected,
        ..
    } = detect(&filter_output, echo.delay_samples, params.sample_freq);

    info!(
        target_detected,
        delay_samples = echo.delay_samples,
        theoretical_pd = metrics.theoretical_pd,
        max_range_meters = metrics.max_range_meters,
        "simulation finished"
    );

    Ok(SimulationResult {
        time: waveform.time,
        waveform: waveform.samples,
        echo: echo.samples,
        received_signal,
        filter_output,
        detection_mask: mask,
        target_detected,
        delay_samples: echo.delay_samples,
        threshold,
        theoretical_pd: metrics.theoretical_pd,
        doppler_shift_hz: metrics.doppler_shift_hz,
        max_range_meters: metrics.max_range_meters,
        sample_freq: params.sample_freq,
    })
}

impl SimulationResult {
    pub fn metrics(&self) -> Metrics {
        Metrics {
            theoretical_pd: self.theoretical_pd,
            doppler_shift_hz: self.doppler_shift_hz,
            max_range_meters: self.max_range_meters,
        }
    }

    pub fn detection_indices(&self) -> Vec<usize> {
        mask_indices(&self.detection_mask)
    }

    pub fn received_spectrum(&self) -> Spectrum {
        Spectrum::of(&self.received_signal, self.sample_freq)
    }
}

impl Storable for SimulationResult {}
impl Storable for Spectrum {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::peak_index;
    use crate::error::RadarError;
    use ndarray_rand::rand::rngs::StdRng;
    use ndarray_rand::rand::SeedableRng;

    fn high_snr() -> RadarParameters {
        RadarParameters {
            attenuation: 1.0,
            snr_db: 30.0,
            clutter_level_db: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn lengths_follow_parameters() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = run_simulation(&RadarParameters::default(), &mut rng).unwrap();

        assert_eq!(result.waveform.len(), 10);
        assert_eq!(result.time.len(), 10);
        assert_eq!(result.delay_samples, 100);
        assert_eq!(result.echo.len(), 110);
        assert_eq!(result.received_signal.len(), 110);
        assert_eq!(result.filter_output.len(), 110);
        assert_eq!(result.detection_mask.len(), 110);
        assert_eq!(result.doppler_shift_hz, 0.0);
    }

    #[test]
    fn high_snr_target_is_detected() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = run_simulation(&high_snr(), &mut rng).unwrap();

        assert!(result.target_detected);
        assert!(!result.detection_indices().is_empty());
        assert!(result.theoretical_pd > 0.999);
    }

    #[test]
    fn resolvable_tone_peaks_at_delay() {
        // 1 MHz carrier keeps the pulse well resolved at 10 MHz sampling
        let params = RadarParameters {
            carrier_freq: 1e6,
            duration: 1e-5,
            ..high_snr()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let result = run_simulation(&params, &mut rng).unwrap();

        let peak = peak_index(&result.filter_output).unwrap();
        let center = result.delay_samples + result.waveform.len() / 2;
        assert!(result.target_detected);
        assert!((peak as isize - center as isize).abs() <= 10, "peak {} vs {}", peak, center);
    }

    #[test]
    fn echo_is_exact_without_doppler() {
        let params = RadarParameters {
            carrier_freq: 2e6,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let result = run_simulation(&params, &mut rng).unwrap();

        for n in 0..result.waveform.len() {
            assert_eq!(result.echo[result.delay_samples + n], 0.7 * result.waveform[n]);
        }
    }

    #[test]
    fn invalid_parameters_fail_before_running() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = RadarParameters {
            pfa: 1.0,
            ..Default::default()
        };
        match run_simulation(&params, &mut rng) {
            Err(RadarError::InvalidParameter { name, .. }) => assert_eq!(name, "pfa"),
            other => panic!("unexpected {:?}", other.map(|r| r.target_detected)),
        }
    }

    #[test]
    fn huge_distance_is_an_error_not_a_panic() {
        let params = RadarParameters {
            distance: 1e30,
            ..Default::default()
        };
        match run_simulation(&params, &mut StdRng::seed_from_u64(0)) {
            Err(RadarError::InvalidParameter { name, .. }) => assert_eq!(name, "distance"),
            other => panic!("unexpected {:?}", other.map(|r| r.delay_samples)),
        }
    }

    #[test]
    fn detection_indices_match_mask() {
        let result = run_simulation(&high_snr(), &mut StdRng::seed_from_u64(42)).unwrap();
        let indices = result.detection_indices();
        assert_eq!(indices.len(), result.detection_mask.iter().filter(|&&d| d).count());
        assert!(indices.iter().all(|&i| result.detection_mask[i]));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = run_simulation(&RadarParameters::default(), &mut StdRng::seed_from_u64(3)).unwrap();
        let b = run_simulation(&RadarParameters::default(), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.received_signal, b.received_signal);
        assert_eq!(a.detection_mask, b.detection_mask);
    }
}
