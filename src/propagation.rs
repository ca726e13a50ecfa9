use ndarray::{s, Zip};
use num::complex::Complex64;
use num::traits::FloatConst;
use serde::Serialize;
use tracing::debug;

use crate::common::{Real, Signal};
use crate::error::{RadarError, Result};
use crate::params::{delay_samples, doppler_shift};
use crate::waveform::Waveform;

/// Received copy of the pulse, zero-padded ahead of the round-trip delay.
#[derive(Debug, Clone, Serialize)]
pub struct Echo {
    pub samples: Signal,
    pub delay_samples: usize,
    pub doppler_shift: Real,
}

/// Delays, Doppler modulates and attenuates `waveform`.
///
/// The modulation is a complex phase ramp over the pulse time base but only
/// the in-phase component is kept, so the echo is real valued.
pub fn propagate(
    waveform: &Waveform,
    distance: Real,
    velocity: Real,
    carrier_freq: Real,
    attenuation: Real,
) -> Result<Echo> {
    let delay = delay_samples(distance, waveform.sample_freq)?;
    let doppler = doppler_shift(velocity, carrier_freq);

    let modulated: Signal = Zip::from(&waveform.samples)
        .and(&waveform.time)
        .apply_collect(|&x, &t| {
            let ramp = Complex64::from_polar(1.0, 2.0 * Real::PI() * doppler * t);
            (Complex64::new(x, 0.0) * ramp).re * attenuation
        });

    let len = delay
        .checked_add(waveform.len())
        .ok_or_else(|| RadarError::invalid("distance", distance, "echo length overflows"))?;
    let mut samples = Signal::zeros(len);
    samples.slice_mut(s![delay..]).assign(&modulated);

    debug!(
        delay_samples = delay,
        doppler_shift = doppler,
        len = samples.len(),
        "propagated echo"
    );

    Ok(Echo {
        samples,
        delay_samples: delay,
        doppler_shift: doppler,
    })
}

impl Echo {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SPEED_OF_LIGHT;

    #[test]
    fn stationary_target_is_scaled_delayed_copy() {
        let w = Waveform::generate(2e6, 1e-6, 1e7).unwrap();
        let echo = propagate(&w, 1500.0, 0.0, 2e6, 0.7).unwrap();

        assert_eq!(echo.delay_samples, 100);
        assert_eq!(echo.len(), 110);
        assert_eq!(echo.doppler_shift, 0.0);
        assert!(echo.samples.slice(s![..100]).iter().all(|&x| x == 0.0));
        for (e, x) in echo.samples.slice(s![100..]).iter().zip(w.samples.iter()) {
            assert_eq!(*e, 0.7 * x);
        }
    }

    #[test]
    fn zero_distance_has_no_padding() {
        let w = Waveform::generate(2e6, 1e-6, 1e7).unwrap();
        let echo = propagate(&w, 0.0, 0.0, 2e6, 1.0).unwrap();
        assert_eq!(echo.delay_samples, 0);
        assert_eq!(echo.samples, w.samples);
    }

    #[test]
    fn unrepresentable_distance_is_an_error() {
        let w = Waveform::generate(2e6, 1e-6, 1e7).unwrap();
        for &distance in [1e30, Real::INFINITY].iter() {
            match propagate(&w, distance, 0.0, 2e6, 1.0) {
                Err(RadarError::InvalidParameter { name, .. }) => assert_eq!(name, "distance"),
                other => panic!("distance {} gave {:?}", distance, other.map(|e| e.len())),
            }
        }
    }

    #[test]
    fn moving_target_keeps_in_phase_component() {
        let w = Waveform::generate(1e6, 1e-5, 1e7).unwrap();
        // Large closing velocity so the ramp turns noticeably within the pulse
        let velocity = 3000.0;
        let fc = 1e9;
        let echo = propagate(&w, 300.0, velocity, fc, 0.5).unwrap();
        let fd = 2.0 * velocity * fc / SPEED_OF_LIGHT;

        assert!((echo.doppler_shift - fd).abs() < 1e-9);
        assert_eq!(echo.delay_samples, 20);
        for n in 0..w.len() {
            let expected = 0.5 * w.samples[n] * Real::cos(2.0 * Real::PI() * fd * w.time[n]);
            assert!((echo.samples[echo.delay_samples + n] - expected).abs() < 1e-12);
        }
    }
}
