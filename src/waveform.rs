use ndarray::Array1;
use num::traits::FloatConst;
use serde::Serialize;
use tracing::debug;

use crate::common::{Real, Signal};
use crate::error::{ensure_positive, Result};
use crate::params::nof_samples;

/// Transmitted pulse: a continuous-wave sinusoid sampled over `[0, duration)`.
#[derive(Debug, Clone, Serialize)]
pub struct Waveform {
    pub time: Signal,
    pub samples: Signal,
    pub sample_freq: Real,
}

/// Sample instants `n / sample_freq` for `n` in `0..len`.
pub fn time_base(len: usize, sample_freq: Real) -> Signal {
    Array1::from_shape_fn(len, |n| n as Real / sample_freq)
}

impl Waveform {
    pub fn generate(carrier_freq: Real, duration: Real, sample_freq: Real) -> Result<Self> {
        ensure_positive("sample_freq", sample_freq)?;
        ensure_positive("duration", duration)?;

        let time = time_base(nof_samples(duration, sample_freq), sample_freq);
        let samples = time.mapv(|t| Real::sin(2.0 * Real::PI() * carrier_freq * t));

        debug!(len = samples.len(), carrier_freq, "generated pulse");

        Ok(Self {
            time,
            samples,
            sample_freq,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
