use ndarray::Array1;
use num::traits::FloatConst;
use rustfft::num_complex::Complex;
use rustfft::FFTplanner;
use serde::Serialize;

use crate::common::{Real, Signal};

/// Magnitude spectrum with zero frequency in the middle.
#[derive(Debug, Clone, Serialize)]
pub struct Spectrum {
    pub freqs: Signal,
    pub magnitude: Signal,
}

fn hanning(length: usize) -> Array1<Real> {
    let l = length as Real;
    Array1::linspace(0.5, l - 0.5, length).map(|&n| Real::sin(Real::PI() * n / l).powf(2.0))
}

impl Spectrum {
    /// Hann-windowed FFT of `signal`, scaled so a tone of amplitude `A`
    /// peaks near `A/2`.
    pub fn of(signal: &Signal, sample_freq: Real) -> Self {
        let n = signal.len();
        if n == 0 {
            return Self {
                freqs: Signal::zeros(0),
                magnitude: Signal::zeros(0),
            };
        }

        let window = hanning(n);
        let norm = window.sum();

        let mut input: Vec<Complex<Real>> = signal
            .iter()
            .zip(window.iter())
            .map(|(&x, &w)| Complex::new(x * w, 0.0))
            .collect();
        let mut output = vec![Complex::new(0.0, 0.0); n];

        let mut planner: FFTplanner<Real> = FFTplanner::new(false);
        let fft = planner.plan_fft(n);
        fft.process(&mut input, &mut output);

        let half = n / 2;
        let magnitude = Array1::from_shape_fn(n, |i| output[(i + n - half) % n].norm() / norm);
        let freqs = Array1::from_shape_fn(n, |i| (i as Real - half as Real) * sample_freq / n as Real);

        Self { freqs, magnitude }
    }

    /// Frequency of the strongest bin.
    pub fn peak_freq(&self) -> Option<Real> {
        self.magnitude
            .indexed_iter()
            .fold(None, |best: Option<(usize, Real)>, (i, &m)| match best {
                Some((_, b)) if b >= m => best,
                _ => Some((i, m)),
            })
            .map(|(i, _)| self.freqs[i])
    }
}
