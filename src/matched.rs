use ndarray::{s, Array1};
use tracing::debug;

use crate::common::{Real, Signal};
use crate::filter::lfilter;
use crate::waveform::Waveform;

pub trait PulseCompression {
    fn pulse_compress(&self, template: &Waveform) -> Signal;
}

/// Cross-correlation of `received` with `template`, same length as `received`.
///
/// `output[m] = Σ received[m - M/2 + t]·template[t]` with zeros outside the
/// received signal, so zero lag sits at index `M/2` of a self-correlation.
pub fn matched_filter(received: &Signal, template: &Signal) -> Signal {
    let (n, m) = (received.len(), template.len());
    if n == 0 || m == 0 {
        return Signal::zeros(n);
    }
    let n_right = m - 1 - m / 2;

    let coeffs: Vec<Real> = template.iter().rev().cloned().collect();
    let mut padded = Signal::zeros(n + n_right);
    padded.slice_mut(s![..n]).assign(received);

    let compressed = lfilter(&coeffs, &[1.0], &padded.to_vec());

    Array1::from(compressed).slice(s![n_right..]).to_owned()
}

impl PulseCompression for Signal {
    fn pulse_compress(&self, template: &Waveform) -> Signal {
        let output = matched_filter(self, &template.samples);
        debug!(len = output.len(), taps = template.len(), "pulse compressed");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &Signal, expected: &[Real]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-12, "{} != {}", actual, Signal::from(expected.to_vec()));
        }
    }

    #[test]
    fn odd_template_is_centered() {
        let out = matched_filter(&Signal::from(vec![1.0, 2.0, 3.0]), &Signal::from(vec![0.0, 1.0, 0.5]));
        assert_close(&out, &[2.0, 3.5, 3.0]);
    }

    #[test]
    fn even_template_leans_left() {
        let out = matched_filter(
            &Signal::from(vec![1.0, 2.0, 3.0, 4.0]),
            &Signal::from(vec![1.0, 1.0]),
        );
        assert_close(&out, &[1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn template_longer_than_signal() {
        let out = matched_filter(
            &Signal::from(vec![1.0, 2.0]),
            &Signal::from(vec![1.0, 0.0, 0.0, 1.0]),
        );
        // lags -2 and -1
        assert_close(&out, &[2.0, 0.0]);
    }

    #[test]
    fn self_correlation_peaks_at_center() {
        let w = Waveform::generate(1.0, 1.0, 16.0).unwrap();
        let out = w.samples.pulse_compress(&w);
        let center = w.len() / 2;

        assert_eq!(out.len(), w.len());
        assert!((out[center] - w.samples.dot(&w.samples)).abs() < 1e-12);
        for (i, &v) in out.iter().enumerate() {
            if i != center {
                assert!(v < out[center], "index {} = {} not below peak {}", i, v, out[center]);
            }
        }
    }

    #[test]
    fn delayed_pulse_peaks_at_delay_plus_half_template() {
        let w = Waveform::generate(1.0, 1.0, 16.0).unwrap();
        let mut received = Signal::zeros(64);
        received.slice_mut(s![20..36]).assign(&w.samples);

        let out = matched_filter(&received, &w.samples);
        let peak = out
            .indexed_iter()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 20 + w.len() / 2);
    }
}
