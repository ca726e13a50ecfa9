use std::ops::Range;

use ndarray::s;
use serde::Serialize;
use tracing::debug;

use crate::common::{Mask, Real, Signal};
use crate::params::detection_half_width;

/// Fraction of the output peak used as detection threshold.
const PEAK_THRESHOLD_RATIO: Real = 0.5;

#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub mask: Mask,
    pub threshold: Real,
    pub window: Range<usize>,
    pub target_detected: bool,
}

/// Thresholds the pulse-compressed signal at half its global peak.
///
/// The target counts as detected if any sample above threshold falls in
/// `[delay - w, delay + w)`, `w = floor(0.05 · sample_freq)`, clipped to the
/// output.
pub fn detect(output: &Signal, expected_delay: usize, sample_freq: Real) -> Detection {
    let peak = output.fold(Real::NEG_INFINITY, |acc, &x| acc.max(x));
    let threshold = PEAK_THRESHOLD_RATIO * peak;
    let mask: Mask = output.mapv(|x| x > threshold);

    let w = detection_half_width(sample_freq);
    let start = expected_delay.saturating_sub(w).min(mask.len());
    let stop = expected_delay.saturating_add(w).min(mask.len());
    let window = start..stop;

    let target_detected = mask.slice(s![start..stop]).iter().any(|&d| d);

    debug!(
        threshold,
        window_start = start,
        window_stop = stop,
        target_detected,
        "thresholded"
    );

    Detection {
        mask,
        threshold,
        window,
        target_detected,
    }
}

impl Detection {
    /// Indices of all samples above threshold.
    pub fn indices(&self) -> Vec<usize> {
        mask_indices(&self.mask)
    }

    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&d| d).count()
    }
}

pub fn mask_indices(mask: &Mask) -> Vec<usize> {
    mask.indexed_iter()
        .filter(|&(_, &is_det)| is_det)
        .map(|(i, _)| i)
        .collect()
}

/// Index of the largest sample, first one on ties.
pub fn peak_index(output: &Signal) -> Option<usize> {
    output
        .indexed_iter()
        .fold(None, |best: Option<(usize, Real)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
}
