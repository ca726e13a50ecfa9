//! Closed-form detection statistics and the radar range equation.
//!
//! Nothing here depends on the simulated signals; both results follow from
//! the scenario parameters alone.

use num::traits::FloatConst;
use serde::Serialize;
use tracing::debug;

use crate::common::{Real, Units};
use crate::error::{ensure_positive, ensure_probability, Result};
use crate::params::RadarParameters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub theoretical_pd: Real,
    pub doppler_shift_hz: Real,
    pub max_range_meters: Real,
}

impl Metrics {
    pub fn from_parameters(params: &RadarParameters) -> Result<Self> {
        let theoretical_pd = calculate_pd(params.snr_db, params.pfa)?;
        let max_range_meters = radar_range(
            params.tx_power,
            params.tx_gain_db.db().power_ratio(),
            params.rx_gain_db.db().power_ratio(),
            params.wavelength(),
            params.rcs,
            params.min_detectable_signal()?,
            params.system_loss_db.db().power_ratio(),
        )?;

        let metrics = Self {
            theoretical_pd,
            doppler_shift_hz: params.doppler_shift(),
            max_range_meters,
        };
        debug!(?metrics, "performance estimated");
        Ok(metrics)
    }
}

/// Complementary error function, Abramowitz & Stegun 7.1.26.
///
/// Absolute error below 1.5e-7.
pub fn erfc(x: Real) -> Real {
    let t = 1.0 / (1.0 + 0.3275911 * x.abs());
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    let result = poly * (-x * x).exp();
    if x >= 0.0 {
        result
    } else {
        2.0 - result
    }
}

/// Probability of detection for a coherent detector with unit noise variance.
pub fn calculate_pd(snr_db: Real, pfa: Real) -> Result<Real> {
    ensure_probability("pfa", pfa)?;

    let snr = snr_db.db().power_ratio();
    let threshold = (-2.0 * pfa.ln()).sqrt();
    Ok(0.5 * erfc((threshold - snr.sqrt()) / Real::SQRT_2()))
}

/// Monostatic radar range equation solved for range.
///
/// `((Pt·Gt·Gr·λ²·σ) / ((4π)³·Smin·L))^(1/4)` with linear gains and loss.
pub fn radar_range(
    tx_power: Real,
    tx_gain: Real,
    rx_gain: Real,
    wavelength: Real,
    rcs: Real,
    min_detectable_signal: Real,
    loss: Real,
) -> Result<Real> {
    ensure_positive("min_detectable_signal", min_detectable_signal)?;
    ensure_positive("loss", loss)?;

    let numerator = tx_power * tx_gain * rx_gain * wavelength.powi(2) * rcs;
    let denominator = (4.0 * Real::PI()).powi(3) * min_detectable_signal * loss;
    Ok((numerator / denominator).powf(0.25))
}
