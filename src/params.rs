use serde::{Deserialize, Serialize};

use crate::common::{Loadable, Real, Storable, Units, BOLTZMANN, SPEED_OF_LIGHT};
use crate::error::{
    ensure_finite, ensure_non_negative, ensure_positive, ensure_probability, RadarError, Result,
};

/// Fraction of the sample rate used as half-width of the detection window.
const DETECTION_WINDOW_FRACTION: Real = 0.05;

/// Scenario description for a single pulse against a single moving target.
///
/// Gains, losses, noise figure and SNR are in dB; everything else is SI.
/// Missing fields in a JSON document fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarParameters {
    pub carrier_freq: Real,
    pub duration: Real,
    pub sample_freq: Real,

    pub distance: Real,
    pub velocity: Real,
    pub rcs: Real,
    pub attenuation: Real,

    pub snr_db: Real,
    pub clutter_level_db: Real,

    pub tx_power: Real,
    pub tx_gain_db: Real,
    pub rx_gain_db: Real,
    pub system_loss_db: Real,

    pub temperature: Real,
    pub bandwidth: Real,
    pub noise_figure_db: Real,
    pub pfa: Real,
}

impl Default for RadarParameters {
    fn default() -> Self {
        Self {
            carrier_freq: 10e9,
            duration: 1e-6,
            sample_freq: 1e7,
            distance: 1500.0,
            velocity: 0.0,
            rcs: 1.0,
            attenuation: 0.7,
            snr_db: 10.0,
            clutter_level_db: 0.0,
            tx_power: 1000.0,
            tx_gain_db: 30.0,
            rx_gain_db: 30.0,
            system_loss_db: 0.0,
            temperature: 290.0,
            bandwidth: 1e6,
            noise_figure_db: 3.0,
            pfa: 1e-6,
        }
    }
}

impl RadarParameters {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("carrier_freq", self.carrier_freq)?;
        ensure_positive("duration", self.duration)?;
        ensure_positive("sample_freq", self.sample_freq)?;
        ensure_non_negative("distance", self.distance)?;
        ensure_finite("distance", self.distance)?;
        ensure_positive("tx_power", self.tx_power)?;
        ensure_positive("rcs", self.rcs)?;
        ensure_positive("temperature", self.temperature)?;
        ensure_positive("bandwidth", self.bandwidth)?;
        ensure_probability("pfa", self.pfa)
    }

    pub fn wavelength(&self) -> Real {
        SPEED_OF_LIGHT / self.carrier_freq
    }

    pub fn nof_pulse_samples(&self) -> usize {
        nof_samples(self.duration, self.sample_freq)
    }

    pub fn delay_samples(&self) -> Result<usize> {
        delay_samples(self.distance, self.sample_freq)
    }

    pub fn doppler_shift(&self) -> Real {
        doppler_shift(self.velocity, self.carrier_freq)
    }

    pub fn detection_half_width(&self) -> usize {
        detection_half_width(self.sample_freq)
    }

    /// Receiver sensitivity `k·T·B·F` in watts.
    pub fn min_detectable_signal(&self) -> Result<Real> {
        min_detectable_signal(self.temperature, self.bandwidth, self.noise_figure_db)
    }
}

impl Storable for RadarParameters {}
impl Loadable for RadarParameters {}

pub fn nof_samples(duration: Real, sample_freq: Real) -> usize {
    (duration * sample_freq).floor() as usize
}

/// Round-trip delay quantized down to whole samples.
///
/// Fails when the delay does not fit in a `usize`.
pub fn delay_samples(distance: Real, sample_freq: Real) -> Result<usize> {
    let delay = (2.0 * distance / SPEED_OF_LIGHT * sample_freq).floor();
    if delay >= 0.0 && delay < usize::MAX as Real {
        Ok(delay as usize)
    } else {
        Err(RadarError::invalid("distance", distance, "delay not representable in samples"))
    }
}

pub fn doppler_shift(velocity: Real, carrier_freq: Real) -> Real {
    2.0 * velocity * carrier_freq / SPEED_OF_LIGHT
}

pub fn detection_half_width(sample_freq: Real) -> usize {
    (DETECTION_WINDOW_FRACTION * sample_freq).floor() as usize
}

pub fn min_detectable_signal(temperature: Real, bandwidth: Real, noise_figure_db: Real) -> Result<Real> {
    ensure_positive("temperature", temperature)?;
    ensure_positive("bandwidth", bandwidth)?;
    Ok(BOLTZMANN * temperature * bandwidth * noise_figure_db.db().power_ratio())
}
