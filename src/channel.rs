use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use tracing::debug;

use crate::common::{mean_power, Real, Signal, Units};

/// Zero-mean white Gaussian samples with the given mean power.
pub fn gaussian<R: Rng>(power: Real, len: usize, rng: &mut R) -> Signal {
    let s = power.sqrt();
    s * Signal::random_using(len, StandardNormal, rng)
}

/// Adds Gaussian clutter `clutter_level_db` below the signal's own power.
pub fn add_clutter<R: Rng>(signal: &Signal, clutter_level_db: Real, rng: &mut R) -> Signal {
    let signal_power = mean_power(signal);
    let clutter_power = signal_power / clutter_level_db.db().power_ratio();

    debug!(signal_power, clutter_power, "adding clutter");

    signal + &gaussian(clutter_power, signal.len(), rng)
}

/// Adds white Gaussian noise at the requested SNR relative to the signal's own power.
pub fn add_noise<R: Rng>(signal: &Signal, snr_db: Real, rng: &mut R) -> Signal {
    let signal_power = mean_power(signal);
    let noise_power = signal_power / snr_db.db().power_ratio();

    debug!(signal_power, noise_power, "adding noise");

    signal + &gaussian(noise_power, signal.len(), rng)
}

/// Clutter first, then noise measured against the clutter-corrupted signal.
pub fn corrupt<R: Rng>(signal: &Signal, clutter_level_db: Real, snr_db: Real, rng: &mut R) -> Signal {
    let cluttered = add_clutter(signal, clutter_level_db, rng);
    add_noise(&cluttered, snr_db, rng)
}
