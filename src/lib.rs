mod channel;
mod common;
mod detector;
mod error;
mod filter;
mod matched;
pub mod monte_carlo;
mod params;
mod performance;
mod propagation;
mod simulation;
pub mod spectrum;
mod waveform;

pub use channel::{add_clutter, add_noise, corrupt};
pub use common::*;
pub use detector::{detect, peak_index, Detection};
pub use error::{RadarError, Result};
pub use filter::lfilter;
pub use matched::{matched_filter, PulseCompression};
pub use params::RadarParameters;
pub use performance::{calculate_pd, erfc, radar_range, Metrics};
pub use propagation::{propagate, Echo};
pub use simulation::{run_simulation, SimulationResult};
pub use waveform::Waveform;

pub use ndarray_rand::rand;
