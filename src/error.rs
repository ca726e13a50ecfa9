//! Error types for the radar pipeline

use std::io;

use thiserror::Error;

use crate::common::Real;

pub type Result<T> = std::result::Result<T, RadarError>;

#[derive(Error, Debug)]
pub enum RadarError {
    /// A parameter lies outside the domain the computation is defined on
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Real,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RadarError {
    pub fn invalid(name: &'static str, value: Real, reason: &'static str) -> Self {
        RadarError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Fails unless `value > 0`. NaN fails too.
pub(crate) fn ensure_positive(name: &'static str, value: Real) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(RadarError::invalid(name, value, "must be positive"))
    }
}

pub(crate) fn ensure_non_negative(name: &'static str, value: Real) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(RadarError::invalid(name, value, "must not be negative"))
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: Real) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RadarError::invalid(name, value, "must be finite"))
    }
}

pub(crate) fn ensure_probability(name: &'static str, value: Real) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(RadarError::invalid(name, value, "must lie strictly inside (0, 1)"))
    }
}
