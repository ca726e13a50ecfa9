use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use ndarray::Array1;
use num::traits::{Num, ToPrimitive};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

pub type Real = f64;

pub type Signal = Array1<Real>;
pub type Mask = Array1<bool>;

pub const SPEED_OF_LIGHT: Real = 299_792_458.0;
pub const BOLTZMANN: Real = 1.380649e-23;

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Decibel(Real);

impl Decibel {
    /// Linear power ratio, `10^(dB/10)`.
    pub fn power_ratio(self) -> Real {
        Real::powf(10.0, self.0 / 10.0)
    }
}

/// A primitive that cannot be represented as `f64` becomes NaN, so it fails
/// any later parameter check instead of panicking here.
impl<T: Num + ToPrimitive> From<T> for Decibel {
    #[inline]
    fn from(value: T) -> Self {
        Self(value.to_f64().unwrap_or(Real::NAN))
    }
}

impl From<Decibel> for Real {
    fn from(db: Decibel) -> Self {
        db.0
    }
}

pub trait Units {
    fn db(self) -> Decibel;

    fn value(self) -> Real;
}

impl<T: Into<Decibel> + Into<Real>> Units for T {
    fn db(self) -> Decibel {
        self.into()
    }

    fn value(self) -> Real {
        self.into()
    }
}

/// Mean squared magnitude of the samples, zero for an empty signal.
pub fn mean_power(signal: &Signal) -> Real {
    if signal.is_empty() {
        return 0.0;
    }
    signal.dot(signal) / signal.len() as Real
}

pub trait Storable: Serialize {
    fn to_file(&self, path: &Path) -> Result<()> {
        let mut file = File::create(&path)?;
        let s = serde_json::to_string(self)?;
        file.write_all(s.as_bytes())?;
        Ok(())
    }
}

pub trait Loadable: DeserializeOwned {
    fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(&path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
