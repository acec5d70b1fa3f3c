//! Weight initialization strategies.
//!
//! Each strategy yields a symmetric `(low, high)` range that fresh weights are
//! drawn from uniformly. Biases always start at zero regardless of strategy;
//! only the explicit restore path carries a stored bias through.

use std::str::FromStr;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
/// Weight initialization strategy.
pub enum Init {
    /// Fixed symmetric range `(-limit, limit)`.
    Uniform { limit: f32 },
    /// Xavier/Glorot: `limit = sqrt(6 / (input_size + neuron_number))`.
    Xavier,
    /// He/Kaiming: `limit = sqrt(2 / input_size)`.
    He,
}

impl Init {
    /// The symmetric draw range for a layer with `input_size` inputs and
    /// `neuron_number` outputs.
    pub fn range(self, input_size: usize, neuron_number: usize) -> (f32, f32) {
        let limit = match self {
            Init::Uniform { limit } => limit,
            Init::Xavier => (6.0 / (input_size + neuron_number) as f32).sqrt(),
            Init::He => (2.0 / input_size as f32).sqrt(),
        };
        (-limit, limit)
    }

    /// Initial bias value. Zero for every strategy.
    #[inline]
    pub fn bias(self) -> f32 {
        0.0
    }
}

impl FromStr for Init {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(Init::Uniform { limit: 1.0 }),
            "xavier" => Ok(Init::Xavier),
            "he" => Ok(Init::He),
            other => Err(Error::InvalidConfig(format!(
                "unknown initialization mode '{other}' (expected uniform, xavier or he)"
            ))),
        }
    }
}
