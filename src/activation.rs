//! Activation functions.
//!
//! A layer computes a pre-activation value `z = w . x + b` per neuron and then
//! applies an activation function: `y = activation(z)`. All activations here
//! are pure scalar maps except [`softmax`], which operates on a whole vector.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
/// Element-wise activation function.
pub enum Activation {
    Linear,
    ReLU,
    LeakyReLU { alpha: f32 },
    Sigmoid,
    Tanh,
    Elu { alpha: f32 },
}

impl Activation {
    /// Leaky ReLU with the conventional 0.01 slope.
    pub const LEAKY_RELU_DEFAULT: Activation = Activation::LeakyReLU { alpha: 0.01 };

    /// ELU with unit alpha.
    pub const ELU_DEFAULT: Activation = Activation::Elu { alpha: 1.0 };

    /// Validate activation parameters.
    pub fn validate(self) -> Result<()> {
        match self {
            Activation::LeakyReLU { alpha } => {
                if !(alpha.is_finite() && alpha >= 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "leaky ReLU alpha must be finite and >= 0, got {alpha}"
                    )));
                }
            }
            Activation::Elu { alpha } => {
                if !(alpha.is_finite() && alpha >= 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "ELU alpha must be finite and >= 0, got {alpha}"
                    )));
                }
            }
            Activation::Linear | Activation::ReLU | Activation::Sigmoid | Activation::Tanh => {}
        }

        Ok(())
    }

    #[inline]
    pub fn forward(self, x: f32) -> f32 {
        match self {
            Activation::Linear => x,
            Activation::ReLU => x.max(0.0),
            Activation::LeakyReLU { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
            Activation::Elu { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * (x.exp() - 1.0)
                }
            }
        }
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// Softmax over a vector: `e^(x_i) / sum_j e^(x_j)`.
///
/// Inputs are shifted by the maximum before exponentiation so large values do
/// not overflow. Returns an empty vector for empty input.
pub fn softmax(xs: &[f32]) -> Vec<f32> {
    let Some(max) = xs.iter().copied().reduce(f32::max) else {
        return Vec::new();
    };

    let exps: Vec<f32> = xs.iter().map(|&x| (x - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
