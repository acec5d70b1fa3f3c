//! Layer construction primitives.
//!
//! These functions resolve a layer's weights, bias and per-neuron enable
//! switches — honoring the restore path when a trained parameter set exists —
//! and provide the single forward-computation primitive shared by both layer
//! variants.

use rand::Rng;

use crate::{Activation, Error, Init, Result};

/// Per-neuron enable switch specification.
///
/// A single boolean broadcasts to every neuron; an explicit list must match
/// the neuron count exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switch {
    All(bool),
    PerNeuron(Vec<bool>),
}

/// Resolve a layer's weight tensor.
///
/// When `training` is false and `existing` holds a restored tensor, that
/// tensor is returned unchanged (its shape is still validated against the
/// requested geometry). Otherwise a fresh `neuron_number x input_size` tensor
/// is drawn uniformly from `init`'s range.
pub fn initial_weights<R: Rng + ?Sized>(
    training: bool,
    input_size: usize,
    neuron_number: usize,
    existing: Option<Vec<Vec<f32>>>,
    init: Init,
    rng: &mut R,
) -> Result<Vec<Vec<f32>>> {
    if input_size == 0 {
        return Err(Error::InvalidConfig("input_size must be > 0".to_owned()));
    }
    if neuron_number == 0 {
        return Err(Error::InvalidConfig("neuron_number must be > 0".to_owned()));
    }

    if !training {
        if let Some(weights) = existing.filter(|w| !w.is_empty()) {
            if weights.len() != neuron_number || weights.iter().any(|row| row.len() != input_size)
            {
                return Err(Error::InvalidData(format!(
                    "restored weights shape ({}, {}) does not match layer geometry ({neuron_number}, {input_size})",
                    weights.len(),
                    weights.first().map_or(0, Vec::len),
                )));
            }
            return Ok(weights);
        }
    }

    let (low, high) = init.range(input_size, neuron_number);
    let weights = (0..neuron_number)
        .map(|_| (0..input_size).map(|_| rng.gen_range(low..high)).collect())
        .collect();
    Ok(weights)
}

/// Resolve a layer's bias: the restored value when not training, else zero.
#[inline]
pub fn initial_bias(training: bool, existing: Option<f32>, init: Init) -> f32 {
    match existing {
        Some(bias) if !training => bias,
        _ => init.bias(),
    }
}

/// Normalize a switch specification into one boolean per neuron.
pub fn resolve_switches(switch: Switch, neuron_number: usize) -> Result<Vec<bool>> {
    match switch {
        Switch::All(enabled) => Ok(vec![enabled; neuron_number]),
        Switch::PerNeuron(switches) => {
            if switches.len() != neuron_number {
                return Err(Error::InvalidConfig(format!(
                    "switch list length {} does not match neuron count {neuron_number}",
                    switches.len()
                )));
            }
            Ok(switches)
        }
    }
}

/// Forward computation for one layer: per neuron, the weighted sum of the
/// input plus the shared bias, passed through `activation`. A disabled
/// neuron's output is forced to zero.
///
/// Shape contract: `weights.len() == switches.len()` and every row has
/// `input.len()` entries.
pub fn neuron_outputs(
    input: &[f32],
    weights: &[Vec<f32>],
    bias: f32,
    switches: &[bool],
    activation: Activation,
) -> Vec<f32> {
    debug_assert_eq!(weights.len(), switches.len());

    weights
        .iter()
        .zip(switches)
        .map(|(row, &enabled)| {
            if !enabled {
                return 0.0;
            }
            debug_assert_eq!(row.len(), input.len());
            let mut sum = bias;
            for (&w, &x) in row.iter().zip(input) {
                sum = w.mul_add(x, sum);
            }
            activation.forward(sum)
        })
        .collect()
}
