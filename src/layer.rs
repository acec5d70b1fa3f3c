//! Layers.
//!
//! A [`Layer`] owns one neuron group's weights, shared bias, enable switches
//! and input buffer. The two variants differ only in their default activation
//! and, for the output layer, an optional comparator activation used for
//! reporting.

use crate::builder;
use crate::Activation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Layer variant tag.
pub enum LayerKind {
    Hidden,
    Outer,
}

impl LayerKind {
    /// Default activation for the variant: leaky ReLU for hidden layers,
    /// linear for the output layer.
    pub fn default_activation(self) -> Activation {
        match self {
            LayerKind::Hidden => Activation::LEAKY_RELU_DEFAULT,
            LayerKind::Outer => Activation::Linear,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    /// One weight row per neuron; each row has `input.len()` entries.
    weights: Vec<Vec<f32>>,
    /// One bias shared across the layer's neurons.
    bias: f32,
    /// Owned input buffer, overwritten (never aliased) before each step.
    input: Vec<f32>,
    activation: Activation,
    /// Reporting-only secondary activation (output layer).
    comparator: Option<Activation>,
    switches: Vec<bool>,
}

impl Layer {
    pub fn new(
        kind: LayerKind,
        input: Vec<f32>,
        weights: Vec<Vec<f32>>,
        bias: f32,
        activation: Activation,
        switches: Vec<bool>,
    ) -> Self {
        debug_assert_eq!(weights.len(), switches.len());

        let comparator = match kind {
            LayerKind::Hidden => None,
            LayerKind::Outer => Some(Activation::Sigmoid),
        };
        Self {
            kind,
            weights,
            bias,
            input,
            activation,
            comparator,
            switches,
        }
    }

    #[inline]
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    #[inline]
    pub fn neuron_count(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn input(&self) -> &[f32] {
        &self.input
    }

    /// Replace the input buffer with a fresh copy of `input`.
    #[inline]
    pub fn set_input(&mut self, input: &[f32]) {
        self.input.clear();
        self.input.extend_from_slice(input);
    }

    #[inline]
    pub fn weights(&self) -> &[Vec<f32>] {
        &self.weights
    }

    #[inline]
    pub fn weights_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.weights
    }

    #[inline]
    pub fn bias(&self) -> f32 {
        self.bias
    }

    #[inline]
    pub fn bias_mut(&mut self) -> &mut f32 {
        &mut self.bias
    }

    #[inline]
    pub fn switches(&self) -> &[bool] {
        &self.switches
    }

    /// The per-neuron activated outputs for the current input buffer.
    ///
    /// This is the single capability the network and trainer depend on.
    pub fn outputs(&self) -> Vec<f32> {
        builder::neuron_outputs(
            &self.input,
            &self.weights,
            self.bias,
            &self.switches,
            self.activation,
        )
    }

    /// Outputs under the comparator activation, if the variant carries one.
    /// Reporting detail only; never part of the learning contract.
    pub fn comparator_outputs(&self) -> Option<Vec<f32>> {
        self.comparator.map(|activation| {
            builder::neuron_outputs(
                &self.input,
                &self.weights,
                self.bias,
                &self.switches,
                activation,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_neuron_layer(kind: LayerKind, activation: Activation) -> Layer {
        Layer::new(
            kind,
            vec![1.0, 2.0],
            vec![vec![0.5, -0.5], vec![0.3, -0.3]],
            1.0,
            activation,
            vec![true, true],
        )
    }

    #[test]
    fn outputs_apply_weighted_sum_then_activation() {
        let layer = two_neuron_layer(LayerKind::Hidden, Activation::Linear);
        let out = layer.outputs();
        assert!((out[0] - 0.5).abs() < 1e-6); // 0.5 - 1.0 + 1.0
        assert!((out[1] - 0.7).abs() < 1e-6); // 0.3 - 0.6 + 1.0
    }

    #[test]
    fn set_input_copies_the_new_buffer() {
        let mut layer = two_neuron_layer(LayerKind::Hidden, Activation::Linear);
        let mut next = vec![3.0, 4.0];
        layer.set_input(&next);
        next[0] = 99.0;
        assert_eq!(layer.input(), &[3.0, 4.0]);
    }

    #[test]
    fn only_outer_layers_carry_a_comparator() {
        let hidden = two_neuron_layer(LayerKind::Hidden, Activation::LEAKY_RELU_DEFAULT);
        assert!(hidden.comparator_outputs().is_none());

        let outer = two_neuron_layer(LayerKind::Outer, Activation::Linear);
        let compared = outer.comparator_outputs().unwrap();
        assert_eq!(compared.len(), 2);
        assert!(compared.iter().all(|&y| (0.0..=1.0).contains(&y)));
    }

    #[test]
    fn variant_defaults_match_their_role() {
        assert_eq!(
            LayerKind::Hidden.default_activation(),
            Activation::LEAKY_RELU_DEFAULT
        );
        assert_eq!(LayerKind::Outer.default_activation(), Activation::Linear);
    }
}
