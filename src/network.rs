//! The network: a named, insertion-ordered registry of layers.
//!
//! Propagation order is the insertion order, never map order. The fixed
//! dice-face architecture is two hidden layers feeding one output layer; each
//! layer's input is a copy of the previous layer's output.

use std::path::Path;

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builder::{self, Switch};
use crate::layer::{Layer, LayerKind};
use crate::params::ParamSet;
use crate::{Activation, Error, Init, Result};

pub const HIDDEN_LAYER_FIRST: &str = "hidden_layer_first";
pub const HIDDEN_LAYER_SECOND: &str = "hidden_layer_second";
pub const OUTPUT_OUTER_LAYER: &str = "output_outer_layer";

#[derive(Debug, Clone, Copy)]
/// Neuron counts for the fixed three-layer chain.
pub struct Topology {
    pub hidden_first: usize,
    pub hidden_second: usize,
    pub output: usize,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            hidden_first: 6,
            hidden_second: 4,
            output: 2,
        }
    }
}

#[derive(Debug)]
pub struct Network {
    layers: Vec<(String, Layer)>,
    restored: Option<ParamSet>,
    training: bool,
    init: Init,
}

impl Network {
    pub fn new(training: bool, init: Init) -> Self {
        Self {
            layers: Vec::new(),
            restored: None,
            training,
            init,
        }
    }

    #[inline]
    pub fn training(&self) -> bool {
        self.training
    }

    /// Propagate through one layer.
    ///
    /// Structurally trivial, but the contractual single entry point all
    /// chained layers go through, so intermediate activation semantics stay
    /// uniform across architectures.
    #[inline]
    pub fn propagate(&self, layer: &Layer) -> Vec<f32> {
        layer.outputs()
    }

    /// Register `layer` under `name`, replacing any existing layer with the
    /// same name in place (insertion order is preserved).
    pub fn add_layer(&mut self, name: &str, layer: Layer) {
        if let Some(entry) = self.layers.iter_mut().find(|(n, _)| n == name) {
            entry.1 = layer;
        } else {
            self.layers.push((name.to_owned(), layer));
        }
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<Layer> {
        let idx = self.layers.iter().position(|(n, _)| n == name)?;
        Some(self.layers.remove(idx).1)
    }

    pub fn get_layer(&self, name: &str) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, layer)| layer)
    }

    pub fn get_layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, layer)| layer)
    }

    /// Layer names in architectural (insertion) order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(name, _)| name.as_str())
    }

    /// Load a persisted parameter set for subsequent layer creation.
    ///
    /// A missing file is not an error: the network falls back to fresh
    /// initialization with a warning. A present-but-malformed file is.
    pub fn load_parameters<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let p = path.as_ref();
        if !p.exists() {
            warn!(
                "parameter file {} not found, falling back to fresh initialization",
                p.display()
            );
            self.restored = None;
            return Ok(());
        }
        self.restored = Some(ParamSet::load(p)?);
        Ok(())
    }

    /// Create a layer of the requested variant and register it under `name`.
    ///
    /// Weights and bias come from the restored parameter set when it holds an
    /// entry for `name`, otherwise from fresh initialization.
    #[allow(clippy::too_many_arguments)]
    pub fn create_layer<R: Rng + ?Sized>(
        &mut self,
        kind: LayerKind,
        name: &str,
        input: &[f32],
        neuron_count: usize,
        activation: Activation,
        switch: Switch,
        rng: &mut R,
    ) -> Result<()> {
        activation.validate()?;

        let existing_weights = self.restored.as_ref().and_then(|p| p.weights_for(name));
        let existing_bias = self.restored.as_ref().and_then(|p| p.bias_for(name));

        let weights = builder::initial_weights(
            self.training,
            input.len(),
            neuron_count,
            existing_weights,
            self.init,
            rng,
        )?;
        let bias = builder::initial_bias(self.training, existing_bias, self.init);
        let switches = builder::resolve_switches(switch, neuron_count)?;

        let layer = Layer::new(kind, input.to_vec(), weights, bias, activation, switches);
        self.add_layer(name, layer);
        Ok(())
    }

    /// Assemble the fixed three-layer architecture from `input_dataset`,
    /// wiring each layer's input to a copy of the previous layer's output.
    pub fn build<R: Rng + ?Sized>(
        &mut self,
        input_dataset: &[f32],
        topology: Topology,
        rng: &mut R,
    ) -> Result<()> {
        if input_dataset.is_empty() {
            return Err(Error::InvalidConfig(
                "input dataset must not be empty".to_owned(),
            ));
        }

        self.create_layer(
            LayerKind::Hidden,
            HIDDEN_LAYER_FIRST,
            input_dataset,
            topology.hidden_first,
            LayerKind::Hidden.default_activation(),
            Switch::All(true),
            rng,
        )?;
        let first_out = self.propagate(self.get_layer(HIDDEN_LAYER_FIRST).expect("just created"));

        self.create_layer(
            LayerKind::Hidden,
            HIDDEN_LAYER_SECOND,
            &first_out,
            topology.hidden_second,
            LayerKind::Hidden.default_activation(),
            Switch::All(true),
            rng,
        )?;
        let second_out =
            self.propagate(self.get_layer(HIDDEN_LAYER_SECOND).expect("just created"));

        self.create_layer(
            LayerKind::Outer,
            OUTPUT_OUTER_LAYER,
            &second_out,
            topology.output,
            LayerKind::Outer.default_activation(),
            Switch::All(true),
            rng,
        )?;

        Ok(())
    }

    /// [`Network::build`] with a deterministic seed.
    pub fn build_with_seed(
        &mut self,
        input_dataset: &[f32],
        topology: Topology,
        seed: u64,
    ) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build(input_dataset, topology, &mut rng)
    }

    /// Persist every registered layer's weights and bias as one unit.
    pub fn save_parameters<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut params = ParamSet::default();
        for (name, layer) in &self.layers {
            params.insert(name, layer.weights().to_vec(), layer.bias());
        }
        params.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_layer(outputs: usize) -> Layer {
        Layer::new(
            LayerKind::Hidden,
            vec![1.0, 2.0],
            vec![vec![0.1, 0.2]; outputs],
            0.0,
            Activation::Linear,
            vec![true; outputs],
        )
    }

    #[test]
    fn registry_crud_preserves_insertion_order() {
        let mut net = Network::new(true, Init::Xavier);
        net.add_layer("a", test_layer(1));
        net.add_layer("b", test_layer(2));
        net.add_layer("a", test_layer(3)); // replace keeps position

        let names: Vec<&str> = net.layer_names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(net.get_layer("a").unwrap().neuron_count(), 3);

        assert!(net.remove_layer("a").is_some());
        assert!(net.get_layer("a").is_none());
        assert!(net.remove_layer("a").is_none());
    }

    #[test]
    fn get_layer_returns_none_for_unknown_names() {
        let net = Network::new(true, Init::Xavier);
        assert!(net.get_layer("input").is_none());
    }

    #[test]
    fn propagate_matches_layer_outputs() {
        let net = Network::new(true, Init::Xavier);
        let layer = test_layer(2);
        assert_eq!(net.propagate(&layer), layer.outputs());
    }

    #[test]
    fn build_registers_the_three_architectural_layers_in_order() {
        let mut net = Network::new(true, Init::Xavier);
        net.build_with_seed(&[1.0, 2.0, 3.0, 4.0], Topology::default(), 0)
            .unwrap();

        let names: Vec<&str> = net.layer_names().collect();
        assert_eq!(
            names,
            [HIDDEN_LAYER_FIRST, HIDDEN_LAYER_SECOND, OUTPUT_OUTER_LAYER]
        );

        let first = net.get_layer(HIDDEN_LAYER_FIRST).unwrap();
        let second = net.get_layer(HIDDEN_LAYER_SECOND).unwrap();
        let outer = net.get_layer(OUTPUT_OUTER_LAYER).unwrap();
        assert_eq!(first.kind(), LayerKind::Hidden);
        assert_eq!(second.input().len(), first.neuron_count());
        assert_eq!(outer.input().len(), second.neuron_count());
        assert_eq!(outer.kind(), LayerKind::Outer);
    }

    #[test]
    fn missing_parameter_file_falls_back_to_fresh_init() {
        let mut net = Network::new(true, Init::Xavier);
        net.load_parameters("/nonexistent/params.bin").unwrap();
        net.build_with_seed(&[1.0, 2.0], Topology::default(), 1).unwrap();
    }

    #[test]
    fn create_layer_restores_persisted_parameters_by_name() {
        let path = std::env::temp_dir().join(format!("dice_net_restore_{}.bin", std::process::id()));

        let mut params = ParamSet::default();
        params.insert("restored", vec![vec![0.1, 0.2], vec![0.3, 0.4]], 0.7);
        params.save(&path).unwrap();

        let mut net = Network::new(false, Init::Xavier);
        net.load_parameters(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut rng = StdRng::seed_from_u64(0);
        net.create_layer(
            LayerKind::Hidden,
            "restored",
            &[1.0, 2.0],
            2,
            Activation::Linear,
            Switch::All(true),
            &mut rng,
        )
        .unwrap();

        let layer = net.get_layer("restored").unwrap();
        assert_eq!(layer.weights(), &[vec![0.1, 0.2], vec![0.3, 0.4]]);
        assert_eq!(layer.bias(), 0.7);
    }

    #[test]
    fn save_parameters_round_trips_through_the_blob() {
        let path = std::env::temp_dir().join(format!("dice_net_save_{}.bin", std::process::id()));

        let mut net = Network::new(true, Init::He);
        net.build_with_seed(&[1.0, 2.0, 3.0], Topology::default(), 7).unwrap();
        net.save_parameters(&path).unwrap();

        let loaded = ParamSet::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            loaded.weights_for(HIDDEN_LAYER_FIRST).unwrap(),
            net.get_layer(HIDDEN_LAYER_FIRST).unwrap().weights()
        );
        assert_eq!(
            loaded.bias_for(OUTPUT_OUTER_LAYER).unwrap(),
            net.get_layer(OUTPUT_OUTER_LAYER).unwrap().bias()
        );
    }
}
