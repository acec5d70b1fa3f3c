//! Persisted parameter set.
//!
//! The trained weights and biases of all architectural layers are written as
//! one binary blob holding exactly two mappings keyed by layer name. The
//! format carries no version tag; saving then loading reproduces identical
//! values. Deserialization validates that both mappings cover the same layer
//! names and that every value is finite.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    /// Layer name -> weight tensor (neuron rows x input columns).
    pub weights: BTreeMap<String, Vec<Vec<f32>>>,
    /// Layer name -> shared bias.
    pub biases: BTreeMap<String, f32>,
}

impl ParamSet {
    /// Record one layer's parameters under `name`.
    pub fn insert(&mut self, name: &str, weights: Vec<Vec<f32>>, bias: f32) {
        self.weights.insert(name.to_owned(), weights);
        self.biases.insert(name.to_owned(), bias);
    }

    /// Restored weights for `name`, if present.
    pub fn weights_for(&self, name: &str) -> Option<Vec<Vec<f32>>> {
        self.weights.get(name).cloned()
    }

    /// Restored bias for `name`, if present.
    pub fn bias_for(&self, name: &str) -> Option<f32> {
        self.biases.get(name).copied()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.weights.keys().eq(self.biases.keys()) {
            return Err(Error::InvalidData(
                "weights and biases must cover the same layer names".to_owned(),
            ));
        }

        for (name, rows) in &self.weights {
            if rows.iter().flatten().any(|v| !v.is_finite()) {
                return Err(Error::InvalidData(format!(
                    "weights for layer '{name}' must contain only finite values"
                )));
            }
        }
        if let Some((name, _)) = self.biases.iter().find(|(_, b)| !b.is_finite()) {
            return Err(Error::InvalidData(format!(
                "bias for layer '{name}' must be finite"
            )));
        }

        Ok(())
    }

    /// Write the parameter set to `path` as a single binary blob.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let p = path.as_ref();
        let bytes = bincode::serialize(self)
            .map_err(|e| Error::Persistence(format!("failed to encode parameters: {e}")))?;
        std::fs::write(p, bytes)
            .map_err(|e| Error::Persistence(format!("failed to write {}: {e}", p.display())))?;
        Ok(())
    }

    /// Load and validate a parameter set from `path`.
    ///
    /// A missing file is an I/O-level [`Error::Persistence`]; callers that
    /// treat it as a fresh-initialization fallback check the path first (see
    /// `Network::load_parameters`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let bytes = std::fs::read(p)
            .map_err(|e| Error::Persistence(format!("failed to read {}: {e}", p.display())))?;
        let params: ParamSet = bincode::deserialize(&bytes)
            .map_err(|e| Error::InvalidData(format!("malformed parameter file {}: {e}", p.display())))?;
        params.validate()?;
        Ok(params)
    }
}
