//! Training.
//!
//! Per-sample gradient descent over one layer at a time: the prediction is
//! the sum of the layer's activated outputs, the gradient is its distance to
//! the normalized target, and every weight entry is updated with its own
//! input feature value. Lasso/Ridge terms are added to the gradient per
//! weight (Elastic-Net when both are enabled); the bias update never carries
//! a regularization term. The learning rate decays at each quarter of the
//! epoch budget and training stops early once the absolute error falls below
//! the configured tolerance.

use std::path::Path;

use log::{debug, error, info};

use crate::layer::Layer;
use crate::network::{
    Network, HIDDEN_LAYER_FIRST, HIDDEN_LAYER_SECOND, OUTPUT_OUTER_LAYER,
};
use crate::{Dataset, Error, Result, TrainConfig};

/// Percentage error between a prediction and a nonzero target.
pub fn calculate_error(predicted: f32, target: f32) -> Result<f32> {
    if target == 0.0 {
        return Err(Error::InvalidData(
            "error percentage is undefined for a zero target".to_owned(),
        ));
    }
    Ok((predicted - target) / target * 100.0)
}

/// Lasso penalty for one weight entry: `regularization * sign(weight)`,
/// with `sign(0)` treated as +1.
#[inline]
fn lasso_term(regularization: f32, weight: f32) -> f32 {
    if weight >= 0.0 {
        regularization
    } else {
        -regularization
    }
}

/// Ridge penalty for one weight entry: `regularization * weight`.
#[inline]
fn ridge_term(regularization: f32, weight: f32) -> f32 {
    regularization * weight
}

/// Decay the learning rate at each quarter of the epoch budget.
///
/// `epochs / 4 == 0` means no decay point exists and the rate is unchanged.
pub fn learning_rate_decay(epoch: usize, epochs: usize, rate: f32, decay: f32) -> f32 {
    let quarter = epochs / 4;
    if quarter == 0 || epoch == 0 || epoch % quarter != 0 {
        rate
    } else {
        rate * decay
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Result of a single-layer training run.
pub enum TrainOutcome {
    /// The absolute error fell below the tolerance at `epoch`.
    Converged { epoch: usize, error: f32 },
    /// The epoch budget ran out before reaching the tolerance.
    Exhausted { error: f32 },
}

impl TrainOutcome {
    #[inline]
    pub fn converged(self) -> bool {
        matches!(self, TrainOutcome::Converged { .. })
    }

    /// The final absolute prediction error.
    #[inline]
    pub fn error(self) -> f32 {
        match self {
            TrainOutcome::Converged { error, .. } | TrainOutcome::Exhausted { error } => error,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    cfg: TrainConfig,
}

impl Trainer {
    pub fn new(cfg: TrainConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    #[inline]
    pub fn config(&self) -> &TrainConfig {
        &self.cfg
    }

    /// Apply one regularized gradient-descent step to every weight entry,
    /// then the plain gradient step to the shared bias.
    ///
    /// With both regularization flags off the raw gradient is applied exactly
    /// once per entry.
    fn update_weights(&self, layer: &mut Layer, gradient: f32, learning_rate: f32) {
        let input = layer.input().to_vec();

        for row in layer.weights_mut() {
            for (j, weight) in row.iter_mut().enumerate() {
                let mut term = gradient;
                if self.cfg.lasso {
                    term += lasso_term(self.cfg.regularization, *weight);
                }
                if self.cfg.ridge {
                    term += ridge_term(self.cfg.regularization, *weight);
                }
                *weight -= learning_rate * term * input[j];
            }
        }

        *layer.bias_mut() -= learning_rate * gradient;
    }

    /// Train one layer on a single (input, target) pair.
    ///
    /// Each epoch copies `input` into the layer's buffer, computes the
    /// prediction as the sum of the layer's outputs, applies the regularized
    /// update and the decay schedule, and stops early once the tolerance is
    /// met. The final weights and bias stay in the layer.
    pub fn train(&self, layer: &mut Layer, input: &[f32], target: f32) -> Result<TrainOutcome> {
        let mut learning_rate = self.cfg.learning_rate;
        let mut last_error = f32::INFINITY;

        for epoch in 0..self.cfg.epochs {
            layer.set_input(input);
            let prediction: f32 = layer.outputs().iter().sum();
            let gradient = prediction - target;

            self.update_weights(layer, gradient, learning_rate);

            if epoch % 100 == 0 {
                if let Ok(pct) = calculate_error(prediction, target) {
                    let result: f32 = layer.outputs().iter().sum();
                    info!(
                        "epoch {epoch}: error {pct:.1}%, prediction {:.4}, result {result:.4}",
                        prediction * 10.0
                    );
                }
            }

            learning_rate =
                learning_rate_decay(epoch, self.cfg.epochs, learning_rate, self.cfg.learning_decay);

            last_error = (prediction - target).abs();
            if last_error < self.cfg.error_tolerance {
                return Ok(TrainOutcome::Converged {
                    epoch,
                    error: last_error,
                });
            }
        }

        Ok(TrainOutcome::Exhausted { error: last_error })
    }

    /// Train the three-layer chain across every sample of `category`, then
    /// persist all layers' parameters to `path`.
    ///
    /// For each 1-based sample index the first hidden layer trains on the raw
    /// sample, the second on the first's propagated output, and the output
    /// layer on the second's. A failed save is reported but does not discard
    /// the trained in-memory parameters.
    pub fn train_on_dataset<P: AsRef<Path>>(
        &self,
        network: &mut Network,
        data: &Dataset,
        category: &str,
        path: P,
    ) -> Result<()> {
        let sample_count = data.samples(category)?.len();

        for number in 1..=sample_count {
            let sample = data.sample(category, number)?.to_vec();
            let target = data.normalized_target(number);

            let first_out = {
                let layer = require_layer(network, HIDDEN_LAYER_FIRST)?;
                self.train(layer, &sample, target)?;
                layer.outputs()
            };

            let second_out = {
                let layer = require_layer(network, HIDDEN_LAYER_SECOND)?;
                self.train(layer, &first_out, target)?;
                layer.outputs()
            };

            let outer = require_layer(network, OUTPUT_OUTER_LAYER)?;
            let outcome = self.train(outer, &second_out, target)?;

            let result: f32 = outer.outputs().iter().sum();
            info!(
                "sample {number} of '{category}' done ({}), result: {:.0}",
                if outcome.converged() { "converged" } else { "epochs exhausted" },
                result * 10.0
            );
            if let Some(compared) = outer.comparator_outputs() {
                debug!("comparator view for sample {number}: {compared:?}");
            }
        }

        if let Err(e) = network.save_parameters(path) {
            error!("failed to save trained parameters: {e}");
        }
        Ok(())
    }
}

fn require_layer<'a>(network: &'a mut Network, name: &str) -> Result<&'a mut Layer> {
    network
        .get_layer_mut(name)
        .ok_or_else(|| Error::InvalidConfig(format!("network has no layer named '{name}'")))
}
