//! Training configuration.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f32,
    /// Multiplicative decay applied at each quarter of the epoch budget.
    pub learning_decay: f32,
    /// Early-stopping threshold on `|prediction - target|`.
    pub error_tolerance: f32,
    /// Regularization strength shared by the Lasso and Ridge terms.
    pub regularization: f32,
    pub lasso: bool,
    pub ridge: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 1000,
            learning_rate: 0.01,
            learning_decay: 0.9,
            error_tolerance: 0.01,
            regularization: 0.001,
            lasso: false,
            ridge: false,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(
                "learning_rate must be finite and > 0".to_owned(),
            ));
        }
        if !(self.learning_decay.is_finite() && self.learning_decay > 0.0 && self.learning_decay <= 1.0)
        {
            return Err(Error::InvalidConfig(format!(
                "learning_decay must be in (0, 1], got {}",
                self.learning_decay
            )));
        }
        if !(self.error_tolerance.is_finite() && self.error_tolerance > 0.0) {
            return Err(Error::InvalidConfig(
                "error_tolerance must be finite and > 0".to_owned(),
            ));
        }
        if !(self.regularization.is_finite() && self.regularization >= 0.0) {
            return Err(Error::InvalidConfig(
                "regularization must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn bad_hyperparameters_are_rejected() {
        let mut cfg = TrainConfig::default();
        cfg.epochs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = TrainConfig::default();
        cfg.learning_rate = -0.1;
        assert!(cfg.validate().is_err());

        let mut cfg = TrainConfig::default();
        cfg.learning_decay = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = TrainConfig::default();
        cfg.regularization = f32::NAN;
        assert!(cfg.validate().is_err());
    }
}
