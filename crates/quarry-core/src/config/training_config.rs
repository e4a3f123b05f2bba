//! Classifier training configuration.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::types::FitParams;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TrainingConfig {
    /// Epoch cap per fit call. Default: 20.
    pub max_epochs: Option<usize>,
    /// Non-improving epochs tolerated before stopping. Default: 4.
    pub early_stopping_patience: Option<usize>,
    /// Mini-batch size. Default: 32.
    pub batch_size: Option<usize>,
    /// SGD step size. Default: 0.05.
    pub learning_rate: Option<f64>,
    /// Momentum coefficient in [0, 1). Default: 0.9.
    pub momentum: Option<f64>,
    /// L2 penalty on weights. Default: 0.0.
    pub l2: Option<f64>,
    /// Seed for per-epoch shuffling of the training order. Default: 42.
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub fn effective_max_epochs(&self) -> usize {
        self.max_epochs.unwrap_or(defaults::DEFAULT_MAX_EPOCHS)
    }

    pub fn effective_early_stopping_patience(&self) -> usize {
        self.early_stopping_patience
            .unwrap_or(defaults::DEFAULT_EARLY_STOPPING_PATIENCE)
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(defaults::DEFAULT_BATCH_SIZE)
    }

    pub fn effective_learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or(defaults::DEFAULT_LEARNING_RATE)
    }

    pub fn effective_momentum(&self) -> f64 {
        self.momentum.unwrap_or(defaults::DEFAULT_MOMENTUM)
    }

    pub fn effective_l2(&self) -> f64 {
        self.l2.unwrap_or(defaults::DEFAULT_L2)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(defaults::DEFAULT_TRAINING_SEED)
    }

    /// Stopping parameters handed to every `fit` call.
    pub fn fit_params(&self) -> FitParams {
        FitParams {
            max_epochs: self.effective_max_epochs(),
            patience: self.effective_early_stopping_patience(),
        }
    }
}
