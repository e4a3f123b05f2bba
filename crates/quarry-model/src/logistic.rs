//! Logistic regression over bag-of-tokens features.

use std::time::Instant;

use quarry_core::config::TrainingConfig;
use quarry_core::constants::DECISION_THRESHOLD;
use quarry_core::errors::ModelError;
use quarry_core::traits::Classifier;
use quarry_core::types::{
    binary_cross_entropy, BestSnapshot, EpochMetrics, Evaluation, Example, FitOutcome, FitParams,
    Label,
};
use quarry_data::TokenSequence;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::features::SparseVector;
use crate::optimizer::MomentumSgd;

/// Hyperparameters fixed for the lifetime of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionConfig {
    /// Feature dimension; equals the vectorizer's `max_tokens`.
    pub dimension: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub l2: f64,
    pub seed: u64,
}

impl LogisticRegressionConfig {
    pub fn from_training(training: &TrainingConfig, dimension: usize) -> Self {
        Self {
            dimension,
            batch_size: training.effective_batch_size(),
            learning_rate: training.effective_learning_rate(),
            momentum: training.effective_momentum(),
            l2: training.effective_l2(),
            seed: training.effective_seed(),
        }
    }
}

/// Serializable parameter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Binary logistic regression trained by mini-batch SGD with momentum.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    weights: Vec<f64>,
    bias: f64,
    optimizer: MomentumSgd,
    /// Epochs run across every `fit` call; salts the shuffle seed so each
    /// epoch sees a different but reproducible order.
    epochs_trained: u64,
}

impl LogisticRegression {
    /// A zero-initialized model.
    pub fn new(config: LogisticRegressionConfig) -> Self {
        let optimizer = MomentumSgd::new(config.dimension, config.learning_rate, config.momentum);
        Self {
            weights: vec![0.0; config.dimension],
            bias: 0.0,
            optimizer,
            epochs_trained: 0,
            config,
        }
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    pub fn optimizer(&self) -> &MomentumSgd {
        &self.optimizer
    }

    pub fn epochs_trained(&self) -> u64 {
        self.epochs_trained
    }

    fn featurize(
        &self,
        examples: &[Example<TokenSequence>],
    ) -> Result<Vec<SparseVector>, ModelError> {
        examples
            .par_iter()
            .map(|ex| SparseVector::from_tokens(&ex.features, self.config.dimension))
            .collect()
    }

    fn probability(&self, x: &SparseVector) -> f64 {
        sigmoid(x.dot(&self.weights) + self.bias)
    }

    fn probabilities(&self, features: &[SparseVector]) -> Vec<f64> {
        features.par_iter().map(|x| self.probability(x)).collect()
    }

    /// One pass over the training set. Returns mean loss and accuracy
    /// measured on each batch before its update.
    fn run_epoch(&mut self, features: &[SparseVector], labels: &[Label]) -> (f64, f64) {
        let seed = self.config.seed.wrapping_add(self.epochs_trained);
        let mut order: Vec<usize> = (0..features.len()).collect();
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        let mut grad = vec![0.0; self.config.dimension];
        let mut loss_sum = 0.0;
        let mut correct = 0usize;

        for batch in order.chunks(self.config.batch_size.max(1)) {
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut bias_grad = 0.0;

            for &i in batch {
                let p = self.probability(&features[i]);
                let label = labels[i];
                loss_sum += binary_cross_entropy(p, label);
                if (p > DECISION_THRESHOLD) == label.is_positive() {
                    correct += 1;
                }
                let err = p - label.target();
                for &(j, v) in features[i].entries() {
                    grad[j] += err * v;
                }
                bias_grad += err;
            }

            let scale = 1.0 / batch.len() as f64;
            for (g, w) in grad.iter_mut().zip(&self.weights) {
                *g = *g * scale + self.config.l2 * w;
            }
            self.optimizer
                .step(&mut self.weights, &mut self.bias, &grad, bias_grad * scale);
        }

        self.epochs_trained += 1;
        let n = features.len() as f64;
        (loss_sum / n, correct as f64 / n)
    }
}

impl Classifier for LogisticRegression {
    type Features = TokenSequence;
    type Snapshot = ModelSnapshot;

    fn fit(
        &mut self,
        train: &[Example<TokenSequence>],
        validation: &[Example<TokenSequence>],
        params: FitParams,
    ) -> Result<FitOutcome<ModelSnapshot>, ModelError> {
        if train.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if validation.is_empty() {
            return Err(ModelError::EmptyValidationSet);
        }
        if params.max_epochs == 0 {
            return Err(ModelError::InvalidParams {
                reason: "max_epochs must be greater than 0".to_string(),
            });
        }

        let started = Instant::now();
        let train_x = self.featurize(train)?;
        let train_y: Vec<Label> = train.iter().map(|e| e.label).collect();
        let val_x = self.featurize(validation)?;
        let val_y: Vec<Label> = validation.iter().map(|e| e.label).collect();

        let mut history = Vec::with_capacity(params.max_epochs);
        let mut best: Option<BestSnapshot<ModelSnapshot>> = None;
        let mut wait = 0usize;

        for epoch in 1..=params.max_epochs {
            let (loss, accuracy) = self.run_epoch(&train_x, &train_y);
            let val = Evaluation::from_probabilities(&self.probabilities(&val_x), &val_y);

            if !loss.is_finite() || !val.loss.is_finite() {
                return Err(ModelError::NonFiniteLoss { epoch });
            }

            history.push(EpochMetrics {
                epoch,
                loss,
                validation_loss: val.loss,
                accuracy,
                validation_accuracy: val.accuracy,
            });
            debug!(
                epoch,
                loss,
                validation_loss = val.loss,
                validation_accuracy = val.accuracy,
                "epoch finished"
            );

            let improved = best
                .as_ref()
                .map_or(true, |b| val.loss < b.validation_loss);
            if improved {
                best = Some(BestSnapshot {
                    epoch,
                    validation_loss: val.loss,
                    snapshot: self.snapshot(),
                });
                wait = 0;
            } else {
                wait += 1;
                if wait >= params.patience {
                    break;
                }
            }
        }

        // At least one epoch ran and the first epoch always improves.
        let best = best.ok_or(ModelError::InvalidParams {
            reason: "no epoch completed".to_string(),
        })?;
        let stopped_early = history.len() < params.max_epochs;

        info!(
            train = train.len(),
            validation = validation.len(),
            epochs = history.len(),
            best_epoch = best.epoch,
            best_validation_loss = best.validation_loss,
            stopped_early,
            fit_duration_ms = started.elapsed().as_millis() as u64,
            "fit complete"
        );

        Ok(FitOutcome {
            best,
            history,
            stopped_early,
        })
    }

    fn predict(&self, examples: &[Example<TokenSequence>]) -> Result<Vec<f64>, ModelError> {
        let features = self.featurize(examples)?;
        Ok(self.probabilities(&features))
    }

    fn reset_optimizer(&mut self) {
        self.optimizer.reset();
    }

    fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            weights: self.weights.clone(),
            bias: self.bias,
        }
    }

    fn restore(&mut self, snapshot: &ModelSnapshot) -> Result<(), ModelError> {
        if snapshot.weights.len() != self.config.dimension {
            return Err(ModelError::DimensionMismatch {
                expected: self.config.dimension,
                actual: snapshot.weights.len(),
            });
        }
        self.weights.clone_from(&snapshot.weights);
        self.bias = snapshot.bias;
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
