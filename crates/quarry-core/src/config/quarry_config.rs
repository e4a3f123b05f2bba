//! Top-level Quarry configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    defaults, CheckpointConfig, OutputConfig, SamplingConfig, SplitConfig, TrainingConfig,
    VectorizerConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`QUARRY_*`)
/// 3. Project config (`quarry.toml`, or an explicit file)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct QuarryConfig {
    pub split: SplitConfig,
    pub sampling: SamplingConfig,
    pub training: TrainingConfig,
    pub vectorizer: VectorizerConfig,
    pub checkpoint: CheckpointConfig,
    pub output: OutputConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub num_iterations: Option<usize>,
    pub sampling_size: Option<usize>,
    pub max_epochs: Option<usize>,
    pub early_stopping_patience: Option<usize>,
    pub checkpoint_dir: Option<String>,
    pub metrics_path: Option<String>,
    pub report_path: Option<String>,
}

impl QuarryConfig {
    /// Load configuration from `root/quarry.toml` (if present), environment
    /// variables, and CLI overrides.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(defaults::PROJECT_CONFIG_FILENAME);
        let project = project_config_path
            .exists()
            .then_some(project_config_path.as_path());
        Self::resolve(project, cli_overrides)
    }

    /// Load configuration from an explicit TOML file, which must exist.
    pub fn load_file(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::resolve(Some(path), cli_overrides)
    }

    fn resolve(project: Option<&Path>, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = project {
            Self::merge_toml_file(&mut config, path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &QuarryConfig) -> Result<(), ConfigError> {
        let failed = |field: &str, message: &str| ConfigError::ValidationFailed {
            field: field.to_string(),
            message: message.to_string(),
        };

        if config.sampling.effective_sampling_size() == 0 {
            return Err(failed("sampling.sampling_size", "must be greater than 0"));
        }
        if config.training.effective_max_epochs() == 0 {
            return Err(failed("training.max_epochs", "must be greater than 0"));
        }
        if config.training.effective_batch_size() == 0 {
            return Err(failed("training.batch_size", "must be greater than 0"));
        }
        let lr = config.training.effective_learning_rate();
        if !(lr.is_finite() && lr > 0.0) {
            return Err(failed("training.learning_rate", "must be a positive number"));
        }
        if !(0.0..1.0).contains(&config.training.effective_momentum()) {
            return Err(failed("training.momentum", "must be in [0, 1)"));
        }
        if config.training.effective_l2() < 0.0 {
            return Err(failed("training.l2", "must not be negative"));
        }
        if config.vectorizer.effective_max_tokens() < 3 {
            return Err(failed(
                "vectorizer.max_tokens",
                "must leave room for padding, OOV, and at least one token",
            ));
        }
        if config.vectorizer.effective_sequence_length() == 0 {
            return Err(failed("vectorizer.sequence_length", "must be greater than 0"));
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut QuarryConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QuarryConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut QuarryConfig, other: &QuarryConfig) {
        // Split
        if other.split.val_split.is_some() {
            base.split.val_split = other.split.val_split;
        }
        if other.split.test_split.is_some() {
            base.split.test_split = other.split.test_split;
        }
        if other.split.train_split.is_some() {
            base.split.train_split = other.split.train_split;
        }
        if other.split.shuffle_seed.is_some() {
            base.split.shuffle_seed = other.split.shuffle_seed;
        }

        // Sampling
        if other.sampling.num_iterations.is_some() {
            base.sampling.num_iterations = other.sampling.num_iterations;
        }
        if other.sampling.sampling_size.is_some() {
            base.sampling.sampling_size = other.sampling.sampling_size;
        }

        // Training
        if other.training.max_epochs.is_some() {
            base.training.max_epochs = other.training.max_epochs;
        }
        if other.training.early_stopping_patience.is_some() {
            base.training.early_stopping_patience = other.training.early_stopping_patience;
        }
        if other.training.batch_size.is_some() {
            base.training.batch_size = other.training.batch_size;
        }
        if other.training.learning_rate.is_some() {
            base.training.learning_rate = other.training.learning_rate;
        }
        if other.training.momentum.is_some() {
            base.training.momentum = other.training.momentum;
        }
        if other.training.l2.is_some() {
            base.training.l2 = other.training.l2;
        }
        if other.training.seed.is_some() {
            base.training.seed = other.training.seed;
        }

        // Vectorizer
        if other.vectorizer.max_tokens.is_some() {
            base.vectorizer.max_tokens = other.vectorizer.max_tokens;
        }
        if other.vectorizer.sequence_length.is_some() {
            base.vectorizer.sequence_length = other.vectorizer.sequence_length;
        }

        // Checkpoint
        if other.checkpoint.dir.is_some() {
            base.checkpoint.dir = other.checkpoint.dir.clone();
        }
        if other.checkpoint.in_memory.is_some() {
            base.checkpoint.in_memory = other.checkpoint.in_memory;
        }

        // Output
        if other.output.metrics_path.is_some() {
            base.output.metrics_path = other.output.metrics_path.clone();
        }
        if other.output.report_path.is_some() {
            base.output.report_path = other.output.report_path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `QUARRY_NUM_ITERATIONS`, `QUARRY_MAX_EPOCHS`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut QuarryConfig) {
        if let Some(v) = env_parse::<usize>("QUARRY_NUM_ITERATIONS") {
            config.sampling.num_iterations = Some(v);
        }
        if let Some(v) = env_parse::<usize>("QUARRY_SAMPLING_SIZE") {
            config.sampling.sampling_size = Some(v);
        }
        if let Some(v) = env_parse::<usize>("QUARRY_MAX_EPOCHS") {
            config.training.max_epochs = Some(v);
        }
        if let Some(v) = env_parse::<usize>("QUARRY_EARLY_STOPPING_PATIENCE") {
            config.training.early_stopping_patience = Some(v);
        }
        if let Some(v) = env_parse::<u64>("QUARRY_TRAINING_SEED") {
            config.training.seed = Some(v);
        }
        if let Ok(val) = std::env::var("QUARRY_CHECKPOINT_DIR") {
            config.checkpoint.dir = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut QuarryConfig, cli: &CliOverrides) {
        if let Some(v) = cli.num_iterations {
            config.sampling.num_iterations = Some(v);
        }
        if let Some(v) = cli.sampling_size {
            config.sampling.sampling_size = Some(v);
        }
        if let Some(v) = cli.max_epochs {
            config.training.max_epochs = Some(v);
        }
        if let Some(v) = cli.early_stopping_patience {
            config.training.early_stopping_patience = Some(v);
        }
        if let Some(ref v) = cli.checkpoint_dir {
            config.checkpoint.dir = Some(v.clone());
        }
        if let Some(ref v) = cli.metrics_path {
            config.output.metrics_path = Some(v.clone());
        }
        if let Some(ref v) = cli.report_path {
            config.output.report_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
