//! Configuration system for Quarry.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod checkpoint_config;
pub mod defaults;
pub mod output_config;
pub mod quarry_config;
pub mod sampling_config;
pub mod split_config;
pub mod training_config;
pub mod vectorizer_config;

pub use checkpoint_config::CheckpointConfig;
pub use output_config::OutputConfig;
pub use quarry_config::{CliOverrides, QuarryConfig};
pub use sampling_config::SamplingConfig;
pub use split_config::SplitConfig;
pub use training_config::TrainingConfig;
pub use vectorizer_config::VectorizerConfig;
