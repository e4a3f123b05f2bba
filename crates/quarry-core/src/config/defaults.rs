// Single source of truth for all default values.

// --- Split (per-class counts) ---
pub const DEFAULT_VAL_SPLIT: usize = 2_500;
pub const DEFAULT_TEST_SPLIT: usize = 2_500;
pub const DEFAULT_TRAIN_SPLIT: usize = 2_500;

// --- Sampling ---
pub const DEFAULT_NUM_ITERATIONS: usize = 3;
pub const DEFAULT_SAMPLING_SIZE: usize = 5_000;

// --- Training ---
pub const DEFAULT_MAX_EPOCHS: usize = 20;
pub const DEFAULT_EARLY_STOPPING_PATIENCE: usize = 4;
pub const DEFAULT_BATCH_SIZE: usize = 32;
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;
pub const DEFAULT_MOMENTUM: f64 = 0.9;
pub const DEFAULT_L2: f64 = 0.0;
pub const DEFAULT_TRAINING_SEED: u64 = 42;

// --- Vectorizer ---
pub const DEFAULT_MAX_TOKENS: usize = 10_000;
pub const DEFAULT_SEQUENCE_LENGTH: usize = 250;

// --- Checkpoints ---
pub const DEFAULT_CHECKPOINT_DIR: &str = "checkpoints";
pub const DEFAULT_IN_MEMORY_CHECKPOINTS: bool = false;

// --- Project file ---
pub const PROJECT_CONFIG_FILENAME: &str = "quarry.toml";
