/// Quarry version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Probability above which a prediction counts as positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Token id reserved for padding in vectorized sequences.
pub const PAD_TOKEN_ID: u32 = 0;

/// Token id reserved for out-of-vocabulary tokens.
pub const OOV_TOKEN_ID: u32 = 1;

/// Number of token ids reserved ahead of the fitted vocabulary.
pub const RESERVED_TOKEN_IDS: usize = 2;

/// Clamp applied to probabilities before taking logarithms in the loss.
pub const PROBABILITY_EPSILON: f64 = 1e-7;
