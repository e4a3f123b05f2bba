//! Text vectorization configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Vocabulary size including the padding and OOV ids. Default: 10000.
    pub max_tokens: Option<usize>,
    /// Fixed length of every encoded sequence. Default: 250.
    pub sequence_length: Option<usize>,
}

impl VectorizerConfig {
    pub fn effective_max_tokens(&self) -> usize {
        self.max_tokens.unwrap_or(defaults::DEFAULT_MAX_TOKENS)
    }

    pub fn effective_sequence_length(&self) -> usize {
        self.sequence_length.unwrap_or(defaults::DEFAULT_SEQUENCE_LENGTH)
    }
}
