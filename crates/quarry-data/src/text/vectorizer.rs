use std::time::Instant;

use quarry_core::constants::PAD_TOKEN_ID;
use quarry_core::errors::DataError;
use quarry_core::types::Example;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::standardize::tokenize;
use super::vocabulary::Vocabulary;

/// A fixed-length sequence of token ids, right-padded with 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSequence(pub Vec<u32>);

impl TokenSequence {
    pub fn ids(&self) -> &[u32] {
        &self.0
    }

    /// Ids with padding removed.
    pub fn tokens(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied().filter(|&id| id != PAD_TOKEN_ID)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Maps raw text to fixed-length integer sequences.
///
/// The vocabulary must be adapted before encoding; fit it on the initial
/// train split only so nothing leaks from validation, test, or reservoir.
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    max_tokens: usize,
    sequence_length: usize,
    vocabulary: Option<Vocabulary>,
}

impl TextVectorizer {
    pub fn new(max_tokens: usize, sequence_length: usize) -> Self {
        Self {
            max_tokens,
            sequence_length,
            vocabulary: None,
        }
    }

    /// Learn the vocabulary from `texts`, replacing any earlier one.
    pub fn adapt<S: AsRef<str> + Sync>(&mut self, texts: &[S]) {
        let vocabulary = Vocabulary::fit(texts, self.max_tokens);
        debug!(size = vocabulary.size(), texts = texts.len(), "vocabulary adapted");
        self.vocabulary = Some(vocabulary);
    }

    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Width of the id space, which is the feature dimension downstream.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    pub fn encode(&self, text: &str) -> Result<TokenSequence, DataError> {
        let vocabulary = self.vocabulary.as_ref().ok_or(DataError::VocabularyNotFitted)?;
        Ok(self.encode_with(vocabulary, text))
    }

    fn encode_with(&self, vocabulary: &Vocabulary, text: &str) -> TokenSequence {
        let mut ids: Vec<u32> = tokenize(text)
            .iter()
            .take(self.sequence_length)
            .map(|t| vocabulary.id(t))
            .collect();
        ids.resize(self.sequence_length, PAD_TOKEN_ID);
        TokenSequence(ids)
    }

    /// Encode a batch of text examples in parallel, preserving order,
    /// identity, and labels.
    pub fn encode_examples(
        &self,
        examples: Vec<Example<String>>,
    ) -> Result<Vec<Example<TokenSequence>>, DataError> {
        let vocabulary = self.vocabulary.as_ref().ok_or(DataError::VocabularyNotFitted)?;
        let started = Instant::now();
        let count = examples.len();
        let encoded = examples
            .into_par_iter()
            .map(|ex| ex.map_features(|text| self.encode_with(vocabulary, &text)))
            .collect();
        debug!(
            examples = count,
            vectorize_duration_ms = started.elapsed().as_millis() as u64,
            "encoded batch"
        );
        Ok(encoded)
    }
}
