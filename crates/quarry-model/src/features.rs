//! Sparse bag-of-tokens features.

use std::collections::BTreeMap;

use quarry_core::errors::ModelError;
use quarry_data::TokenSequence;

/// Sparse feature vector: `(index, value)` pairs sorted by index.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Token counts of `sequence`, padding ignored, scaled to unit L2 norm.
    /// An all-padding sequence yields the empty vector.
    pub fn from_tokens(sequence: &TokenSequence, dimension: usize) -> Result<Self, ModelError> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for id in sequence.tokens() {
            let idx = id as usize;
            if idx >= dimension {
                return Err(ModelError::DimensionMismatch {
                    expected: dimension,
                    actual: idx + 1,
                });
            }
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }
        let norm = counts.values().map(|v| v * v).sum::<f64>().sqrt();
        let entries = if norm > 0.0 {
            counts.into_iter().map(|(i, v)| (i, v / norm)).collect()
        } else {
            Vec::new()
        };
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries.iter().map(|&(i, v)| dense[i] * v).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_normalized_and_padding_ignored() {
        let seq = TokenSequence(vec![2, 2, 3, 0, 0]);
        let v = SparseVector::from_tokens(&seq, 5).unwrap();
        let norm = (4.0f64 + 1.0).sqrt();
        assert_eq!(v.entries().len(), 2);
        assert!((v.entries()[0].1 - 2.0 / norm).abs() < 1e-12);
        assert!((v.entries()[1].1 - 1.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_token_is_rejected() {
        let seq = TokenSequence(vec![9]);
        assert!(matches!(
            SparseVector::from_tokens(&seq, 5),
            Err(ModelError::DimensionMismatch { expected: 5, actual: 10 })
        ));
    }
}
