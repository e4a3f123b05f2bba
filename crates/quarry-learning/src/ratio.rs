//! Per-class sampling shares derived from test-set errors.

use quarry_core::types::{Evaluation, Label};

/// How the next sampling budget is split between the classes.
///
/// With both error counts non-zero the positive share is
/// `fp / (fp + fn)` and the negative share is `fn / (fp + fn)`: each class
/// is sampled in proportion to the errors where the *other* class was
/// predicted as it. When either count is zero the split is 0.5 / 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingRatio {
    positive_weight: u64,
    negative_weight: u64,
    degenerate: bool,
}

impl SamplingRatio {
    /// The 0.5 / 0.5 fallback.
    pub const BALANCED: SamplingRatio = SamplingRatio {
        positive_weight: 1,
        negative_weight: 1,
        degenerate: true,
    };

    pub fn from_errors(false_negatives: usize, false_positives: usize) -> Self {
        if false_negatives == 0 || false_positives == 0 {
            return Self::BALANCED;
        }
        Self {
            positive_weight: false_positives as u64,
            negative_weight: false_negatives as u64,
            degenerate: false,
        }
    }

    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self::from_errors(evaluation.false_negatives, evaluation.false_positives)
    }

    pub fn positive(&self) -> f64 {
        self.positive_weight as f64 / self.total_weight() as f64
    }

    pub fn negative(&self) -> f64 {
        self.negative_weight as f64 / self.total_weight() as f64
    }

    pub fn share(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive(),
            Label::Negative => self.negative(),
        }
    }

    /// True when the fallback split was used.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Per-class draw counts, `floor(share * sampling_size)` each.
    ///
    /// Computed in integers so the floor is exact.
    pub fn allocation(&self, sampling_size: usize) -> Allocation {
        let total = u128::from(self.total_weight());
        let size = sampling_size as u128;
        let floor_of = |weight: u64| (u128::from(weight) * size / total) as usize;
        Allocation {
            positive: floor_of(self.positive_weight),
            negative: floor_of(self.negative_weight),
        }
    }

    fn total_weight(&self) -> u64 {
        self.positive_weight + self.negative_weight
    }
}

/// Requested draw counts for one sampling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub positive: usize,
    pub negative: usize,
}

impl Allocation {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_share_tracks_false_positives() {
        let ratio = SamplingRatio::from_errors(30, 70);
        assert!((ratio.positive() - 0.7).abs() < 1e-12);
        assert!((ratio.negative() - 0.3).abs() < 1e-12);
        assert!(!ratio.is_degenerate());
    }

    #[test]
    fn any_zero_count_falls_back_to_even_split() {
        for (fneg, fpos) in [(0, 12), (12, 0), (0, 0)] {
            let ratio = SamplingRatio::from_errors(fneg, fpos);
            assert_eq!(ratio, SamplingRatio::BALANCED);
            assert_eq!(ratio.positive(), 0.5);
            assert_eq!(ratio.negative(), 0.5);
        }
    }

    #[test]
    fn allocation_floors() {
        let ratio = SamplingRatio::from_errors(30, 70);
        let alloc = ratio.allocation(5000);
        assert_eq!(alloc.positive, 3500);
        assert_eq!(alloc.negative, 1500);

        // 1/3 and 2/3 of 10 floor to 3 and 6.
        let alloc = SamplingRatio::from_errors(2, 1).allocation(10);
        assert_eq!(alloc.positive, 3);
        assert_eq!(alloc.negative, 6);
        assert_eq!(alloc.total(), 9);
    }

    #[test]
    fn small_scenario_allocation() {
        let alloc = SamplingRatio::from_errors(3, 1).allocation(8);
        assert_eq!(alloc.get(Label::Positive), 2);
        assert_eq!(alloc.get(Label::Negative), 6);
    }

    #[test]
    fn balanced_allocation_of_odd_size() {
        let alloc = SamplingRatio::BALANCED.allocation(5);
        assert_eq!(alloc.positive, 2);
        assert_eq!(alloc.negative, 2);
    }
}
