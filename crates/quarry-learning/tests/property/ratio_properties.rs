//! Property tests for the sampling ratio and its allocation.

use proptest::prelude::*;
use quarry_learning::SamplingRatio;

proptest! {
    #[test]
    fn shares_sum_to_one(fneg in 0usize..10_000, fpos in 0usize..10_000) {
        let ratio = SamplingRatio::from_errors(fneg, fpos);
        prop_assert!((ratio.positive() + ratio.negative() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn allocation_never_exceeds_budget(
        fneg in 0usize..10_000,
        fpos in 0usize..10_000,
        size in 0usize..100_000,
    ) {
        let alloc = SamplingRatio::from_errors(fneg, fpos).allocation(size);
        prop_assert!(alloc.total() <= size);
        // Flooring loses at most one example per class.
        prop_assert!(size - alloc.total() <= 1);
    }

    #[test]
    fn positive_share_follows_false_positives(fneg in 1usize..1_000, fpos in 1usize..1_000) {
        let ratio = SamplingRatio::from_errors(fneg, fpos);
        let expected = fpos as f64 / (fpos + fneg) as f64;
        prop_assert!((ratio.positive() - expected).abs() < 1e-12);
        prop_assert_eq!(ratio.positive() > ratio.negative(), fpos > fneg);
    }

    #[test]
    fn zero_error_counts_split_evenly(other in 0usize..1_000, size in 0usize..10_000) {
        for ratio in [SamplingRatio::from_errors(0, other), SamplingRatio::from_errors(other, 0)] {
            prop_assert!(ratio.is_degenerate());
            let alloc = ratio.allocation(size);
            prop_assert_eq!(alloc.positive, size / 2);
            prop_assert_eq!(alloc.negative, size / 2);
        }
    }
}
