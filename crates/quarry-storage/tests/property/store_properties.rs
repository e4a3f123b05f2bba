//! Property tests for best-snapshot selection.

use proptest::prelude::*;
use quarry_core::traits::SnapshotStore;
use quarry_core::types::SnapshotRecord;
use quarry_storage::MemorySnapshotStore;

proptest! {
    #[test]
    fn best_is_minimum_loss_with_earliest_tie(
        losses in prop::collection::vec(0u8..6, 1..12)
    ) {
        let mut store = MemorySnapshotStore::new();
        for (round, loss) in losses.iter().enumerate() {
            store
                .save(&SnapshotRecord::new(round, 1, f64::from(*loss) / 10.0, round))
                .unwrap();
        }

        let min = *losses.iter().min().unwrap();
        let expected_round = losses.iter().position(|&l| l == min).unwrap();

        let best = store.load_best().unwrap();
        prop_assert_eq!(best.round, expected_round);
        prop_assert_eq!(best.snapshot, expected_round);
        prop_assert_eq!(store.len(), losses.len());
    }

    #[test]
    fn summaries_are_ordered_by_round(
        rounds in prop::collection::btree_set(0usize..50, 0..10)
    ) {
        let mut store = MemorySnapshotStore::new();
        for &round in rounds.iter().rev() {
            store.save(&SnapshotRecord::new(round, 1, 0.5, ())).unwrap();
        }
        let listed: Vec<usize> = store.summaries().iter().map(|s| s.round).collect();
        let expected: Vec<usize> = rounds.into_iter().collect();
        prop_assert_eq!(listed, expected);
    }
}
