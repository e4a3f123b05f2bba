//! Property tests for best-summary selection.

use chrono::Utc;
use proptest::prelude::*;
use quarry_core::types::SnapshotSummary;

fn summaries(losses: &[u8]) -> Vec<SnapshotSummary> {
    let saved_at = Utc::now();
    losses
        .iter()
        .enumerate()
        .map(|(round, loss)| SnapshotSummary {
            round,
            epoch: 1,
            validation_loss: f64::from(*loss) / 10.0,
            saved_at,
        })
        .collect()
}

proptest! {
    #[test]
    fn best_is_minimum_loss_with_earliest_tie(
        losses in prop::collection::vec(0u8..6, 1..16)
    ) {
        let all = summaries(&losses);
        let best = SnapshotSummary::best_of(&all).unwrap();

        let min = *losses.iter().min().unwrap();
        prop_assert_eq!(best.round, losses.iter().position(|&l| l == min).unwrap());
        prop_assert!(all.iter().all(|s| s.validation_loss >= best.validation_loss));
    }

    #[test]
    fn best_does_not_depend_on_input_order(
        shuffled in prop::collection::vec(0u8..6, 1..16)
            .prop_flat_map(|losses| Just(summaries(&losses)).prop_shuffle())
    ) {
        let mut ordered = shuffled.clone();
        ordered.sort_by_key(|s| s.round);

        prop_assert_eq!(
            SnapshotSummary::best_of(&shuffled).map(|s| s.round),
            SnapshotSummary::best_of(&ordered).map(|s| s.round)
        );
    }
}

#[test]
fn no_summaries_means_no_best() {
    let empty: Vec<SnapshotSummary> = Vec::new();
    assert_eq!(SnapshotSummary::best_of(&empty), None);
}
