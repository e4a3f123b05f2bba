use std::collections::HashSet;

use proptest::prelude::*;
use quarry_core::types::{Example, Label};
use quarry_data::{partition, SplitSizes, UnlabeledReservoir};

fn reservoir(pos: usize, neg: usize) -> UnlabeledReservoir<()> {
    UnlabeledReservoir::new(
        (0..pos as u64).map(|i| Example::new(i, (), Label::Positive)).collect(),
        (0..neg as u64).map(|i| Example::new(10_000 + i, (), Label::Negative)).collect(),
    )
}

proptest! {
    #[test]
    fn draw_removes_exactly_k_from_the_front(pos in 0usize..60, k in 0usize..60) {
        prop_assume!(k <= pos);
        let mut r = reservoir(pos, 3);
        let drawn = r.draw(Label::Positive, k).unwrap();
        let ids: Vec<u64> = drawn.iter().map(|e| e.id.value()).collect();
        let expected: Vec<u64> = (0..k as u64).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(r.remaining(Label::Positive), pos - k);
        prop_assert_eq!(r.remaining(Label::Negative), 3);
    }

    #[test]
    fn no_example_is_drawn_twice(
        pos in 0usize..40,
        neg in 0usize..40,
        requests in prop::collection::vec((any::<bool>(), 0usize..15), 0..20),
    ) {
        let mut r = reservoir(pos, neg);
        let mut seen = HashSet::new();
        let mut total = 0usize;
        for (positive, k) in requests {
            let label = if positive { Label::Positive } else { Label::Negative };
            let before = r.remaining(label);
            let draw = r.draw_up_to(label, k);
            prop_assert_eq!(draw.drawn(), k.min(before));
            prop_assert_eq!(r.remaining(label), before - draw.drawn());
            for ex in draw.examples {
                prop_assert!(seen.insert(ex.id));
                total += 1;
            }
        }
        prop_assert_eq!(total + r.len(), pos + neg);
    }

    #[test]
    fn partition_sets_are_disjoint_and_complete(
        extra_pos in 0usize..20,
        extra_neg in 0usize..20,
        v in 0usize..4,
        t in 0usize..4,
        tr in 0usize..6,
    ) {
        let need = v + t + tr;
        let mut examples = Vec::new();
        let mut id = 0u64;
        for _ in 0..need + extra_pos {
            examples.push(Example::new(id, (), Label::Positive));
            id += 1;
        }
        for _ in 0..need + extra_neg {
            examples.push(Example::new(id, (), Label::Negative));
            id += 1;
        }
        let total = examples.len();
        let sizes = SplitSizes { validation: v, test: t, train: tr };
        let (pool, mut reservoir) = partition(examples, sizes).unwrap();

        prop_assert_eq!(pool.validation().len(), 2 * v);
        prop_assert_eq!(pool.test().len(), 2 * t);
        prop_assert_eq!(pool.train().len(), 2 * tr);
        prop_assert_eq!(reservoir.remaining(Label::Positive), extra_pos);
        prop_assert_eq!(reservoir.remaining(Label::Negative), extra_neg);

        let mut seen = HashSet::new();
        for ex in pool.validation().iter().chain(pool.test()).chain(pool.train()) {
            prop_assert!(seen.insert(ex.id));
        }
        for label in Label::ALL {
            let rest = reservoir.remaining(label);
            for ex in reservoir.draw(label, rest).unwrap() {
                prop_assert!(seen.insert(ex.id));
            }
        }
        prop_assert_eq!(seen.len(), total);
    }
}
