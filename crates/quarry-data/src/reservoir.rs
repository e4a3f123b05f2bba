//! The unlabeled reservoir: per-class FIFO queues of held-back examples.

use std::collections::VecDeque;

use quarry_core::errors::DataError;
use quarry_core::types::{Example, Label};

/// Examples whose labels are withheld from training until drawn.
///
/// Each class is consumed strictly from the front. A drawn example leaves
/// the reservoir for good.
#[derive(Debug, Clone)]
pub struct UnlabeledReservoir<F> {
    positives: VecDeque<Example<F>>,
    negatives: VecDeque<Example<F>>,
}

/// Result of a clamped draw.
#[derive(Debug, Clone)]
pub struct Draw<F> {
    pub label: Label,
    pub requested: usize,
    pub examples: Vec<Example<F>>,
}

impl<F> Draw<F> {
    pub fn drawn(&self) -> usize {
        self.examples.len()
    }

    /// How many requested examples the reservoir could not supply.
    pub fn shortfall(&self) -> usize {
        self.requested - self.examples.len()
    }
}

impl<F> UnlabeledReservoir<F> {
    pub fn new(positives: Vec<Example<F>>, negatives: Vec<Example<F>>) -> Self {
        Self {
            positives: positives.into(),
            negatives: negatives.into(),
        }
    }

    fn queue(&self, label: Label) -> &VecDeque<Example<F>> {
        match label {
            Label::Positive => &self.positives,
            Label::Negative => &self.negatives,
        }
    }

    fn queue_mut(&mut self, label: Label) -> &mut VecDeque<Example<F>> {
        match label {
            Label::Positive => &mut self.positives,
            Label::Negative => &mut self.negatives,
        }
    }

    pub fn remaining(&self, label: Label) -> usize {
        self.queue(label).len()
    }

    pub fn len(&self) -> usize {
        self.positives.len() + self.negatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_exhausted(&self, label: Label) -> bool {
        self.queue(label).is_empty()
    }

    /// Remove and return the first `k` examples of `label`, in order.
    ///
    /// Fails with `ReservoirUnderflow` if fewer than `k` remain; nothing is
    /// removed in that case.
    pub fn draw(&mut self, label: Label, k: usize) -> Result<Vec<Example<F>>, DataError> {
        let available = self.remaining(label);
        if k > available {
            return Err(DataError::ReservoirUnderflow {
                label,
                requested: k,
                available,
            });
        }
        Ok(self.queue_mut(label).drain(..k).collect())
    }

    /// Draw `min(k, remaining)` examples of `label`.
    pub fn draw_up_to(&mut self, label: Label, k: usize) -> Draw<F> {
        let take = k.min(self.remaining(label));
        let examples = self.queue_mut(label).drain(..take).collect();
        Draw {
            label,
            requested: k,
            examples,
        }
    }

    /// Transform the feature payload of both queues, keeping order.
    pub fn try_map_queues<G, E>(
        self,
        mut f: impl FnMut(Vec<Example<F>>) -> Result<Vec<Example<G>>, E>,
    ) -> Result<UnlabeledReservoir<G>, E> {
        Ok(UnlabeledReservoir {
            positives: f(self.positives.into())?.into(),
            negatives: f(self.negatives.into())?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservoir(pos: u64, neg: u64) -> UnlabeledReservoir<()> {
        UnlabeledReservoir::new(
            (0..pos).map(|i| Example::new(i, (), Label::Positive)).collect(),
            (100..100 + neg).map(|i| Example::new(i, (), Label::Negative)).collect(),
        )
    }

    #[test]
    fn draw_takes_from_the_front() {
        let mut r = reservoir(5, 5);
        let drawn = r.draw(Label::Positive, 2).unwrap();
        let ids: Vec<u64> = drawn.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(r.remaining(Label::Positive), 3);
        assert_eq!(r.remaining(Label::Negative), 5);
    }

    #[test]
    fn over_request_is_rejected_without_side_effects() {
        let mut r = reservoir(2, 0);
        let err = r.draw(Label::Positive, 3).unwrap_err();
        assert!(matches!(
            err,
            DataError::ReservoirUnderflow {
                requested: 3,
                available: 2,
                ..
            }
        ));
        assert_eq!(r.remaining(Label::Positive), 2);
    }

    #[test]
    fn clamped_draw_reports_shortfall() {
        let mut r = reservoir(3, 1);
        let draw = r.draw_up_to(Label::Negative, 4);
        assert_eq!(draw.drawn(), 1);
        assert_eq!(draw.shortfall(), 3);
        assert!(r.is_exhausted(Label::Negative));
        let empty = r.draw_up_to(Label::Negative, 2);
        assert_eq!(empty.drawn(), 0);
    }
}
