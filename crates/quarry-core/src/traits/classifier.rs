use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ModelError;
use crate::types::{Evaluation, Example, FitOutcome, FitParams};

/// A trainable binary predictor, opaque to the sampling controller.
///
/// Implementations own both their parameters and their optimizer state.
/// `reset_optimizer` and `restore` are distinct transitions: the first
/// discards optimizer momentum and keeps the live parameters, the second
/// replaces the live parameters with a stored snapshot.
///
/// Every call is blocking and returns a complete result. Any internal
/// parallelism must not change results or their order.
pub trait Classifier {
    /// Feature representation consumed by the model.
    type Features;
    /// Serializable parameter state.
    type Snapshot: Clone + Serialize + DeserializeOwned;

    /// Train until validation loss fails to improve for `params.patience`
    /// consecutive epochs, or `params.max_epochs` is reached.
    ///
    /// Returns the lowest-validation-loss snapshot of this call (not
    /// necessarily the last epoch) and this call's epoch history. The live
    /// parameters are left at the last epoch.
    fn fit(
        &mut self,
        train: &[Example<Self::Features>],
        validation: &[Example<Self::Features>],
        params: FitParams,
    ) -> Result<FitOutcome<Self::Snapshot>, ModelError>;

    /// Probability of the positive class, one per example, each in [0, 1].
    fn predict(&self, examples: &[Example<Self::Features>]) -> Result<Vec<f64>, ModelError>;

    /// Accuracy, loss, and confusion counts at the 0.5 threshold.
    fn evaluate(&self, examples: &[Example<Self::Features>]) -> Result<Evaluation, ModelError> {
        let probabilities = self.predict(examples)?;
        let labels: Vec<_> = examples.iter().map(|e| e.label).collect();
        Ok(Evaluation::from_probabilities(&probabilities, &labels))
    }

    /// Discard optimizer state while keeping the learned parameters.
    fn reset_optimizer(&mut self);

    /// Capture the live parameters.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replace the live parameters with `snapshot`.
    fn restore(&mut self, snapshot: &Self::Snapshot) -> Result<(), ModelError>;
}
