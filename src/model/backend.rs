//! Model capability trait

use std::sync::Arc;

use crate::error::SpliceError;
use crate::score::EncodedSequence;

/// One real score per scored window position
pub type PredictionVector = Vec<f32>;

/// A trained splice-site predictor
///
/// Implementations must be stateless from the caller's point of view:
/// the same input always yields the same output, and a model may be
/// shared across threads.
pub trait SpliceModel: Send + Sync {
    /// Number of input positions trimmed from each side of the window
    fn context(&self) -> usize;

    /// Predict splice-site usage for every position of `input` except the
    /// `context()` flank on each side
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::Model`] if inference fails.
    fn predict(&self, input: &EncodedSequence) -> Result<PredictionVector, SpliceError>;
}

impl<M: SpliceModel + ?Sized> SpliceModel for Box<M> {
    fn context(&self) -> usize {
        (**self).context()
    }

    fn predict(&self, input: &EncodedSequence) -> Result<PredictionVector, SpliceError> {
        (**self).predict(input)
    }
}

impl<M: SpliceModel + ?Sized> SpliceModel for Arc<M> {
    fn context(&self) -> usize {
        (**self).context()
    }

    fn predict(&self, input: &EncodedSequence) -> Result<PredictionVector, SpliceError> {
        (**self).predict(input)
    }
}
