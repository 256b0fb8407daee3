//! Mock model for testing

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::SpliceError;
use crate::model::backend::{PredictionVector, SpliceModel};
use crate::score::EncodedSequence;

/// Deterministic model scoring each position by its encoded base
///
/// The score of a position is the weight of the base at that position in
/// the encoded (strand-specific) input. Every call is counted.
#[derive(Debug, Default)]
pub struct MockModel {
    context: usize,
    /// Weights for N, A, C, G, T
    weights: [f32; 5],
    fail: bool,
    calls: AtomicUsize,
}

impl MockModel {
    /// A model that scores every position 0
    pub fn new(context: usize) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// A model whose predictions always fail
    pub fn failing(context: usize) -> Self {
        Self {
            context,
            fail: true,
            ..Self::default()
        }
    }

    /// Set the score emitted for `base` (one of `ACGTN`)
    pub fn with_base_score(mut self, base: u8, score: f32) -> Self {
        let idx = match base.to_ascii_uppercase() {
            b'A' => 1,
            b'C' => 2,
            b'G' => 3,
            b'T' => 4,
            _ => 0,
        };
        self.weights[idx] = score;
        self
    }

    /// Number of predictions made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SpliceModel for MockModel {
    fn context(&self) -> usize {
        self.context
    }

    fn predict(&self, input: &EncodedSequence) -> Result<PredictionVector, SpliceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SpliceError::model("mock model failure"));
        }

        let codes = input.codes();
        if codes.len() < 2 * self.context {
            return Err(SpliceError::model(format!(
                "input of length {} is shorter than twice the context {}",
                codes.len(),
                self.context
            )));
        }

        Ok(codes[self.context..codes.len() - self.context]
            .iter()
            .map(|&c| self.weights[c as usize])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Strand;
    use crate::score::encode;

    #[test]
    fn test_scores_by_base() {
        let model = MockModel::new(1).with_base_score(b'G', 2.0).with_base_score(b'c', 1.0);
        let out = model.predict(&encode("AGCGT", Strand::Plus)).unwrap();
        assert_eq!(out, vec![2.0, 1.0, 2.0]);
        assert_eq!(model.call_count(), 1);
    }

    #[test]
    fn test_minus_strand_sees_complement() {
        let model = MockModel::new(0).with_base_score(b'C', 1.0);
        // GAA reversed and complemented is TTC
        let out = model.predict(&encode("GAA", Strand::Minus)).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_failing() {
        let model = MockModel::failing(0);
        assert!(matches!(
            model.predict(&encode("A", Strand::Plus)),
            Err(SpliceError::Model { .. })
        ));
        assert_eq!(model.call_count(), 1);
    }
}
