//! Ensemble inference on window pairs
//!
//! For one strand, every consulted member predicts the reference and the
//! alternate window; the indel-aligned `alt - ref` deltas are reduced to
//! a [`ScoreVector`] according to the configured [`Reduction`].

use log::debug;

use crate::annotation::Strand;
use crate::config::{GroupSelection, Reduction};
use crate::error::SpliceError;
use crate::model::{ContextGroup, ModelEnsemble, PredictionVector, SpliceModel};
use crate::score::aggregate::{aggregate, mean, reduce, ScoreVector};
use crate::score::align::align;
use crate::score::encode::{encode, EncodedSequence};
use crate::score::window::WindowPair;

/// Runs the selected context groups of an ensemble
#[derive(Debug, Clone)]
pub struct EnsemblePredictor<'a> {
    ensemble: &'a ModelEnsemble,
    groups: Vec<&'a ContextGroup>,
    reduction: Reduction,
}

impl<'a> EnsemblePredictor<'a> {
    /// # Errors
    ///
    /// Returns [`SpliceError::InvalidEnsemble`] if the selection names a
    /// group the ensemble does not have.
    pub fn new(
        ensemble: &'a ModelEnsemble,
        selection: &GroupSelection,
        reduction: Reduction,
    ) -> Result<Self, SpliceError> {
        Ok(Self {
            ensemble,
            groups: ensemble.select(selection)?,
            reduction,
        })
    }

    /// Context flank of the underlying ensemble
    pub fn context(&self) -> usize {
        self.ensemble.context()
    }

    /// Run one model, returning its output in genomic order
    ///
    /// `input` must already be encoded for `strand`; minus-strand output is
    /// reversed back to genomic order.
    pub fn predict<M: SpliceModel + ?Sized>(
        &self,
        model: &M,
        input: &EncodedSequence,
        strand: Strand,
    ) -> Result<PredictionVector, SpliceError> {
        let expected = input.len().saturating_sub(2 * self.context());
        let mut output = model.predict(input)?;
        if output.len() != expected {
            return Err(SpliceError::model(format!(
                "model returned {} positions for a window of {}, expected {}",
                output.len(),
                input.len(),
                expected
            )));
        }
        if strand == Strand::Minus {
            output.reverse();
        }
        Ok(output)
    }

    /// Loss/gain vector of a window pair on one strand
    pub fn score(&self, windows: &WindowPair, strand: Strand, d: usize) -> Result<ScoreVector, SpliceError> {
        let ref_input = encode(windows.reference.sequence(), strand);
        let alt_input = encode(windows.alternate.sequence(), strand);

        let mut groups = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let mut references = Vec::with_capacity(group.len());
            let mut alternates = Vec::with_capacity(group.len());
            for member in group.members() {
                let reference = self.predict(member.as_ref(), &ref_input, strand)?;
                let alternate = self.predict(member.as_ref(), &alt_input, strand)?;
                let (reference, alternate) = align(reference, alternate, d);
                references.push(reference);
                alternates.push(alternate);
            }
            debug!(
                "Scored {} members of group '{}' on {} strand",
                references.len(),
                group.name(),
                strand
            );
            groups.push((references, alternates));
        }

        let scores = match self.reduction {
            Reduction::PerMember => {
                let (references, alternates): (Vec<_>, Vec<_>) = groups.into_iter().unzip();
                aggregate(&references.concat(), &alternates.concat())
            }
            Reduction::ReplicateMean => {
                let rows: Vec<Vec<f32>> = groups
                    .iter()
                    .map(|(references, alternates)| mean(&deltas(references, alternates)))
                    .collect();
                reduce(&rows)
            }
        };
        Ok(scores)
    }
}

/// Per-member `alt - ref` rows
fn deltas(references: &[PredictionVector], alternates: &[PredictionVector]) -> Vec<Vec<f32>> {
    references
        .iter()
        .zip(alternates)
        .map(|(r, a)| a.iter().zip(r).map(|(a, r)| a - r).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MockModel, SharedModel};
    use crate::reference::MockProvider;
    use crate::score::variant::Variant;
    use crate::score::window::WindowBuilder;
    use std::sync::Arc;

    /// Returns a fixed vector regardless of input
    struct FixedModel {
        context: usize,
        output: Vec<f32>,
    }

    impl SpliceModel for FixedModel {
        fn context(&self) -> usize {
            self.context
        }

        fn predict(&self, _input: &EncodedSequence) -> Result<PredictionVector, SpliceError> {
            Ok(self.output.clone())
        }
    }

    fn windows(reference: &str, alternate: &str) -> WindowPair {
        let provider = MockProvider::new().with_contig("chr1", "AAAAAAAAAACCCCCCCCCC");
        WindowBuilder::new(2, 3)
            .build(&Variant::new("chr1", 10, reference, alternate), &provider)
            .unwrap()
    }

    #[test]
    fn test_minus_strand_output_reversed() {
        let ensemble = ModelEnsemble::from_models(vec![Arc::new(FixedModel {
            context: 1,
            output: vec![1.0, 2.0, 3.0],
        })])
        .unwrap();
        let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::default(), Reduction::PerMember).unwrap();

        let input = encode("ACGTA", Strand::Minus);
        let out = predictor
            .predict(ensemble.groups()[0].members()[0].as_ref(), &input, Strand::Minus)
            .unwrap();
        assert_eq!(out, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_wrong_output_length_is_fatal() {
        let ensemble = ModelEnsemble::from_models(vec![Arc::new(FixedModel {
            context: 1,
            output: vec![1.0],
        })])
        .unwrap();
        let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::default(), Reduction::PerMember).unwrap();
        let input = encode("ACGTA", Strand::Plus);
        let err = predictor
            .predict(ensemble.groups()[0].members()[0].as_ref(), &input, Strand::Plus)
            .unwrap_err();
        assert!(matches!(err, SpliceError::Model { .. }));
    }

    #[test]
    fn test_snv_delta_at_variant() {
        // Window is positions 5..15, variant 'A' at 10 becomes 'G'
        let model: SharedModel = Arc::new(MockModel::new(3).with_base_score(b'G', 0.75));
        let ensemble = ModelEnsemble::from_models(vec![model]).unwrap();
        let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::default(), Reduction::PerMember).unwrap();

        let scores = predictor.score(&windows("A", "G"), Strand::Plus, 2).unwrap();
        assert_eq!(scores.gain, vec![0.0, 0.0, 0.75, 0.0, 0.0]);
        assert_eq!(scores.loss, scores.gain);
    }

    #[test]
    fn test_deletion_is_aligned() {
        let model: SharedModel = Arc::new(MockModel::new(3));
        let ensemble = ModelEnsemble::from_models(vec![model]).unwrap();
        let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::default(), Reduction::PerMember).unwrap();

        let scores = predictor.score(&windows("AC", "A"), Strand::Minus, 2).unwrap();
        assert_eq!(scores.len(), 6);
    }

    #[test]
    fn test_reductions() {
        let fixed = |v: f32| -> SharedModel {
            Arc::new(FixedModel {
                context: 3,
                output: vec![v; 5],
            })
        };
        // Reference and alternate outputs are identical for a fixed model,
        // so use a base-sensitive model for one member
        let sensitive: SharedModel = Arc::new(MockModel::new(3).with_base_score(b'G', 1.0));
        let ensemble = ModelEnsemble::new(vec![
            ContextGroup::new("a", vec![sensitive, fixed(0.5)]),
            ContextGroup::new("b", vec![fixed(0.2)]),
        ])
        .unwrap();
        let pair = windows("A", "G");

        let per_member = EnsemblePredictor::new(&ensemble, &GroupSelection::All, Reduction::PerMember).unwrap();
        let scores = per_member.score(&pair, Strand::Plus, 2).unwrap();
        assert_eq!(scores.gain[2], 1.0);
        assert_eq!(scores.loss[2], 0.0);

        let averaged = EnsemblePredictor::new(&ensemble, &GroupSelection::All, Reduction::ReplicateMean).unwrap();
        let scores = averaged.score(&pair, Strand::Plus, 2).unwrap();
        assert_eq!(scores.gain[2], 0.5);
        assert_eq!(scores.loss[2], 0.0);
    }

    #[test]
    fn test_per_member_matches_aggregate_of_predictions() {
        let members: Vec<SharedModel> = vec![
            Arc::new(MockModel::new(3).with_base_score(b'G', 0.75)),
            Arc::new(MockModel::new(3).with_base_score(b'A', 0.5)),
        ];
        let ensemble = ModelEnsemble::new(vec![
            ContextGroup::new("a", vec![members[0].clone()]),
            ContextGroup::new("b", vec![members[1].clone()]),
        ])
        .unwrap();
        let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::All, Reduction::PerMember).unwrap();
        let pair = windows("A", "G");

        let ref_input = encode(pair.reference.sequence(), Strand::Plus);
        let alt_input = encode(pair.alternate.sequence(), Strand::Plus);
        let (references, alternates): (Vec<_>, Vec<_>) = members
            .iter()
            .map(|m| {
                let r = predictor.predict(m.as_ref(), &ref_input, Strand::Plus).unwrap();
                let a = predictor.predict(m.as_ref(), &alt_input, Strand::Plus).unwrap();
                (r, a)
            })
            .unzip();

        let scores = predictor.score(&pair, Strand::Plus, 2).unwrap();
        assert_eq!(scores, aggregate(&references, &alternates));
        assert_eq!(scores.gain[2], 0.75);
        assert_eq!(scores.loss[2], -0.5);
    }

    #[test]
    fn test_only_selected_groups_run() {
        let first = Arc::new(MockModel::new(3));
        let second = Arc::new(MockModel::new(3));
        let ensemble = ModelEnsemble::new(vec![
            ContextGroup::new("a", vec![first.clone() as SharedModel]),
            ContextGroup::new("b", vec![second.clone() as SharedModel]),
        ])
        .unwrap();
        let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::default(), Reduction::PerMember).unwrap();
        predictor.score(&windows("A", "G"), Strand::Plus, 2).unwrap();
        assert_eq!(first.call_count(), 2);
        assert_eq!(second.call_count(), 0);
    }
}
