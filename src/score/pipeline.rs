//! Per-variant scoring pipeline
//!
//! Windows are built first so that format, deletion-size, retrieval and
//! reference-mismatch skips happen before any annotation lookup; genes
//! are resolved before any model runs.

use log::{debug, warn};

use crate::annotation::{AnnotationProvider, GeneOverlapResolver, Strand};
use crate::config::ScoringConfig;
use crate::error::{Skip, SkipReason, SpliceError};
use crate::model::ModelEnsemble;
use crate::reference::SequenceProvider;
use crate::score::mask::apply_mask;
use crate::score::predict::EnsemblePredictor;
use crate::score::report::{GeneReport, ReportMode, ScoreReport};
use crate::score::variant::Variant;
use crate::score::window::WindowBuilder;

/// Result of scoring one variant
#[derive(Debug, Clone, PartialEq)]
pub enum VariantOutcome {
    Scored(ScoreReport),
    Skipped(Skip),
}

impl VariantOutcome {
    pub fn is_scored(&self) -> bool {
        matches!(self, VariantOutcome::Scored(_))
    }

    pub fn report(&self) -> Option<&ScoreReport> {
        match self {
            VariantOutcome::Scored(report) => Some(report),
            VariantOutcome::Skipped(_) => None,
        }
    }
}

/// Scores variants against shared providers and an ensemble
pub struct VariantScorer<'a, S: ?Sized, A: ?Sized> {
    sequences: &'a S,
    annotations: &'a A,
    predictor: EnsemblePredictor<'a>,
    windows: WindowBuilder,
    distance: usize,
    mask: bool,
    mode: ReportMode,
}

impl<'a, S, A> VariantScorer<'a, S, A>
where
    S: SequenceProvider + ?Sized,
    A: AnnotationProvider + ?Sized,
{
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or selects context
    /// groups missing from the ensemble.
    pub fn new(
        sequences: &'a S,
        annotations: &'a A,
        ensemble: &'a ModelEnsemble,
        config: &ScoringConfig,
    ) -> Result<Self, SpliceError> {
        config.validate()?;
        let predictor = EnsemblePredictor::new(ensemble, &config.context_groups, config.reduction)?;

        Ok(Self {
            sequences,
            annotations,
            windows: WindowBuilder::new(config.distance, ensemble.context()),
            predictor,
            distance: config.distance,
            mask: config.mask,
            mode: config.report_mode(),
        })
    }

    /// Score one variant
    ///
    /// `record` identifies the input record in skip diagnostics. Skips are
    /// logged at warn level and returned as [`VariantOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// Model and annotation backend failures are returned as errors.
    pub fn score(&self, record: usize, variant: &Variant) -> Result<VariantOutcome, SpliceError> {
        match self.score_inner(variant)? {
            Ok(report) => Ok(VariantOutcome::Scored(report)),
            Err(reason) => {
                let skip = Skip::new(record, reason);
                warn!("{}", skip);
                Ok(VariantOutcome::Skipped(skip))
            }
        }
    }

    fn score_inner(&self, variant: &Variant) -> Result<Result<ScoreReport, SkipReason>, SpliceError> {
        if let Err(reason) = self.windows.check(variant) {
            return Ok(Err(reason));
        }

        let chrom = self.sequences.resolve_name(&variant.chrom);
        let variant = variant.with_chrom(chrom);

        let windows = match self.windows.build(&variant, self.sequences) {
            Ok(windows) => windows,
            Err(reason) => return Ok(Err(reason)),
        };

        let genes = GeneOverlapResolver::genes_at(&variant.chrom, variant.pos, self.annotations)?;
        if genes.is_empty() {
            return Ok(Err(SkipReason::NoOverlappingGene {
                chrom: variant.chrom.clone(),
                pos: variant.pos,
            }));
        }
        debug!("{} overlaps {} genes", variant, genes.len());

        let mut report = ScoreReport::default();
        for strand in [Strand::Plus, Strand::Minus] {
            let strand_genes = genes.on(strand);
            if strand_genes.is_empty() {
                continue;
            }

            let scores = self.predictor.score(&windows, strand, self.distance)?;
            for (gene, boundaries) in strand_genes {
                let mut gene_scores = scores.clone();
                if self.mask {
                    apply_mask(
                        &mut gene_scores,
                        boundaries,
                        variant.pos,
                        self.distance,
                        windows.length_delta(),
                    );
                }
                report
                    .genes
                    .push(GeneReport::new(gene.clone(), strand, &gene_scores, self.distance, self.mode));
            }
        }

        Ok(Ok(report))
    }
}
