//! Parallel scoring support for ferro-splice
//!
//! This module scores variants on the rayon thread pool. Variants are
//! independent, so any interleaving is valid; results are collected in
//! input order. Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use std::sync::Arc;
//! use ferro_splice::annotation::GeneDb;
//! use ferro_splice::model::{MockModel, ModelEnsemble};
//! use ferro_splice::parallel::score_parallel;
//! use ferro_splice::reference::MockProvider;
//! use ferro_splice::score::{Variant, VariantScorer};
//! use ferro_splice::ScoringConfig;
//!
//! let sequences = MockProvider::new();
//! let genes = GeneDb::new();
//! let ensemble = ModelEnsemble::from_models(vec![Arc::new(MockModel::new(10))]).unwrap();
//! let scorer = VariantScorer::new(&sequences, &genes, &ensemble, &ScoringConfig::new()).unwrap();
//!
//! let variants = vec![(1, Variant::new("chr1", 100, "A", "G"))];
//! let outcomes = score_parallel(&scorer, &variants);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::annotation::AnnotationProvider;
use crate::error::SpliceError;
use crate::reference::SequenceProvider;
use crate::score::{Variant, VariantOutcome, VariantScorer};

/// Score `(record, variant)` pairs in parallel
///
/// Returns one result per input. Order is preserved.
pub fn score_parallel<S, A>(
    scorer: &VariantScorer<'_, S, A>,
    variants: &[(usize, Variant)],
) -> Vec<Result<VariantOutcome, SpliceError>>
where
    S: SequenceProvider + Sync + ?Sized,
    A: AnnotationProvider + Sync + ?Sized,
{
    variants
        .par_iter()
        .map(|(record, variant)| scorer.score(*record, variant))
        .collect()
}

/// Size the global rayon pool
///
/// `0` keeps rayon's default of one thread per core. The global pool can
/// only be configured once per process.
pub fn configure_threads(num_threads: usize) -> Result<(), SpliceError> {
    if num_threads == 0 {
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| SpliceError::Config {
            msg: format!("failed to configure {} threads: {}", num_threads, e),
        })
}
