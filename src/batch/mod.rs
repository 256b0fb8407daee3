//! Batch scoring of many variants.
//!
//! This module scores slices of `(record, variant)` pairs in chunks, with
//! progress tracking and per-skip-reason statistics. With the `parallel`
//! feature, chunks can be scored on the rayon thread pool; output order
//! always follows input order.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use ferro_splice::annotation::{Gene, GeneDb, Strand};
//! use ferro_splice::batch::BatchProcessor;
//! use ferro_splice::model::{MockModel, ModelEnsemble};
//! use ferro_splice::reference::MockProvider;
//! use ferro_splice::score::{Variant, VariantScorer};
//! use ferro_splice::ScoringConfig;
//!
//! let sequences = MockProvider::new().with_contig("chr1", "ACGT".repeat(20));
//! let genes: GeneDb = [Gene::new("G", "chr1", 1, 80, Strand::Plus)].into_iter().collect();
//! let ensemble = ModelEnsemble::from_models(vec![Arc::new(MockModel::new(10))]).unwrap();
//! let config = ScoringConfig::new().with_distance(5);
//! let scorer = VariantScorer::new(&sequences, &genes, &ensemble, &config).unwrap();
//!
//! let variants = vec![(1, Variant::new("chr1", 40, "T", "C"))];
//! let result = BatchProcessor::new(&scorer)
//!     .score_with_progress(&variants, |progress| {
//!         println!("Progress: {:.1}%", progress.percent());
//!     })
//!     .unwrap();
//! assert_eq!(result.stats.scored, 1);
//! ```

mod processor;
mod stats;

pub use processor::{BatchConfig, BatchProcessor, BatchProgress, BatchResult};
pub use stats::BatchStats;
