// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-splice: variant splice-effect scoring
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! For each variant, reference and alternate sequence windows are scored
//! by an ensemble of splice-site models; the per-position differences are
//! reported as the largest splice-site gain and loss for every gene the
//! variant overlaps.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ferro_splice::annotation::{Gene, GeneDb, Strand};
//! use ferro_splice::model::{MockModel, ModelEnsemble};
//! use ferro_splice::{MockProvider, ScoringConfig, Variant, VariantScorer};
//!
//! let sequences = MockProvider::new().with_contig("chr1", "ACGT".repeat(25));
//! let genes: GeneDb = [Gene::new("GENE", "chr1", 1, 100, Strand::Plus)].into_iter().collect();
//! let ensemble =
//!     ModelEnsemble::from_models(vec![Arc::new(MockModel::new(10).with_base_score(b'G', 0.5))]).unwrap();
//! let config = ScoringConfig::new().with_distance(5);
//!
//! let scorer = VariantScorer::new(&sequences, &genes, &ensemble, &config).unwrap();
//! let outcome = scorer.score(1, &Variant::new("1", 41, "A", "G")).unwrap();
//! assert_eq!(outcome.report().unwrap().to_string(), "GENE|0.5|0.0|0|-5");
//! ```

pub mod annotation;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod reference;
pub mod score;
pub mod table;
pub mod vcf;

// Re-export commonly used types
pub use annotation::{AnnotationProvider, Gene, GeneDb, Strand};
pub use batch::{BatchConfig, BatchProcessor, BatchStats};
pub use config::{GroupSelection, Reduction, ScoringConfig};
pub use error::{ErrorCode, Skip, SkipReason, SpliceError};
pub use model::{ModelEnsemble, SpliceModel};
pub use reference::{FastaProvider, MockProvider, SequenceProvider};
pub use score::{ScoreReport, Variant, VariantOutcome, VariantScorer};
pub use table::{ColumnIds, TableAnnotator};
pub use vcf::VcfAnnotator;

/// Result type alias for ferro-splice operations
pub type Result<T> = std::result::Result<T, SpliceError>;
