//! Variant splice-effect scoring
//!
//! Per variant: build matched reference/alternate windows, encode them per
//! strand, run the model ensemble, realign indel predictions, aggregate
//! the alt-minus-ref deltas, optionally mask annotated sites and report
//! per-gene scores.

pub mod aggregate;
pub mod align;
pub mod encode;
pub mod mask;
pub mod pipeline;
pub mod predict;
pub mod report;
pub mod variant;
pub mod window;

pub use aggregate::{aggregate, mean, reduce, ScoreVector};
pub use align::align;
pub use encode::{encode, EncodedSequence};
pub use mask::apply_mask;
pub use pipeline::{VariantOutcome, VariantScorer};
pub use predict::EnsemblePredictor;
pub use report::{format_score, GeneReport, GeneScores, ReportMode, ScoreReport};
pub use variant::Variant;
pub use window::{SequenceWindow, WindowBuilder, WindowPair};
