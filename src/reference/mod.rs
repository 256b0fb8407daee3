//! Reference sequence access
//!
//! Provides the [`SequenceProvider`] trait and its FASTA and in-memory
//! implementations.

pub mod fasta;
pub mod mock;
pub mod provider;

pub use fasta::FastaProvider;
pub use mock::MockProvider;
pub use provider::SequenceProvider;
