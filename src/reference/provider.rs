//! Sequence provider trait
//!
//! Defines the interface for random access to genomic sequence.

use crate::error::SpliceError;

/// Trait for providing genomic sequence
///
/// Implementations might include:
/// - [`FastaProvider`](crate::reference::FastaProvider) for indexed FASTA files
/// - [`MockProvider`](crate::reference::MockProvider) for testing
///
/// Implementations are expected to be safe for concurrent point/range
/// queries when shared across threads.
pub trait SequenceProvider {
    /// Get a sequence region
    ///
    /// # Arguments
    ///
    /// * `chrom` - Chromosome/contig name
    /// * `start` - 1-based start position (inclusive)
    /// * `end` - 1-based end position (inclusive)
    ///
    /// # Errors
    ///
    /// Returns an error if the contig is unknown or the range falls outside it.
    fn get_sequence(&self, chrom: &str, start: u64, end: u64) -> Result<String, SpliceError>;

    /// Resolve a chromosome name to the provider's naming convention
    ///
    /// The default returns the name unchanged. Providers that know their
    /// contig names should map e.g. `1` to `chr1` when only the latter exists.
    fn resolve_name(&self, chrom: &str) -> String {
        chrom.to_string()
    }
}

/// Blanket implementation for boxed trait objects
impl SequenceProvider for Box<dyn SequenceProvider + Send + Sync> {
    fn get_sequence(&self, chrom: &str, start: u64, end: u64) -> Result<String, SpliceError> {
        (**self).get_sequence(chrom, start, end)
    }

    fn resolve_name(&self, chrom: &str) -> String {
        (**self).resolve_name(chrom)
    }
}

/// Validate a 1-based inclusive range against a contig length
pub(crate) fn check_range(chrom: &str, start: u64, end: u64, length: u64) -> Result<(), SpliceError> {
    if start == 0 {
        return Err(SpliceError::InvalidCoordinates {
            msg: format!("Start position 0 is not valid for 1-based coordinates on {}", chrom),
        });
    }
    if end < start {
        return Err(SpliceError::InvalidCoordinates {
            msg: format!("End {} precedes start {} on {}", end, start, chrom),
        });
    }
    if end > length {
        return Err(SpliceError::InvalidCoordinates {
            msg: format!(
                "End position {} exceeds sequence length {} for {}",
                end, length, chrom
            ),
        });
    }
    Ok(())
}
