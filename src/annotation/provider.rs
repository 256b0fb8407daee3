//! Annotation provider trait
//!
//! Defines the interface for looking up genes and their exons around a locus.

use crate::annotation::gene::Gene;
use crate::error::SpliceError;

/// Trait for providing gene annotation
///
/// Implementations might include:
/// - [`GeneDb`](crate::annotation::GeneDb) loaded from GTF or JSON
/// - database-backed stores queried per locus
pub trait AnnotationProvider {
    /// Genes whose annotated region touches a 1-based position
    ///
    /// Implementations may return genes that only approximately overlap;
    /// callers filter on the exact span.
    fn genes_overlapping(&self, chrom: &str, pos: u64) -> Result<Vec<Gene>, SpliceError>;

    /// Exon `(start, end)` pairs (1-based, inclusive) of all transcripts of a gene
    fn exons_of(&self, gene_id: &str) -> Result<Vec<(u64, u64)>, SpliceError>;
}

/// Blanket implementation for boxed trait objects
impl AnnotationProvider for Box<dyn AnnotationProvider + Send + Sync> {
    fn genes_overlapping(&self, chrom: &str, pos: u64) -> Result<Vec<Gene>, SpliceError> {
        (**self).genes_overlapping(chrom, pos)
    }

    fn exons_of(&self, gene_id: &str) -> Result<Vec<(u64, u64)>, SpliceError> {
        (**self).exons_of(gene_id)
    }
}
