//! Genes overlapping a variant, split by strand

use std::collections::BTreeMap;

use crate::annotation::gene::Strand;
use crate::annotation::provider::AnnotationProvider;
use crate::error::SpliceError;

/// Genes containing a locus, keyed by gene ID, with flattened exon
/// boundaries `[start1, end1, start2, end2, ...]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlappingGenes {
    pub plus: BTreeMap<String, Vec<u64>>,
    pub minus: BTreeMap<String, Vec<u64>>,
}

impl OverlappingGenes {
    /// Genes on one strand
    pub fn on(&self, strand: Strand) -> &BTreeMap<String, Vec<u64>> {
        match strand {
            Strand::Plus => &self.plus,
            Strand::Minus => &self.minus,
        }
    }

    /// Total number of genes on both strands
    pub fn len(&self) -> usize {
        self.plus.len() + self.minus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plus.is_empty() && self.minus.is_empty()
    }
}

/// Resolves the genes whose body contains a variant position
pub struct GeneOverlapResolver;

impl GeneOverlapResolver {
    /// Look up genes containing `pos` (1-based) on `chrom`
    ///
    /// Genes reported by the provider whose span does not contain the
    /// position are discarded. Genes without exons are kept with an empty
    /// boundary list.
    pub fn genes_at<A: AnnotationProvider + ?Sized>(
        chrom: &str,
        pos: u64,
        provider: &A,
    ) -> Result<OverlappingGenes, SpliceError> {
        let mut genes = OverlappingGenes::default();

        for gene in provider.genes_overlapping(chrom, pos)? {
            if !gene.contains(pos) {
                continue;
            }

            let boundaries: Vec<u64> = provider
                .exons_of(&gene.id)?
                .into_iter()
                .flat_map(|(start, end)| [start, end])
                .collect();

            let target = match gene.strand {
                Strand::Plus => &mut genes.plus,
                Strand::Minus => &mut genes.minus,
            };
            target.insert(gene.id, boundaries);
        }

        Ok(genes)
    }
}
