//! In-memory gene database
//!
//! Genes are indexed by identifier and by chromosome for position queries.

use std::collections::HashMap;
use std::path::Path;

use crate::annotation::gene::Gene;
use crate::annotation::provider::AnnotationProvider;
use crate::error::SpliceError;

/// A database of genes indexed for efficient lookup
#[derive(Debug, Default, Clone)]
pub struct GeneDb {
    /// Genes indexed by gene ID
    genes: HashMap<String, Gene>,
    /// Index from chromosome to (start, end, gene ID), sorted by start
    region_index: HashMap<String, Vec<(u64, u64, String)>>,
}

impl GeneDb {
    /// Create a new empty gene database
    pub fn new() -> Self {
        Self::default()
    }

    /// Load genes from a JSON array of [`Gene`] records
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, SpliceError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let genes: Vec<Gene> = serde_json::from_str(&content)?;
        Ok(genes.into_iter().collect())
    }

    /// Add a gene to the database, replacing any gene with the same ID
    pub fn add(&mut self, gene: Gene) {
        if let Some(old) = self.genes.remove(&gene.id) {
            if let Some(regions) = self.region_index.get_mut(&old.chrom) {
                regions.retain(|(_, _, id)| id != &old.id);
            }
        }

        let regions = self.region_index.entry(gene.chrom.clone()).or_default();
        let at = regions.partition_point(|(start, _, id)| (*start, id.as_str()) < (gene.start, gene.id.as_str()));
        regions.insert(at, (gene.start, gene.end, gene.id.clone()));

        self.genes.insert(gene.id.clone(), gene);
    }

    /// Get a gene by its ID
    pub fn get(&self, id: &str) -> Option<&Gene> {
        self.genes.get(id)
    }

    /// All genes whose span contains a 1-based position, ordered by start
    pub fn get_by_position(&self, chrom: &str, pos: u64) -> Vec<&Gene> {
        self.region_index
            .get(chrom)
            .map(|regions| {
                regions
                    .iter()
                    .take_while(|(start, _, _)| *start <= pos)
                    .filter(|(_, end, _)| pos <= *end)
                    .filter_map(|(_, _, id)| self.genes.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Chromosome names present in the database
    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.region_index.keys()
    }

    /// Get the number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl FromIterator<Gene> for GeneDb {
    fn from_iter<I: IntoIterator<Item = Gene>>(iter: I) -> Self {
        let mut db = GeneDb::new();
        for gene in iter {
            db.add(gene);
        }
        db
    }
}

impl AnnotationProvider for GeneDb {
    fn genes_overlapping(&self, chrom: &str, pos: u64) -> Result<Vec<Gene>, SpliceError> {
        Ok(self
            .get_by_position(chrom, pos)
            .into_iter()
            .cloned()
            .collect())
    }

    fn exons_of(&self, gene_id: &str) -> Result<Vec<(u64, u64)>, SpliceError> {
        let gene = self
            .genes
            .get(gene_id)
            .ok_or_else(|| SpliceError::Annotation {
                msg: format!("unknown gene '{}'", gene_id),
            })?;
        Ok(gene.exons.iter().map(|e| (e.start, e.end)).collect())
    }
}
