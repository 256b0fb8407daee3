//! Gene and strand models
//!
//! # Coordinate System
//!
//! All coordinates in this module are **1-based inclusive** genomic positions:
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `Gene.start`, `Gene.end` | 1-based | Gene body span (inclusive) |
//! | `Exon.start`, `Exon.end` | 1-based | Exon span (inclusive) |

use serde::{Deserialize, Serialize};

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    /// Parse a strand column value. Returns `None` for unstranded (`.`) or unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Strand::Plus),
            "-" => Some(Strand::Minus),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// An exon of a gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    /// Genomic start position (1-based, inclusive)
    pub start: u64,
    /// Genomic end position (1-based, inclusive)
    pub end: u64,
}

impl Exon {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

/// A gene body on one strand of a chromosome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    /// Gene identifier (e.g., "ENSG00000141510")
    pub id: String,
    /// Chromosome name as used by the annotation source
    pub chrom: String,
    /// Gene start (1-based, inclusive)
    pub start: u64,
    /// Gene end (1-based, inclusive)
    pub end: u64,
    /// Strand of transcription
    pub strand: Strand,
    /// Exons of all transcripts of the gene
    #[serde(default)]
    pub exons: Vec<Exon>,
}

impl Gene {
    /// Create a gene without exons
    pub fn new(id: impl Into<String>, chrom: impl Into<String>, start: u64, end: u64, strand: Strand) -> Self {
        Self {
            id: id.into(),
            chrom: chrom.into(),
            start,
            end,
            strand,
            exons: Vec::new(),
        }
    }

    /// Add exons to the gene (builder style)
    pub fn with_exons(mut self, exons: impl IntoIterator<Item = (u64, u64)>) -> Self {
        self.exons
            .extend(exons.into_iter().map(|(s, e)| Exon::new(s, e)));
        self
    }

    /// Whether the gene body contains a 1-based position
    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_parse_and_display() {
        assert_eq!(Strand::parse("+"), Some(Strand::Plus));
        assert_eq!(Strand::parse("-"), Some(Strand::Minus));
        assert_eq!(Strand::parse("."), None);
        assert_eq!(Strand::parse("?"), None);
        assert_eq!(Strand::Minus.to_string(), "-");
    }

    #[test]
    fn test_gene_contains_is_inclusive() {
        let gene = Gene::new("G1", "chr1", 100, 200, Strand::Plus);
        assert!(gene.contains(100));
        assert!(gene.contains(200));
        assert!(!gene.contains(99));
        assert!(!gene.contains(201));
    }

    #[test]
    fn test_strand_serde() {
        let json = serde_json::to_string(&Strand::Minus).unwrap();
        assert_eq!(json, "\"-\"");
        let strand: Strand = serde_json::from_str("\"+\"").unwrap();
        assert_eq!(strand, Strand::Plus);
    }
}
