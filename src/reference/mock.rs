//! Mock sequence provider for testing

use std::collections::HashMap;

use crate::error::SpliceError;
use crate::reference::provider::{check_range, SequenceProvider};

/// In-memory sequence provider keyed by contig name
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    contigs: HashMap<String, String>,
}

impl MockProvider {
    /// Create an empty mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contig sequence, replacing any existing one with the same name
    pub fn add_contig(&mut self, name: impl Into<String>, sequence: impl Into<String>) {
        self.contigs.insert(name.into(), sequence.into());
    }

    /// Builder-style variant of [`add_contig`](Self::add_contig)
    pub fn with_contig(mut self, name: impl Into<String>, sequence: impl Into<String>) -> Self {
        self.add_contig(name, sequence);
        self
    }

    /// Length of a contig, if present
    pub fn contig_length(&self, name: &str) -> Option<u64> {
        self.contigs.get(name).map(|s| s.len() as u64)
    }
}

impl SequenceProvider for MockProvider {
    fn get_sequence(&self, chrom: &str, start: u64, end: u64) -> Result<String, SpliceError> {
        let sequence = self
            .contigs
            .get(&self.resolve_name(chrom))
            .ok_or_else(|| SpliceError::ReferenceNotFound {
                id: chrom.to_string(),
            })?;

        check_range(chrom, start, end, sequence.len() as u64)?;
        Ok(sequence[(start - 1) as usize..end as usize].to_ascii_uppercase())
    }

    fn resolve_name(&self, chrom: &str) -> String {
        if self.contigs.contains_key(chrom) {
            return chrom.to_string();
        }
        let alt = match chrom.strip_prefix("chr") {
            Some(bare) => bare.to_string(),
            None => format!("chr{}", chrom),
        };
        if self.contigs.contains_key(&alt) {
            alt
        } else {
            chrom.to_string()
        }
    }
}
