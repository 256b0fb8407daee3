//! Variant representation

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single variant at a 1-based position
///
/// Alleles are upper-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub chrom: String,
    /// 1-based position of the first reference base
    pub pos: u64,
    pub reference: String,
    pub alternate: String,
}

impl Variant {
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        reference: impl AsRef<str>,
        alternate: impl AsRef<str>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            reference: reference.as_ref().to_ascii_uppercase(),
            alternate: alternate.as_ref().to_ascii_uppercase(),
        }
    }

    /// The same variant on a differently named chromosome
    pub fn with_chrom(&self, chrom: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            ..self.clone()
        }
    }

    /// `len(alt) - len(ref)`: positive for insertions, negative for deletions
    pub fn length_delta(&self) -> isize {
        self.alternate.len() as isize - self.reference.len() as isize
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}>{}",
            self.chrom, self.pos, self.reference, self.alternate
        )
    }
}
