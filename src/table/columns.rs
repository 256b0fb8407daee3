//! Column identifiers for variant tables

use std::fmt;
use std::str::FromStr;

use csv::StringRecord;

use crate::error::SpliceError;

/// Header names of the chromosome, position, reference and alternate columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIds {
    pub chrom: String,
    pub pos: String,
    pub reference: String,
    pub alternate: String,
}

impl Default for ColumnIds {
    fn default() -> Self {
        Self {
            chrom: "CHROM".to_string(),
            pos: "POS".to_string(),
            reference: "REF".to_string(),
            alternate: "ALT".to_string(),
        }
    }
}

/// Positions of the variant columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndices {
    pub chrom: usize,
    pub pos: usize,
    pub reference: usize,
    pub alternate: usize,
}

impl ColumnIds {
    /// Locate each column in `headers`
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::Config`] naming the first missing column.
    pub(crate) fn resolve(&self, headers: &StringRecord) -> Result<ColumnIndices, SpliceError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SpliceError::Config {
                    msg: format!("column '{}' not found in table header", name),
                })
        };
        Ok(ColumnIndices {
            chrom: find(&self.chrom)?,
            pos: find(&self.pos)?,
            reference: find(&self.reference)?,
            alternate: find(&self.alternate)?,
        })
    }
}

impl FromStr for ColumnIds {
    type Err = SpliceError;

    /// Parse `CHROM,POS,REF,ALT`-style comma-separated names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [chrom, pos, reference, alternate] if parts.iter().all(|p| !p.is_empty()) => Ok(Self {
                chrom: chrom.to_string(),
                pos: pos.to_string(),
                reference: reference.to_string(),
                alternate: alternate.to_string(),
            }),
            _ => Err(SpliceError::Config {
                msg: format!(
                    "column ids '{}' must name four columns: chromosome,position,ref,alt",
                    s
                ),
            }),
        }
    }
}

impl fmt::Display for ColumnIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.chrom, self.pos, self.reference, self.alternate)
    }
}
