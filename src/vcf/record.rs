//! VCF record representation
//!
//! Records keep their raw columns so that unscored records are written
//! back exactly as read.

use std::fmt;

use crate::error::SpliceError;
use crate::score::Variant;

/// Fixed columns up to and including INFO
const INFO_COLUMN: usize = 7;

/// A single VCF data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfRecord {
    fields: Vec<String>,
    pos: u64,
}

impl VcfRecord {
    /// Parse a tab-separated VCF data line
    ///
    /// At least CHROM, POS, ID, REF and ALT must be present.
    pub fn parse(line: &str, line_number: usize) -> Result<Self, SpliceError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        if fields.len() < 5 {
            return Err(SpliceError::parse(
                line_number,
                format!(
                    "Invalid VCF line: expected at least 5 fields, got {}",
                    fields.len()
                ),
            ));
        }
        let pos = fields[1].parse::<u64>().map_err(|_| {
            SpliceError::parse(
                line_number,
                format!("Invalid position '{}': not a valid integer", fields[1]),
            )
        })?;
        Ok(Self { fields, pos })
    }

    pub fn chrom(&self) -> &str {
        &self.fields[0]
    }

    /// 1-based position
    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn reference(&self) -> &str {
        &self.fields[3]
    }

    pub fn alternates(&self) -> Vec<&str> {
        self.fields[4].split(',').collect()
    }

    /// The variant for the first ALT allele
    pub fn first_variant(&self) -> Variant {
        let alternate = self.fields[4].split(',').next().unwrap_or(".");
        Variant::new(self.chrom(), self.pos(), self.reference(), alternate)
    }

    /// Raw INFO column, if present
    pub fn info(&self) -> Option<&str> {
        self.fields.get(INFO_COLUMN).map(String::as_str)
    }

    /// Add or replace `key=value` in the INFO column
    ///
    /// Missing QUAL/FILTER/INFO columns are filled with `.`.
    pub fn set_info(&mut self, key: &str, value: &str) {
        while self.fields.len() <= INFO_COLUMN {
            self.fields.push(".".to_string());
        }

        let entry = format!("{}={}", key, value);
        let info = &self.fields[INFO_COLUMN];
        let mut entries: Vec<String> = if info == "." || info.is_empty() {
            Vec::new()
        } else {
            info.split(';')
                .filter(|e| e.split('=').next() != Some(key))
                .map(str::to_string)
                .collect()
        };
        entries.push(entry);
        self.fields[INFO_COLUMN] = entries.join(";");
    }
}

impl fmt::Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join("\t"))
    }
}
