//! Variant file formats

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SpliceError;

/// Format of a variant file, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Vcf,
    Csv,
}

impl InputFormat {
    /// Detect the format from `.vcf`/`.csv`, optionally followed by `.gz`
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_splice::cli::InputFormat;
    ///
    /// assert_eq!(InputFormat::detect("calls.vcf.gz").unwrap(), InputFormat::Vcf);
    /// assert_eq!(InputFormat::detect("table.CSV").unwrap(), InputFormat::Csv);
    /// assert!(InputFormat::detect("calls.bcf").is_err());
    /// ```
    pub fn detect<P: AsRef<Path>>(path: P) -> Result<Self, SpliceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        if name.ends_with(".vcf") {
            Ok(InputFormat::Vcf)
        } else if name.ends_with(".csv") {
            Ok(InputFormat::Csv)
        } else {
            Err(SpliceError::Config {
                msg: format!(
                    "variant file {} needs to be a CSV or VCF",
                    path.display()
                ),
            })
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Vcf => "vcf",
            InputFormat::Csv => "csv",
        }
    }

    /// Output file for `prefix`: `<prefix>.vcf` or `<prefix>.csv`
    pub fn output_path(&self, prefix: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", prefix, self.extension()))
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_ascii_uppercase())
    }
}
