//! CLI utilities for ferro-splice
//!
//! This module provides testable functions used by the CLI binary:
//! input format detection, gzip-aware input opening and output naming.

pub mod format;
pub mod input;

pub use format::InputFormat;
pub use input::open_input;

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// This is common when files are exported from Windows applications or Excel.
///
/// # Examples
///
/// ```
/// use ferro_splice::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}#CHROM"), "#CHROM");
/// assert_eq!(strip_bom("#CHROM"), "#CHROM");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}
