//! CSV variant tables
//!
//! A table needs a header row naming the chromosome, position, reference
//! and alternate columns (`CHROM,POS,REF,ALT` unless configured). The
//! annotated copy repeats every input column and appends a `SpliceScore`
//! column, left empty for skipped rows.

mod annotator;
mod columns;

pub use annotator::{TableAnnotator, SCORE_COLUMN};
pub use columns::ColumnIds;
