//! VCF (Variant Call Format) support
//!
//! This module provides line-based VCF record parsing and a streaming
//! annotator that adds splice scores to the INFO column while passing
//! every other byte of the input through unchanged.

mod annotator;
mod header;
mod record;

pub use annotator::VcfAnnotator;
pub use header::{info_header_line, INFO_DESCRIPTION, INFO_KEY};
pub use record::VcfRecord;
