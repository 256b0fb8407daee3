//! Opening variant inputs

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::SpliceError;

/// Open a file for buffered reading, decompressing `.gz` inputs
///
/// Multi-member gzip (including bgzip) is read to the end.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, SpliceError> {
    let file = File::open(path).map_err(|e| SpliceError::Io {
        msg: format!("Failed to open {}: {}", path.display(), e),
    })?;

    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}
