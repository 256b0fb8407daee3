//! FASTA reference sequence provider
//!
//! This module provides random access to sequences in an uncompressed
//! FASTA file, using a `.fai` index when one exists next to the file and
//! scanning the file to build one otherwise.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::SpliceError;
use crate::reference::provider::{check_range, SequenceProvider};

/// Index entry for a sequence in a FASTA file
#[derive(Debug, Clone)]
struct FastaIndexEntry {
    /// Sequence name
    name: String,
    /// Length of the sequence
    length: u64,
    /// Byte offset to the start of sequence data
    offset: u64,
    /// Number of bases per line
    line_bases: u64,
    /// Number of bytes per line (including newline)
    line_bytes: u64,
}

/// FASTA-based reference sequence provider
///
/// Each query opens its own file handle, so a provider can be shared
/// across threads.
pub struct FastaProvider {
    /// Path to the FASTA file
    path: PathBuf,
    /// Index of sequences
    index: HashMap<String, FastaIndexEntry>,
    /// Chromosome name aliases (for mapping between different naming conventions)
    aliases: HashMap<String, String>,
}

impl FastaProvider {
    /// Create a new FASTA provider from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The file is gzip-compressed (not supported)
    /// - An existing `.fai` index is malformed
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, SpliceError> {
        let path = path.as_ref().to_path_buf();

        if is_gzip_file(&path)? {
            return Err(SpliceError::Io {
                msg: format!(
                    "FASTA file appears to be gzip-compressed: {}. \
                     Please decompress the file first (e.g., 'gunzip {}' or 'bgzip -d {}').",
                    path.display(),
                    path.display(),
                    path.display()
                ),
            });
        }

        let fai_path = PathBuf::from(format!("{}.fai", path.display()));
        let index = if fai_path.exists() {
            debug!("Using FASTA index {}", fai_path.display());
            load_fai_index(&fai_path)?
        } else {
            build_fasta_index(&path)?
        };
        info!("Indexed {} sequences in {}", index.len(), path.display());

        Ok(Self {
            path,
            index,
            aliases: build_default_aliases(),
        })
    }

    /// Add a chromosome alias
    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases
            .insert(alias.to_string(), canonical.to_string());
    }

    /// Get the length of a sequence
    pub fn sequence_length(&self, name: &str) -> Option<u64> {
        self.index.get(&self.resolve_name(name)).map(|e| e.length)
    }

    /// Check if a sequence exists
    pub fn has_sequence(&self, name: &str) -> bool {
        self.index.contains_key(&self.resolve_name(name))
    }

    /// Get all sequence names
    pub fn sequence_names(&self) -> impl Iterator<Item = &String> {
        self.index.keys()
    }

    /// Read a 0-based half-open region from the file
    fn read_region(&self, entry: &FastaIndexEntry, start: u64, end: u64) -> Result<String, SpliceError> {
        let line_start = start / entry.line_bases;
        let byte_offset = start % entry.line_bases;
        let file_offset = entry.offset + line_start * entry.line_bytes + byte_offset;

        let seq_len = end - start;
        let num_lines = (seq_len + byte_offset).div_ceil(entry.line_bases);
        let line_terminator = entry.line_bytes - entry.line_bases;
        let bytes_to_read = seq_len + num_lines * line_terminator;

        let mut file = File::open(&self.path).map_err(|e| SpliceError::Io {
            msg: format!("Failed to open FASTA file: {}", e),
        })?;
        file.seek(SeekFrom::Start(file_offset))
            .map_err(|e| SpliceError::Io {
                msg: format!("Failed to seek in FASTA file: {}", e),
            })?;

        // The final line may lack a terminator, so read what is available
        let mut buffer = Vec::with_capacity(bytes_to_read as usize);
        file.take(bytes_to_read)
            .read_to_end(&mut buffer)
            .map_err(|e| SpliceError::Io {
                msg: format!("Failed to read from FASTA file: {}", e),
            })?;

        let sequence: String = buffer
            .iter()
            .filter(|&&b| b != b'\n' && b != b'\r')
            .take(seq_len as usize)
            .map(|&b| (b as char).to_ascii_uppercase())
            .collect();

        if sequence.len() as u64 != seq_len {
            return Err(SpliceError::Io {
                msg: format!(
                    "Short read for {}: expected {} bases, got {}",
                    entry.name,
                    seq_len,
                    sequence.len()
                ),
            });
        }

        Ok(sequence)
    }
}

impl SequenceProvider for FastaProvider {
    fn get_sequence(&self, chrom: &str, start: u64, end: u64) -> Result<String, SpliceError> {
        let resolved = self.resolve_name(chrom);
        let entry = self
            .index
            .get(&resolved)
            .ok_or_else(|| SpliceError::ReferenceNotFound {
                id: chrom.to_string(),
            })?;

        check_range(chrom, start, end, entry.length)?;
        self.read_region(entry, start - 1, end)
    }

    fn resolve_name(&self, name: &str) -> String {
        if self.index.contains_key(name) {
            return name.to_string();
        }

        if let Some(canonical) = self.aliases.get(name) {
            if self.index.contains_key(canonical) {
                return canonical.clone();
            }
        }

        // Try adding/removing "chr" prefix
        let alt_name = match name.strip_prefix("chr") {
            Some(bare) => bare.to_string(),
            None => format!("chr{}", name),
        };
        if self.index.contains_key(&alt_name) {
            return alt_name;
        }

        name.to_string()
    }
}

/// Load a FASTA index (.fai) file
fn load_fai_index<P: AsRef<Path>>(path: P) -> Result<HashMap<String, FastaIndexEntry>, SpliceError> {
    let file = File::open(path.as_ref()).map_err(|e| SpliceError::Io {
        msg: format!("Failed to open FAI file: {}", e),
    })?;
    let reader = BufReader::new(file);

    let mut index = HashMap::new();

    for line in reader.lines() {
        let line = line.map_err(|e| SpliceError::Io {
            msg: format!("Failed to read FAI line: {}", e),
        })?;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 5 {
            continue;
        }

        let name = fields[0].to_string();
        let parse = |idx: usize, what: &str| -> Result<u64, SpliceError> {
            fields[idx].parse().map_err(|_| SpliceError::Io {
                msg: format!(
                    "Invalid {} '{}' in FAI for sequence '{}'",
                    what, fields[idx], name
                ),
            })
        };
        let length = parse(1, "length")?;
        let offset = parse(2, "offset")?;
        let line_bases = parse(3, "line_bases")?;
        let line_bytes = parse(4, "line_bytes")?;

        if line_bases == 0 || line_bytes < line_bases {
            return Err(SpliceError::Io {
                msg: format!(
                    "Invalid FAI entry for '{}': line_bases={}, line_bytes={}",
                    name, line_bases, line_bytes
                ),
            });
        }

        index.insert(
            name.clone(),
            FastaIndexEntry {
                name,
                length,
                offset,
                line_bases,
                line_bytes,
            },
        );
    }

    Ok(index)
}

/// Build a FASTA index by scanning the file
fn build_fasta_index<P: AsRef<Path>>(
    path: P,
) -> Result<HashMap<String, FastaIndexEntry>, SpliceError> {
    let file = File::open(path.as_ref()).map_err(|e| SpliceError::Io {
        msg: format!("Failed to open FASTA file: {}", e),
    })?;
    let mut reader = BufReader::new(file);

    let mut index = HashMap::new();
    let mut current_entry: Option<FastaIndexEntry> = None;
    let mut byte_position = 0u64;
    let mut first_seq_line = true;

    let mut line = String::new();
    loop {
        let line_start = byte_position;
        line.clear();
        let bytes_read = reader.read_line(&mut line).map_err(|e| SpliceError::Io {
            msg: format!("Failed to read line: {}", e),
        })?;

        if bytes_read == 0 {
            break;
        }

        byte_position += bytes_read as u64;

        if let Some(header) = line.strip_prefix('>') {
            if let Some(entry) = current_entry.take() {
                index.insert(entry.name.clone(), entry);
            }

            let name = header.split_whitespace().next().unwrap_or("").to_string();
            current_entry = Some(FastaIndexEntry {
                name,
                length: 0,
                offset: byte_position,
                line_bases: 0,
                line_bytes: 0,
            });
            first_seq_line = true;
        } else if let Some(ref mut entry) = current_entry {
            let seq_len = line.trim_end().len() as u64;
            entry.length += seq_len;

            if first_seq_line && seq_len > 0 {
                entry.offset = line_start;
                entry.line_bases = seq_len;
                entry.line_bytes = bytes_read as u64;
                first_seq_line = false;
            }
        }
    }

    if let Some(entry) = current_entry {
        index.insert(entry.name.clone(), entry);
    }

    // Empty records have no line geometry and can never be queried
    index.retain(|_, e| e.line_bases > 0);

    Ok(index)
}

/// Check if a file is gzip-compressed by reading its magic bytes
fn is_gzip_file<P: AsRef<Path>>(path: P) -> Result<bool, SpliceError> {
    let mut file = File::open(path.as_ref()).map_err(|e| SpliceError::Io {
        msg: format!("Failed to open file: {}", e),
    })?;

    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == [0x1f, 0x8b]),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(SpliceError::Io {
            msg: format!("Failed to read file: {}", e),
        }),
    }
}

/// Build default chromosome aliases (RefSeq and bare names to UCSC names)
fn build_default_aliases() -> HashMap<String, String> {
    let mut aliases = HashMap::new();

    for n in 1..=22 {
        let refseq = format!("NC_{:06}", n);
        aliases.insert(refseq, format!("chr{}", n));
    }
    for (refseq, ucsc, bare) in [
        ("NC_000023", "chrX", "X"),
        ("NC_000024", "chrY", "Y"),
        ("NC_012920", "chrM", "MT"),
    ] {
        aliases.insert(refseq.to_string(), ucsc.to_string());
        aliases.insert(bare.to_string(), ucsc.to_string());
    }

    aliases
}
