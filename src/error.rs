//! Error types for ferro-splice
//!
//! Two kinds of failure exist:
//! - [`SpliceError`] is fatal for the caller (I/O, malformed inputs, model failures)
//! - [`SkipReason`] describes why a single variant could not be scored; the
//!   pipeline reports these as values and moves on to the next variant
//!
//! Both map onto an [`ErrorCode`] for programmatic handling and reporting.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors and skips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ErrorCode {
    // Variant format skips (E1xxx)
    /// Alleles without standard bases, or a complex (multi-base to multi-base) change
    UnsupportedVariantFormat = 1001,
    /// Reference allele longer than twice the scoring distance
    DeletionTooLarge = 1002,

    // Reference skips (E2xxx)
    /// The sequence provider failed to return a usable window
    SequenceRetrievalFailure = 2001,
    /// Chromosome/contig not found
    ReferenceNotFound = 2002,
    /// Coordinates outside the contig
    InvalidCoordinates = 2003,

    // Validation skips (E3xxx)
    /// Reference allele disagrees with the sequence provider
    ReferenceMismatch = 3001,

    // Annotation skips (E4xxx)
    /// Variant not inside any annotated gene
    NoOverlappingGene = 4001,
    /// Annotation backend failure
    AnnotationFailure = 4002,

    // Model errors (E5xxx)
    /// Model invocation failed or produced malformed output
    ModelFailure = 5001,
    /// Ensemble definition is invalid
    InvalidEnsemble = 5002,

    // Input/config errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
    /// Record parsing error
    ParseError = 9003,
    /// Invalid configuration
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedVariantFormat => "variant format not supported",
            ErrorCode::DeletionTooLarge => "deletion too large",
            ErrorCode::SequenceRetrievalFailure => "sequence retrieval failed",
            ErrorCode::ReferenceNotFound => "reference not found",
            ErrorCode::InvalidCoordinates => "invalid coordinates",
            ErrorCode::ReferenceMismatch => "reference allele mismatch",
            ErrorCode::NoOverlappingGene => "no overlapping gene",
            ErrorCode::AnnotationFailure => "annotation lookup failed",
            ErrorCode::ModelFailure => "model invocation failed",
            ErrorCode::InvalidEnsemble => "invalid model ensemble",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
            ErrorCode::ParseError => "record parsing error",
            ErrorCode::ConfigError => "invalid configuration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-splice operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpliceError {
    /// Sequence or contig not found
    #[error("Reference not found: {id}")]
    ReferenceNotFound { id: String },

    /// Invalid coordinates provided
    #[error("Invalid coordinates: {msg}")]
    InvalidCoordinates { msg: String },

    /// Annotation backend failure
    #[error("Annotation error: {msg}")]
    Annotation { msg: String },

    /// Model failed or returned output of the wrong shape
    #[error("Model error: {msg}")]
    Model { msg: String },

    /// Ensemble definition is unusable
    #[error("Invalid ensemble: {msg}")]
    InvalidEnsemble { msg: String },

    /// Malformed input record
    #[error("Parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// Invalid configuration value
    #[error("Configuration error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl SpliceError {
    /// Create a model error
    pub fn model(msg: impl Into<String>) -> Self {
        SpliceError::Model { msg: msg.into() }
    }

    /// Create a parse error for a given input line
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        SpliceError::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            SpliceError::ReferenceNotFound { .. } => ErrorCode::ReferenceNotFound,
            SpliceError::InvalidCoordinates { .. } => ErrorCode::InvalidCoordinates,
            SpliceError::Annotation { .. } => ErrorCode::AnnotationFailure,
            SpliceError::Model { .. } => ErrorCode::ModelFailure,
            SpliceError::InvalidEnsemble { .. } => ErrorCode::InvalidEnsemble,
            SpliceError::Parse { .. } => ErrorCode::ParseError,
            SpliceError::Config { .. } => ErrorCode::ConfigError,
            SpliceError::Io { .. } => ErrorCode::IoError,
            SpliceError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Message prefixed with the error code, e.g. `[E5001] Model error: ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

/// Why a variant was not scored
///
/// Skips are expected data conditions, not failures of the tool. The caller
/// decides whether to emit the original record unannotated or drop it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Alleles contain no A/C/G/T, or both alleles are longer than one base
    #[error("Variant format not supported (REF={reference}, ALT={alternate}).")]
    UnsupportedVariantFormat { reference: String, alternate: String },

    /// Reference allele does not fit in the scored window
    #[error("Deletion too large ({length} bases for distance {distance}).")]
    DeletionTooLarge { length: usize, distance: usize },

    /// The sequence window could not be retrieved
    #[error("Could not retrieve sequence window: {msg}")]
    SequenceRetrievalFailure { msg: String },

    /// Provider bases at the locus disagree with the declared reference allele
    #[error("Mismatch between FASTA (ref base: {observed}) and variant file (ref base: {expected}).")]
    ReferenceMismatch { observed: String, expected: String },

    /// No annotated gene covers the locus on either strand
    #[error("Variant not contained in a gene body ({chrom}:{pos}). Do annotation/FASTA chromosome names match?")]
    NoOverlappingGene { chrom: String, pos: u64 },
}

impl SkipReason {
    /// Get the error code for this skip
    pub fn code(&self) -> ErrorCode {
        match self {
            SkipReason::UnsupportedVariantFormat { .. } => ErrorCode::UnsupportedVariantFormat,
            SkipReason::DeletionTooLarge { .. } => ErrorCode::DeletionTooLarge,
            SkipReason::SequenceRetrievalFailure { .. } => ErrorCode::SequenceRetrievalFailure,
            SkipReason::ReferenceMismatch { .. } => ErrorCode::ReferenceMismatch,
            SkipReason::NoOverlappingGene { .. } => ErrorCode::NoOverlappingGene,
        }
    }
}

impl From<SpliceError> for SkipReason {
    fn from(err: SpliceError) -> Self {
        SkipReason::SequenceRetrievalFailure {
            msg: err.to_string(),
        }
    }
}

/// A skipped variant, tagged with the record it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    /// Positional identifier of the input record (line or row number)
    pub record: usize,
    /// Cause of the skip
    pub reason: SkipReason,
}

impl Skip {
    pub fn new(record: usize, reason: SkipReason) -> Self {
        Self { record, reason }
    }

    pub fn code(&self) -> ErrorCode {
        self.reason.code()
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Line {}] skipping variant: {}",
            self.record, self.reason
        )
    }
}

impl From<std::io::Error> for SpliceError {
    fn from(err: std::io::Error) -> Self {
        SpliceError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SpliceError {
    fn from(err: serde_json::Error) -> Self {
        SpliceError::Json {
            msg: err.to_string(),
        }
    }
}

impl From<csv::Error> for SpliceError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();
        SpliceError::Parse {
            line,
            msg: err.to_string(),
        }
    }
}
