//! Unified error type for the spekt library.
//!
//! Library code uses `SpektError` while CLI code continues using
//! `anyhow::Result` for convenience.
//!
//! # Error Categories
//!
//! - **InputIo**: File system and stream operations (open, read, gzip)
//! - **MalformedFastq**: FASTQ structure violations (missing `@`, length mismatch)
//! - **MalformedFasta**: FASTA structure violations (entry with no body)
//! - **SequenceTooShort**: A record shorter than the k-mer size
//! - **BadParameter**: Invalid run parameters (k, w, bins, decay ratio)
//! - **Serialization**: Sketch envelope encode/decode failures
//! - **SketchIncompatible**: Mismatched sketches offered for comparison

use std::fmt;
use std::path::PathBuf;

/// Unified error type for the spekt library.
#[derive(Debug)]
pub enum SpektError {
    /// I/O error with path context.
    InputIo {
        path: PathBuf,
        operation: &'static str,
        source: std::io::Error,
    },

    /// FASTQ record that violates the four-line structure.
    MalformedFastq(String),

    /// FASTA entry that violates the chevron-block structure.
    MalformedFasta(String),

    /// A sequence record shorter than the k-mer size.
    SequenceTooShort { id: String, length: usize, k: usize },

    /// Invalid run parameter.
    BadParameter(String),

    /// Sketch envelope encode/decode failure.
    Serialization(String),

    /// Two sketches that cannot be compared.
    SketchIncompatible(String),
}

impl fmt::Display for SpektError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpektError::InputIo {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "I/O error during {} on '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            SpektError::MalformedFastq(msg) => write!(f, "malformed FASTQ: {}", msg),
            SpektError::MalformedFasta(msg) => write!(f, "malformed FASTA: {}", msg),
            SpektError::SequenceTooShort { id, length, k } => {
                write!(
                    f,
                    "sequence '{}' is shorter than k ({} < {})",
                    id, length, k
                )
            }
            SpektError::BadParameter(msg) => write!(f, "bad parameter: {}", msg),
            SpektError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            SpektError::SketchIncompatible(msg) => {
                write!(f, "sketches are not compatible: {}", msg)
            }
        }
    }
}

impl std::error::Error for SpektError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpektError::InputIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SpektError {
    fn from(err: std::io::Error) -> Self {
        SpektError::InputIo {
            path: PathBuf::new(),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for SpektError {
    fn from(err: serde_json::Error) -> Self {
        SpektError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results using SpektError.
pub type Result<T> = std::result::Result<T, SpektError>;

impl SpektError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        SpektError::InputIo {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Create a bad-parameter error.
    pub fn bad_parameter(msg: impl Into<String>) -> Self {
        SpektError::BadParameter(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        SpektError::Serialization(msg.into())
    }

    /// Create an incompatible-sketches error.
    pub fn incompatible(msg: impl Into<String>) -> Self {
        SpektError::SketchIncompatible(msg.into())
    }
}
