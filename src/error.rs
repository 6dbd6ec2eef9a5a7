//! Error types for the DNA codec.

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in codec operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid base length / error-correction level combination.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed alphabet, inconsistent header, or conflicting chunk set.
    #[error("validation error: {0}")]
    Validation(String),

    /// Redundancy insufficient to fix detected corruption in a chunk.
    #[error("chunk {chunk}: corruption exceeds the correction bound")]
    Uncorrectable { chunk: u32 },

    /// Post-correction checksum still fails - corruption escaped the code's guarantee.
    #[error("chunk {chunk}: checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        chunk: u32,
        expected: u32,
        actual: u32,
    },

    /// Index gap in the reassembled chunk set.
    #[error("missing chunk {index} of {total}")]
    MissingChunk { index: u32, total: u32 },

    /// Wrong password or tampered ciphertext.
    #[error("decryption failed: wrong password or corrupted data")]
    Authentication,

    /// Payload carries the encrypted flag but no password was supplied.
    #[error("payload is encrypted: password required")]
    PasswordRequired,

    /// Encryption error.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Key derivation error.
    #[error("key derivation error: {0}")]
    KeyDerivation(String),

    /// Consolidated per-chunk decode failures.
    #[error("{0}")]
    Chunks(DecodeReport),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// A single failed sequence within a decode call.
#[derive(Debug)]
pub struct ChunkFailure {
    /// Position of the sequence in the caller-supplied collection,
    /// if the failure is attributable to one sequence.
    pub position: Option<usize>,
    /// What went wrong with it.
    pub error: Error,
}

/// Every per-chunk failure from one decode call.
///
/// Decoding validates all sequences before reporting, so a single report
/// names every broken chunk - callers can judge whether re-requesting the
/// damaged subset is worthwhile.
#[derive(Debug)]
pub struct DecodeReport {
    /// Total number of sequences supplied.
    pub total: usize,
    /// Failures, in input order.
    pub failures: Vec<ChunkFailure>,
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} sequences failed to decode",
            self.failures.len(),
            self.total
        )?;
        for failure in &self.failures {
            match failure.position {
                Some(pos) => write!(f, "\n  sequence {}: {}", pos, failure.error)?,
                None => write!(f, "\n  {}", failure.error)?,
            }
        }
        Ok(())
    }
}
