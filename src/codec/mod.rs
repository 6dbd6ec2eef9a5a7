//! The encode/decode pipeline.
//!
//! Encode: encrypt (optional) -> chunk -> header -> protect -> symbol-map.
//! Decode: symbol-decode -> recover -> validate per chunk -> reassemble ->
//! decrypt (optional). Per-chunk work fans out over parallel workers; the
//! reassembly join is keyed by chunk index and is deterministic regardless
//! of worker completion order.

mod decoder;
mod encoder;

pub use decoder::decode;
pub use encoder::{encode, EncodeOutput};

use crate::ecc::EcLevel;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata file name written next to the sequence files.
pub const METADATA_FILENAME: &str = "metadata.json";

/// Aggregate information about one encode call.
///
/// Derived, not authoritative: the metadata may travel separately from the
/// sequences, so decode trusts the per-chunk headers and never this record.
/// The payload digest lets callers verify a decoded file end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeMetadata {
    /// Payload size in bytes, before encryption.
    pub original_size: u64,
    /// Number of sequences produced.
    pub sequence_count: usize,
    /// Target sequence length used.
    pub base_length: usize,
    /// Error-correction level applied to every chunk.
    pub error_correction: EcLevel,
    /// Whether the payload was encrypted before chunking.
    pub is_encrypted: bool,
    /// Hex-encoded SHA-256 of the payload, before encryption.
    pub payload_digest: String,
}

impl EncodeMetadata {
    /// Get the metadata file path for a directory.
    pub fn file_path(dir: &Path) -> PathBuf {
        dir.join(METADATA_FILENAME)
    }

    /// Load metadata from a directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(Self::file_path(dir))?;
        let metadata: EncodeMetadata = serde_json::from_str(&content)?;
        Ok(metadata)
    }

    /// Save metadata to a directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::file_path(dir), content)?;
        Ok(())
    }
}

/// Health probe for service wrappers: reports the codec version and performs
/// no codec work.
pub fn probe() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
