//! Payload-to-sequences encoding pipeline.

use crate::chunker;
use crate::codec::EncodeMetadata;
use crate::config::CodecConfig;
use crate::crypto;
use crate::ecc;
use crate::error::Result;
use crate::header::{ChunkHeader, HEADER_SIZE};
use crate::symbols;
use rayon::prelude::*;
use sha2::{Digest, Sha256};

/// Result of encoding a payload: the sequences plus aggregate metadata.
#[derive(Debug, Clone)]
pub struct EncodeOutput {
    /// One sequence per chunk, in chunk-index order.
    pub sequences: Vec<String>,
    /// Aggregate metadata, advisory only.
    pub metadata: EncodeMetadata,
}

/// Encode a payload into DNA sequences.
///
/// When a password is supplied the payload is sealed into an encryption
/// envelope first and the envelope is what gets chunked. Configuration is
/// checked before any chunk is produced. Per-chunk protection and symbol
/// mapping run on parallel workers; the output order is chunk-index order
/// regardless of worker scheduling.
pub fn encode(
    payload: &[u8],
    password: Option<&str>,
    config: &CodecConfig,
) -> Result<EncodeOutput> {
    let chunk_size = config.chunk_capacity()?;

    let payload_digest = hex::encode(Sha256::digest(payload));

    let (stream, encrypted) = match password {
        Some(password) => (crypto::seal(payload, password)?, true),
        None => (payload.to_vec(), false),
    };

    let pieces = chunker::split(&stream, chunk_size);
    let total = pieces.len() as u32;
    let stream_len = stream.len() as u64;

    let sequences: Vec<String> = pieces
        .par_iter()
        .enumerate()
        .map(|(index, data)| {
            let header = ChunkHeader::new(
                config.level,
                encrypted,
                index as u32,
                total,
                stream_len,
                data,
            );

            let mut block = Vec::with_capacity(HEADER_SIZE + data.len());
            block.extend_from_slice(&header.encode());
            block.extend_from_slice(data);

            let protected = ecc::protect(&block, config.level);
            symbols::bytes_to_symbols(&protected)
        })
        .collect();

    log::debug!(
        "encoded {} payload bytes into {} sequences (level {}, encrypted: {})",
        payload.len(),
        sequences.len(),
        config.level,
        encrypted
    );

    let metadata = EncodeMetadata {
        original_size: payload.len() as u64,
        sequence_count: sequences.len(),
        base_length: config.base_length,
        error_correction: config.level,
        is_encrypted: encrypted,
        payload_digest,
    };

    Ok(EncodeOutput {
        sequences,
        metadata,
    })
}
