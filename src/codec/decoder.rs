//! Sequences-to-payload decoding pipeline.

use crate::chunker::{self, Chunk};
use crate::crypto;
use crate::ecc::{self, EcLevel};
use crate::error::{ChunkFailure, DecodeReport, Error, Result};
use crate::header::{self, ChunkHeader, HEADER_SIZE};
use crate::symbols;
use rayon::prelude::*;

/// Decode a collection of sequences back into the original payload.
///
/// Sequence order is irrelevant: each chunk's header index is the sole
/// ordering authority. The caller's `advisory_level` only seeds the
/// error-correction candidate order; the authoritative level is read from
/// each recovered header and a mismatch with the advisory value is not an
/// error.
///
/// Per-chunk failures are collected, not short-circuited: a single call
/// reports every broken sequence at once via [`Error::Chunks`]. Call-level
/// failures (missing password, wrong password) abort immediately since no
/// partial result is meaningful.
pub fn decode(
    sequences: &[String],
    password: Option<&str>,
    advisory_level: EcLevel,
) -> Result<Vec<u8>> {
    if sequences.is_empty() {
        return Err(Error::Validation("no sequences supplied".to_string()));
    }

    let results: Vec<Result<Chunk>> = sequences
        .par_iter()
        .enumerate()
        .map(|(position, sequence)| decode_sequence(sequence, position, advisory_level))
        .collect();

    let mut chunks = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (position, result) in results.into_iter().enumerate() {
        match result {
            Ok(chunk) => chunks.push(chunk),
            Err(error) => failures.push(ChunkFailure {
                position: Some(position),
                error,
            }),
        }
    }

    if !failures.is_empty() {
        return Err(Error::Chunks(DecodeReport {
            total: sequences.len(),
            failures,
        }));
    }

    let encrypted = chunks.iter().any(|chunk| chunk.header.is_encrypted());
    let stream = chunker::reassemble(chunks)?;

    if encrypted {
        match password {
            Some(password) => crypto::open(&stream, password),
            None => Err(Error::PasswordRequired),
        }
    } else {
        if password.is_some() {
            log::warn!("password supplied but the payload is not encrypted; ignoring it");
        }
        Ok(stream)
    }
}

/// Recover one chunk from one sequence.
///
/// The error-correction level travels inside the protected block, so it is
/// resolved by candidate trial: the raw header's level byte first, then the
/// caller's advisory level, then whatever remains. A candidate is accepted
/// only when recovery succeeds, the corrected header parses with a matching
/// level, and the data checksum verifies.
fn decode_sequence(sequence: &str, position: usize, advisory: EcLevel) -> Result<Chunk> {
    let raw = symbols::symbols_to_bytes(sequence)?;
    if raw.len() > ecc::MAX_CODEWORD_LEN {
        return Err(Error::Validation(format!(
            "sequence of {} symbols exceeds the maximum of {}",
            sequence.len(),
            crate::config::MAX_BASE_LENGTH
        )));
    }

    let (hint_level, hint_index) = match ChunkHeader::peek(&raw) {
        Some((level, index)) => (level, Some(index)),
        None => (None, None),
    };
    // Best effort only: the raw index byte may itself be corrupted.
    let chunk_hint = hint_index.unwrap_or(position as u32);

    let mut candidates: Vec<EcLevel> = Vec::with_capacity(2);
    for candidate in hint_level
        .into_iter()
        .chain([advisory, EcLevel::Basic, EcLevel::Advanced])
    {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    let mut checksum_failure: Option<Error> = None;

    for level in candidates {
        if raw.len() < HEADER_SIZE + level.parity_len() {
            continue;
        }

        let (block, corrected) = match ecc::recover(&raw, level, chunk_hint) {
            Ok(result) => result,
            Err(_) => continue,
        };

        let chunk_header = match ChunkHeader::decode(&block[..HEADER_SIZE]) {
            Ok(chunk_header) => chunk_header,
            Err(_) => continue,
        };
        if chunk_header.level != level {
            // Recovery converged under the wrong parity length; the
            // corrected header disagrees, so this candidate is a false fit.
            continue;
        }

        let data = block[HEADER_SIZE..].to_vec();
        let actual = header::checksum(&data);
        if actual != chunk_header.checksum {
            checksum_failure = Some(Error::ChecksumMismatch {
                chunk: chunk_header.index,
                expected: chunk_header.checksum,
                actual,
            });
            continue;
        }

        if corrected > 0 {
            log::debug!(
                "sequence {}: corrected {} byte(s) in chunk {}",
                position,
                corrected,
                chunk_header.index
            );
        }

        return Ok(Chunk {
            header: chunk_header,
            data,
        });
    }

    Err(checksum_failure.unwrap_or(Error::Uncorrectable { chunk: chunk_hint }))
}
