//! Splitting the byte stream into chunks and merging validated chunks back.

use crate::error::{ChunkFailure, DecodeReport, Error, Result};
use crate::header::ChunkHeader;
use std::collections::HashMap;

/// A chunk recovered from one sequence: validated header plus data bytes.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The chunk's header, already structurally validated and CRC-checked.
    pub header: ChunkHeader,
    /// The chunk's data bytes.
    pub data: Vec<u8>,
}

/// Split a stream into chunks of `chunk_size` bytes.
///
/// The last chunk may be shorter and is never padded; the header's stream
/// length carries the exact byte count so decode trims nothing. An empty
/// stream still yields one empty chunk, so the headers travel even for a
/// zero-byte payload.
pub fn split(stream: &[u8], chunk_size: usize) -> Vec<&[u8]> {
    if stream.is_empty() {
        return vec![&stream[..0]];
    }
    stream.chunks(chunk_size).collect()
}

/// Merge header-validated, checksum-validated chunks back into the stream.
///
/// Verifies that every chunk reports the same total count and stream length,
/// that the indices form exactly `0..total` with no duplicates, and then
/// concatenates in index order, truncating to the recorded stream length.
/// A duplicate index is rejected rather than guessed at - it is ambiguous
/// which copy to trust.
pub fn reassemble(chunks: Vec<Chunk>) -> Result<Vec<u8>> {
    let first = chunks
        .first()
        .ok_or_else(|| Error::Validation("no chunks to reassemble".to_string()))?;
    let total = first.header.total;
    let stream_len = first.header.stream_len;

    for chunk in &chunks {
        if chunk.header.total != total {
            return Err(Error::Validation(format!(
                "chunk {} reports total count {} but chunk {} reports {}",
                first.header.index, total, chunk.header.index, chunk.header.total
            )));
        }
        if chunk.header.stream_len != stream_len {
            return Err(Error::Validation(format!(
                "chunk {} reports stream length {} but chunk {} reports {}",
                first.header.index, stream_len, chunk.header.index, chunk.header.stream_len
            )));
        }
    }

    let mut by_index: HashMap<u32, Chunk> = HashMap::with_capacity(chunks.len());
    for chunk in chunks {
        let index = chunk.header.index;
        if by_index.insert(index, chunk).is_some() {
            return Err(Error::Validation(format!(
                "duplicate chunk index {}",
                index
            )));
        }
    }

    let missing: Vec<u32> = (0..total).filter(|i| !by_index.contains_key(i)).collect();
    match missing.len() {
        0 => {}
        1 => {
            return Err(Error::MissingChunk {
                index: missing[0],
                total,
            })
        }
        _ => {
            let failures = missing
                .into_iter()
                .map(|index| ChunkFailure {
                    position: None,
                    error: Error::MissingChunk { index, total },
                })
                .collect();
            return Err(Error::Chunks(DecodeReport {
                total: by_index.len(),
                failures,
            }));
        }
    }

    // Extra chunks beyond the declared total would have failed the header's
    // index-below-total check already; by_index now holds exactly 0..total.
    let data_len: usize = by_index.values().map(|chunk| chunk.data.len()).sum();
    let mut stream = Vec::with_capacity(data_len);
    for index in 0..total {
        stream.extend_from_slice(&by_index[&index].data);
    }
    stream.truncate(stream_len as usize);

    Ok(stream)
}
