//! Fixed-layout per-chunk metadata block.
//!
//! Every chunk opens with the same 23-byte header, little-endian:
//!
//! ```text
//! +---------------+
//! | version (1)   |  format version, currently 1
//! +---------------+
//! | flags (1)     |  bit 0: payload is encrypted
//! +---------------+
//! | level (1)     |  error-correction level wire code
//! +---------------+
//! | index (4)     |  u32, 0-based chunk index
//! +---------------+
//! | total (4)     |  u32, total chunk count
//! +---------------+
//! | stream_len (8)|  u64, byte length of the chunked stream
//! +---------------+
//! | checksum (4)  |  u32, CRC32 of the chunk's data bytes only
//! +---------------+
//! ```
//!
//! `total` and `stream_len` are replicated on every chunk; the reassembler
//! cross-checks them. The checksum covers the data bytes, not the header:
//! corruption detection is primarily the Reed-Solomon coder's job and the
//! CRC is the final confirmation after correction.

use crate::ecc::EcLevel;
use crate::error::{Error, Result};

/// Header size in bytes.
pub const HEADER_SIZE: usize = 23;

/// Current header format version.
pub const HEADER_VERSION: u8 = 1;

/// Flag bit: the chunked stream is an encryption envelope.
pub const FLAG_ENCRYPTED: u8 = 0b0000_0001;

/// Parsed per-chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Format version.
    pub version: u8,
    /// Flag bits.
    pub flags: u8,
    /// Error-correction level used for this chunk.
    pub level: EcLevel,
    /// 0-based chunk index.
    pub index: u32,
    /// Total chunk count, identical across all chunks of one encode.
    pub total: u32,
    /// Byte length of the chunked stream, identical across all chunks.
    pub stream_len: u64,
    /// CRC32 of the chunk's data bytes.
    pub checksum: u32,
}

impl ChunkHeader {
    /// Build a header for one chunk of an encode call.
    pub fn new(
        level: EcLevel,
        encrypted: bool,
        index: u32,
        total: u32,
        stream_len: u64,
        data: &[u8],
    ) -> Self {
        Self {
            version: HEADER_VERSION,
            flags: if encrypted { FLAG_ENCRYPTED } else { 0 },
            level,
            index,
            total,
            stream_len,
            checksum: checksum(data),
        }
    }

    /// Whether the encrypted flag is set.
    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }

    /// Serialize to the fixed wire layout.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0] = self.version;
        bytes[1] = self.flags;
        bytes[2] = self.level.code();
        bytes[3..7].copy_from_slice(&self.index.to_le_bytes());
        bytes[7..11].copy_from_slice(&self.total.to_le_bytes());
        bytes[11..19].copy_from_slice(&self.stream_len.to_le_bytes());
        bytes[19..23].copy_from_slice(&self.checksum.to_le_bytes());
        bytes
    }

    /// Parse the fixed wire layout.
    ///
    /// Fails with a validation error on an unrecognized version or level, or
    /// when the fields are structurally inconsistent (index past the total,
    /// zero total).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::Validation(format!(
                "header needs {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        let version = bytes[0];
        if version != HEADER_VERSION {
            return Err(Error::Validation(format!(
                "unrecognized header version {}",
                version
            )));
        }

        let flags = bytes[1];
        let level = EcLevel::from_code(bytes[2]).ok_or_else(|| {
            Error::Validation(format!("unrecognized error-correction code {}", bytes[2]))
        })?;

        let index = u32::from_le_bytes(bytes[3..7].try_into().unwrap());
        let total = u32::from_le_bytes(bytes[7..11].try_into().unwrap());
        let stream_len = u64::from_le_bytes(bytes[11..19].try_into().unwrap());
        let checksum = u32::from_le_bytes(bytes[19..23].try_into().unwrap());

        if total == 0 {
            return Err(Error::Validation("total chunk count is zero".to_string()));
        }
        if index >= total {
            return Err(Error::Validation(format!(
                "chunk index {} is not below total count {}",
                index, total
            )));
        }

        Ok(Self {
            version,
            flags,
            level,
            index,
            total,
            stream_len,
            checksum,
        })
    }

    /// Read header fields from an uncorrected block, without validation.
    ///
    /// Used to pick the error-correction candidate order and to attach a
    /// best-effort chunk index to failure reports. The bytes may be
    /// corrupted, so the result is a hint, never an authority.
    pub fn peek(bytes: &[u8]) -> Option<(Option<EcLevel>, u32)> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }
        let level = EcLevel::from_code(bytes[2]);
        let index = u32::from_le_bytes(bytes[3..7].try_into().unwrap());
        Some((level, index))
    }
}

/// Fast integrity digest over a chunk's data bytes.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> ChunkHeader {
        ChunkHeader::new(EcLevel::Advanced, true, 3, 10, 1234, b"chunk data")
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let header = sample_header();
        let bytes = header.encode();
        let parsed = ChunkHeader::decode(&bytes).unwrap();

        assert_eq!(parsed, header);
        assert!(parsed.is_encrypted());
        assert_eq!(parsed.level, EcLevel::Advanced);
        assert_eq!(parsed.checksum, checksum(b"chunk data"));
    }

    #[test]
    fn test_unencrypted_flag() {
        let header = ChunkHeader::new(EcLevel::Basic, false, 0, 1, 0, b"");
        assert!(!header.is_encrypted());
    }

    #[test]
    fn test_bad_version_rejected() {
        let mut bytes = sample_header().encode();
        bytes[0] = 9;
        assert!(matches!(
            ChunkHeader::decode(&bytes),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_bad_level_rejected() {
        let mut bytes = sample_header().encode();
        bytes[2] = 7;
        assert!(matches!(
            ChunkHeader::decode(&bytes),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_index_past_total_rejected() {
        let mut bytes = sample_header().encode();
        bytes[3..7].copy_from_slice(&10u32.to_le_bytes());
        assert!(matches!(
            ChunkHeader::decode(&bytes),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_zero_total_rejected() {
        let mut bytes = sample_header().encode();
        bytes[3..7].copy_from_slice(&0u32.to_le_bytes());
        bytes[7..11].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            ChunkHeader::decode(&bytes),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_short_input_rejected() {
        assert!(matches!(
            ChunkHeader::decode(&[1, 0, 0]),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_peek_reads_hint_fields() {
        let bytes = sample_header().encode();
        let (level, index) = ChunkHeader::peek(&bytes).unwrap();
        assert_eq!(level, Some(EcLevel::Advanced));
        assert_eq!(index, 3);
    }

    #[test]
    fn test_checksum_covers_data_only() {
        let a = ChunkHeader::new(EcLevel::Basic, false, 0, 2, 100, b"same data");
        let b = ChunkHeader::new(EcLevel::Basic, false, 1, 2, 100, b"same data");
        assert_eq!(a.checksum, b.checksum);
    }
}
