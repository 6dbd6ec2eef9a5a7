//! Configuration constants and types for the DNA codec.

use crate::ecc::{EcLevel, MAX_CODEWORD_LEN};
use crate::error::{Error, Result};
use crate::header::HEADER_SIZE;
use serde::{Deserialize, Serialize};

/// Default sequence length in symbols.
pub const DEFAULT_BASE_LENGTH: usize = 200;

/// Symbols produced per payload byte (2 bits each).
pub const SYMBOLS_PER_BYTE: usize = 4;

/// Maximum supported sequence length in symbols.
pub const MAX_BASE_LENGTH: usize = MAX_CODEWORD_LEN * SYMBOLS_PER_BYTE;

/// Argon2id parameters for key derivation.
pub mod argon2_params {
    /// Memory cost in KiB (64 MB).
    pub const MEMORY_COST: u32 = 65536;

    /// Time cost (iterations).
    pub const TIME_COST: u32 = 3;

    /// Parallelism factor.
    pub const PARALLELISM: u32 = 4;

    /// Output length in bytes (256 bits).
    pub const OUTPUT_LENGTH: usize = 32;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 32;
}

/// Immutable per-call configuration for encoding.
///
/// Decoding needs no configuration beyond an advisory level: the chunk
/// headers are authoritative for everything else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Target sequence length in symbols.
    pub base_length: usize,

    /// Error-correction level applied to every chunk.
    pub level: EcLevel,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            base_length: DEFAULT_BASE_LENGTH,
            level: EcLevel::Basic,
        }
    }
}

impl CodecConfig {
    /// Create a new configuration.
    pub fn new(base_length: usize, level: EcLevel) -> Self {
        Self { base_length, level }
    }

    /// Payload bytes carried per sequence at this configuration.
    ///
    /// Solves for the chunk size such that header + data + parity, once
    /// symbol-mapped, fills `base_length` symbols exactly. Fails with a
    /// configuration error when `base_length` cannot accommodate at least
    /// one payload byte after overhead.
    pub fn chunk_capacity(&self) -> Result<usize> {
        if self.base_length == 0 || self.base_length % SYMBOLS_PER_BYTE != 0 {
            return Err(Error::Configuration(format!(
                "base length {} must be a positive multiple of {}",
                self.base_length, SYMBOLS_PER_BYTE
            )));
        }

        let block_len = self.base_length / SYMBOLS_PER_BYTE;
        if block_len > MAX_CODEWORD_LEN {
            return Err(Error::Configuration(format!(
                "base length {} exceeds the maximum of {} symbols",
                self.base_length, MAX_BASE_LENGTH
            )));
        }

        let overhead = HEADER_SIZE + self.level.parity_len();
        if block_len <= overhead {
            return Err(Error::Configuration(format!(
                "base length {} leaves no room for payload: {} bytes of header and parity \
                 overhead need at least {} symbols",
                self.base_length,
                overhead,
                (overhead + 1) * SYMBOLS_PER_BYTE
            )));
        }

        Ok(block_len - overhead)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.chunk_capacity().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let config = CodecConfig::default();
        // 200 symbols -> 50-byte block, minus 23 header and 8 parity.
        assert_eq!(config.chunk_capacity().unwrap(), 19);
    }

    #[test]
    fn test_advanced_capacity_is_smaller() {
        let basic = CodecConfig::new(200, EcLevel::Basic);
        let advanced = CodecConfig::new(200, EcLevel::Advanced);
        assert!(advanced.chunk_capacity().unwrap() < basic.chunk_capacity().unwrap());
    }

    #[test]
    fn test_base_length_not_multiple_of_four() {
        let config = CodecConfig::new(201, EcLevel::Basic);
        assert!(matches!(
            config.chunk_capacity(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_base_length_too_small() {
        // 124 symbols -> 31-byte block == header + parity with no payload room.
        let config = CodecConfig::new(124, EcLevel::Basic);
        assert!(matches!(
            config.chunk_capacity(),
            Err(Error::Configuration(_))
        ));

        // One more byte of room is enough.
        let config = CodecConfig::new(128, EcLevel::Basic);
        assert_eq!(config.chunk_capacity().unwrap(), 1);
    }

    #[test]
    fn test_base_length_beyond_codeword_limit() {
        let config = CodecConfig::new(MAX_BASE_LENGTH + 4, EcLevel::Basic);
        assert!(matches!(
            config.chunk_capacity(),
            Err(Error::Configuration(_))
        ));

        let config = CodecConfig::new(MAX_BASE_LENGTH, EcLevel::Basic);
        assert!(config.chunk_capacity().is_ok());
    }
}
