//! Reed-Solomon error correction over GF(256).
//!
//! Each protected block is a single systematic codeword: the header and data
//! bytes followed by level-dependent parity bytes. The code locates and
//! corrects up to `parity / 2` erroneous bytes per block.

use crate::error::{Error, Result};
use reed_solomon::{Decoder, Encoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum codeword length (data + parity) over GF(256).
pub const MAX_CODEWORD_LEN: usize = 255;

/// Error-correction level.
///
/// A closed two-variant kind rather than an open numeric knob, so that
/// encode/decode level compatibility is checkable structurally. The level
/// travels in every chunk header; the decoder never trusts a caller-supplied
/// level over the header's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcLevel {
    /// 8 parity bytes per block, corrects up to 4 erroneous bytes.
    Basic,
    /// 16 parity bytes per block, corrects up to 8 erroneous bytes.
    Advanced,
}

impl EcLevel {
    /// Number of parity bytes appended to each block.
    pub fn parity_len(self) -> usize {
        match self {
            EcLevel::Basic => 8,
            EcLevel::Advanced => 16,
        }
    }

    /// Maximum number of erroneous bytes the code guarantees to fix per block.
    pub fn correction_bound(self) -> usize {
        self.parity_len() / 2
    }

    /// Wire code carried in the chunk header.
    pub fn code(self) -> u8 {
        match self {
            EcLevel::Basic => 0,
            EcLevel::Advanced => 1,
        }
    }

    /// Parse the wire code from a chunk header.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(EcLevel::Basic),
            1 => Some(EcLevel::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcLevel::Basic => write!(f, "basic"),
            EcLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for EcLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(EcLevel::Basic),
            "advanced" => Ok(EcLevel::Advanced),
            other => Err(Error::Configuration(format!(
                "unknown error-correction level '{}', expected 'basic' or 'advanced'",
                other
            ))),
        }
    }
}

/// Append Reed-Solomon parity bytes to a block.
///
/// The code is systematic: the returned vector is `block` unchanged followed
/// by `level.parity_len()` parity bytes. `block.len() + parity` must stay
/// within the GF(256) codeword limit of 255 bytes; the orchestrator's
/// configuration check enforces this before any block is built.
pub fn protect(block: &[u8], level: EcLevel) -> Vec<u8> {
    let encoder = Encoder::new(level.parity_len());
    encoder.encode(block).to_vec()
}

/// Locate and correct corrupted bytes in a protected block.
///
/// Returns the data region (parity stripped) together with the number of
/// corrections applied. Fails with [`Error::Uncorrectable`] when more bytes
/// are wrong than the level's correction bound; `chunk` is a best-effort
/// index for the failure report, supplied by the caller.
pub fn recover(protected: &[u8], level: EcLevel, chunk: u32) -> Result<(Vec<u8>, usize)> {
    if protected.len() <= level.parity_len() {
        return Err(Error::Validation(format!(
            "protected block of {} bytes is too short for {} parity bytes",
            protected.len(),
            level.parity_len()
        )));
    }
    if protected.len() > MAX_CODEWORD_LEN {
        return Err(Error::Validation(format!(
            "protected block of {} bytes exceeds the {}-byte codeword limit",
            protected.len(),
            MAX_CODEWORD_LEN
        )));
    }

    let decoder = Decoder::new(level.parity_len());
    let (corrected, count) = decoder
        .correct_err_count(protected, None)
        .map_err(|_| Error::Uncorrectable { chunk })?;

    Ok((corrected.data().to_vec(), count))
}
