//! Fixed 2-bit mapping between bytes and the four-letter alphabet.
//!
//! Each byte maps to exactly four symbols, most significant bit pair first:
//! 00 -> A, 01 -> T, 10 -> C, 11 -> G. The mapping is a pure bijection; no
//! information is lost or reordered.

use crate::config::SYMBOLS_PER_BYTE;
use crate::error::{Error, Result};

/// The alphabet, indexed by 2-bit value.
const NUCLEOTIDES: [char; 4] = ['A', 'T', 'C', 'G'];

/// Convert bytes to a symbol sequence, 4 symbols per byte.
pub fn bytes_to_symbols(bytes: &[u8]) -> String {
    let mut sequence = String::with_capacity(bytes.len() * SYMBOLS_PER_BYTE);
    for &byte in bytes {
        for shift in [6u8, 4, 2, 0] {
            let bits = (byte >> shift) & 0b11;
            sequence.push(NUCLEOTIDES[bits as usize]);
        }
    }
    sequence
}

/// Convert a symbol sequence back to bytes.
///
/// Input is case-insensitive. Fails with a validation error if the length is
/// not a multiple of 4 or any character falls outside the alphabet.
pub fn symbols_to_bytes(sequence: &str) -> Result<Vec<u8>> {
    if sequence.len() % SYMBOLS_PER_BYTE != 0 {
        return Err(Error::Validation(format!(
            "sequence length {} is not a multiple of {}",
            sequence.len(),
            SYMBOLS_PER_BYTE
        )));
    }

    let mut bytes = Vec::with_capacity(sequence.len() / SYMBOLS_PER_BYTE);
    let mut current = 0u8;
    for (position, symbol) in sequence.chars().enumerate() {
        let bits = match symbol.to_ascii_uppercase() {
            'A' => 0u8,
            'T' => 1,
            'C' => 2,
            'G' => 3,
            other => {
                return Err(Error::Validation(format!(
                    "invalid symbol '{}' at position {}",
                    other, position
                )))
            }
        };

        current = (current << 2) | bits;
        if position % SYMBOLS_PER_BYTE == SYMBOLS_PER_BYTE - 1 {
            bytes.push(current);
            current = 0;
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mapping() {
        // 0b00_01_10_11 = 0x1B -> A T C G
        assert_eq!(bytes_to_symbols(&[0x1B]), "ATCG");
        assert_eq!(bytes_to_symbols(&[0x00]), "AAAA");
        assert_eq!(bytes_to_symbols(&[0xFF]), "GGGG");
    }

    #[test]
    fn test_round_trip_all_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let sequence = bytes_to_symbols(&bytes);

        assert_eq!(sequence.len(), bytes.len() * SYMBOLS_PER_BYTE);
        assert!(sequence.chars().all(|c| "ATCG".contains(c)));
        assert_eq!(symbols_to_bytes(&sequence).unwrap(), bytes);
    }

    #[test]
    fn test_empty_round_trip() {
        assert_eq!(bytes_to_symbols(&[]), "");
        assert_eq!(symbols_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_lowercase_input_accepted() {
        assert_eq!(symbols_to_bytes("atcg").unwrap(), vec![0x1B]);
        assert_eq!(symbols_to_bytes("aTcG").unwrap(), vec![0x1B]);
    }

    #[test]
    fn test_invalid_length_rejected() {
        let result = symbols_to_bytes("ATC");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        let result = symbols_to_bytes("ATXG");
        match result {
            Err(Error::Validation(msg)) => {
                assert!(msg.contains('X'));
                assert!(msg.contains("position 2"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
