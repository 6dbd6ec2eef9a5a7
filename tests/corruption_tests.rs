//! Corruption resilience tests: bounded symbol damage must decode cleanly,
//! damage past the correction bound must be reported, never returned as
//! silent garbage.

use dna_codec::{decode, encode, CodecConfig, EcLevel, Error};

fn payload_of(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 13 + 5) % 256) as u8).collect()
}

/// Flip one symbol to a different nucleotide, changing exactly one byte of
/// the underlying block when positions are 4 apart.
fn flip_symbol(sequence: &mut String, position: usize) {
    let flipped = match sequence.as_bytes()[position] {
        b'A' => 'G',
        b'T' => 'C',
        b'C' => 'T',
        b'G' => 'A',
        other => panic!("unexpected symbol {}", other as char),
    };
    sequence.replace_range(position..position + 1, &flipped.to_string());
}

/// Corrupt `count` distinct bytes of one sequence by flipping one symbol in
/// each of `count` different 4-symbol groups.
fn corrupt_bytes(sequence: &mut String, count: usize) {
    for i in 0..count {
        flip_symbol(sequence, i * 4);
    }
}

#[test]
fn test_corruption_within_basic_bound_recovers() {
    let config = CodecConfig::new(200, EcLevel::Basic);
    let payload = payload_of(100);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    corrupt_bytes(&mut sequences[0], EcLevel::Basic.correction_bound());

    assert_eq!(decode(&sequences, None, EcLevel::Basic).unwrap(), payload);
}

#[test]
fn test_corruption_within_advanced_bound_recovers() {
    let config = CodecConfig::new(200, EcLevel::Advanced);
    let payload = payload_of(100);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    corrupt_bytes(&mut sequences[0], EcLevel::Advanced.correction_bound());

    assert_eq!(decode(&sequences, None, EcLevel::Advanced).unwrap(), payload);
}

#[test]
fn test_corruption_in_every_chunk_recovers() {
    let config = CodecConfig::new(200, EcLevel::Basic);
    let payload = payload_of(150);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    assert!(sequences.len() > 1);
    for sequence in sequences.iter_mut() {
        corrupt_bytes(sequence, 2);
    }

    assert_eq!(decode(&sequences, None, EcLevel::Basic).unwrap(), payload);
}

#[test]
fn test_corruption_beyond_bound_is_reported() {
    let config = CodecConfig::new(200, EcLevel::Basic);
    let payload = payload_of(100);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    corrupt_bytes(&mut sequences[0], EcLevel::Basic.correction_bound() + 1);

    match decode(&sequences, None, EcLevel::Basic) {
        Err(Error::Chunks(report)) => {
            assert_eq!(report.failures.len(), 1);
            assert_eq!(report.failures[0].position, Some(0));
            assert!(matches!(
                report.failures[0].error,
                Error::Uncorrectable { .. } | Error::ChecksumMismatch { .. }
            ));
        }
        Ok(decoded) => assert_ne!(decoded, payload, "garbage must never decode silently"),
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[test]
fn test_all_broken_chunks_reported_at_once() {
    let config = CodecConfig::new(128, EcLevel::Basic);
    let chunk_size = config.chunk_capacity().unwrap();
    let payload = payload_of(chunk_size * 5);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    assert_eq!(sequences.len(), 5);
    corrupt_bytes(&mut sequences[1], EcLevel::Basic.correction_bound() + 1);
    corrupt_bytes(&mut sequences[3], EcLevel::Basic.correction_bound() + 1);

    match decode(&sequences, None, EcLevel::Basic) {
        Err(Error::Chunks(report)) => {
            assert_eq!(report.total, 5);
            let positions: Vec<_> = report
                .failures
                .iter()
                .filter_map(|f| f.position)
                .collect();
            assert_eq!(positions, vec![1, 3]);
        }
        other => panic!("expected a consolidated report, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_duplicate_chunk_index_rejected() {
    let config = CodecConfig::default();
    let payload = payload_of(100);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    assert!(sequences.len() >= 2);
    sequences[1] = sequences[0].clone();

    assert!(matches!(
        decode(&sequences, None, EcLevel::Basic),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_missing_chunk_named() {
    let config = CodecConfig::default();
    let payload = payload_of(100);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    let total = sequences.len() as u32;
    assert!(total >= 3);
    sequences.remove(2);

    match decode(&sequences, None, EcLevel::Basic) {
        Err(Error::MissingChunk { index, total: t }) => {
            assert_eq!(index, 2);
            assert_eq!(t, total);
        }
        other => panic!("expected missing chunk error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_multiple_missing_chunks_all_named() {
    let config = CodecConfig::new(128, EcLevel::Basic);
    let chunk_size = config.chunk_capacity().unwrap();
    let payload = payload_of(chunk_size * 6);

    let mut sequences = encode(&payload, None, &config).unwrap().sequences;
    sequences.remove(4);
    sequences.remove(1);

    match decode(&sequences, None, EcLevel::Basic) {
        Err(Error::Chunks(report)) => {
            let missing: Vec<_> = report
                .failures
                .iter()
                .filter_map(|f| match f.error {
                    Error::MissingChunk { index, .. } => Some(index),
                    _ => None,
                })
                .collect();
            assert_eq!(missing, vec![1, 4]);
        }
        other => panic!("expected a consolidated report, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_corrupted_encrypted_payload_recovers_within_bound() {
    let config = CodecConfig::new(200, EcLevel::Advanced);
    let payload = payload_of(80);
    let password = "resilient_secret";

    let mut sequences = encode(&payload, Some(password), &config).unwrap().sequences;
    for sequence in sequences.iter_mut() {
        corrupt_bytes(sequence, 3);
    }

    let decoded = decode(&sequences, Some(password), EcLevel::Advanced).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn test_foreign_text_rejected_as_validation_error() {
    let sequences = vec!["THIS IS NOT DNA".to_string()];
    match decode(&sequences, None, EcLevel::Basic) {
        Err(Error::Chunks(report)) => {
            assert!(matches!(report.failures[0].error, Error::Validation(_)));
        }
        other => panic!("expected chunk report, got {:?}", other.map(|_| ())),
    }
}
