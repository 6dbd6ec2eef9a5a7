//! DNA Data Codec
//!
//! Converts arbitrary binary payloads into DNA sequences over the alphabet
//! {A,T,C,G} and losslessly reconstructs them, tolerating bounded per-chunk
//! corruption through Reed-Solomon error correction. Payloads can be wrapped
//! in password-derived AES-256-GCM encryption before encoding.
//!
//! # Features
//!
//! - **2-bit symbol mapping**: 4 nucleotides per byte, a pure bijection
//! - **Reed-Solomon error correction**: two levels, corrects up to 4 or 8
//!   corrupted bytes per sequence
//! - **Self-describing chunks**: every sequence carries its own header;
//!   sequence order never matters
//! - **AES-256-GCM encryption**: authenticated encryption with Argon2id key
//!   derivation
//!
//! # Architecture
//!
//! ```text
//! Encode: Payload → Encrypt (optional) → Chunk → Header → Protect (RS) → Symbols
//! Decode: Symbols → Recover (RS) → Validate → Reassemble → Decrypt (optional)
//! ```
//!
//! # Example
//!
//! ```rust
//! use dna_codec::{decode, encode, CodecConfig, EcLevel};
//!
//! let payload = b"Hello, World!";
//! let output = encode(payload, None, &CodecConfig::default()).unwrap();
//!
//! // Sequence order is irrelevant; headers carry the chunk indices.
//! let decoded = decode(&output.sequences, None, EcLevel::Basic).unwrap();
//! assert_eq!(decoded, payload);
//! ```

pub mod chunker;
pub mod codec;
pub mod config;
pub mod constraints;
pub mod crypto;
pub mod ecc;
pub mod error;
pub mod header;
pub mod symbols;

pub use codec::{decode, encode, probe, EncodeMetadata, EncodeOutput};
pub use config::CodecConfig;
pub use ecc::EcLevel;
pub use error::{Error, Result};
