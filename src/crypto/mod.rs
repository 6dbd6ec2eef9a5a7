//! Password-based encryption of the payload.
//!
//! Encryption brackets the whole payload: it runs once before chunking on
//! encode and once after reassembly on decode. The envelope layout is
//!
//! ```text
//! salt (32) || nonce (12) || ciphertext || tag (16)
//! ```
//!
//! and the envelope bytes are what gets chunked, so the salt and nonce are
//! error-corrected like any other data and are recoverable before the key
//! is derived on decode. Salt and nonce are generated fresh per encode and
//! never reused across encodes with the same password.

mod cipher;
mod kdf;

pub use cipher::{Cipher, NONCE_SIZE, TAG_SIZE};
pub use kdf::KeyDerivation;

use crate::config::argon2_params;
use crate::error::{Error, Result};

/// Envelope salt length in bytes.
pub const SALT_SIZE: usize = argon2_params::SALT_LENGTH;

/// Fixed envelope overhead: salt + nonce + tag.
pub const ENVELOPE_OVERHEAD: usize = SALT_SIZE + NONCE_SIZE + TAG_SIZE;

/// Encrypt a payload under a password, producing the envelope to be chunked.
pub fn seal(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let kdf = KeyDerivation::new();
    let key = kdf.derive_key(password)?;
    let cipher = Cipher::new(key);

    let sealed = cipher.encrypt(plaintext)?;

    let mut envelope = Vec::with_capacity(SALT_SIZE + sealed.len());
    envelope.extend_from_slice(kdf.salt());
    envelope.extend_from_slice(&sealed);
    Ok(envelope)
}

/// Decrypt a reassembled envelope under a password.
///
/// Fails with [`Error::Authentication`] on a wrong password, tampering, or
/// an envelope too short to carry its own salt, nonce and tag.
pub fn open(envelope: &[u8], password: &str) -> Result<Vec<u8>> {
    if envelope.len() < ENVELOPE_OVERHEAD {
        return Err(Error::Authentication);
    }

    let (salt_bytes, sealed) = envelope.split_at(SALT_SIZE);
    let salt: [u8; SALT_SIZE] = salt_bytes.try_into().expect("salt split length");

    let kdf = KeyDerivation::from_salt(salt);
    let key = kdf.derive_key(password)?;
    let cipher = Cipher::new(key);

    cipher.decrypt(sealed)
}
