//! # Password Encryption
//!
//! Password-based authenticated encryption of the envelope body:
//! - PBKDF2-HMAC-SHA256 derives a 256-bit key from password and salt
//! - ChaCha20-Poly1305 encrypts and authenticates the text
//!
//! Body format: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::envelope::SALT_LEN;
use super::error::StegoError;

/// Default PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Nonce size for ChaCha20Poly1305.
const NONCE_SIZE: usize = 12;

/// Poly1305 tag size.
const TAG_SIZE: usize = 16;

/// Fresh random salt from the operating system.
pub fn random_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive the 32-byte body key from a password.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN], iterations: u32) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

/// Encrypt `plaintext`, prepending a random nonce.
pub fn seal(plaintext: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, StegoError> {
    let cipher = ChaCha20Poly1305::new_from_slice(key)
        .map_err(|e| StegoError::InvalidCarrier(format!("cipher setup failed: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| StegoError::AuthenticationFailed)?;

    let mut body = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    body.extend_from_slice(&nonce_bytes);
    body.extend_from_slice(&ciphertext);
    Ok(body)
}

/// Decrypt and authenticate a body produced by [`seal`].
///
/// Any failure, including a body too short to hold nonce and tag, is an
/// [`StegoError::AuthenticationFailed`]; no partial plaintext is returned.
pub fn open(body: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, StegoError> {
    if body.len() < NONCE_SIZE + TAG_SIZE {
        return Err(StegoError::AuthenticationFailed);
    }

    let (nonce, ciphertext) = body.split_at(NONCE_SIZE);
    let cipher =
        ChaCha20Poly1305::new_from_slice(key).map_err(|_| StegoError::AuthenticationFailed)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| StegoError::AuthenticationFailed)
}
