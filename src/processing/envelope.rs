//! # Payload Envelope
//!
//! The only file format this crate defines: a fixed 21-byte header followed
//! by the body, embedded bit by bit into the carrier image.
//!
//! ```text
//! offset  size  field
//! 0       1     flag: 0x00 plaintext, 0x01 encrypted
//! 1       4     body length, big-endian u32
//! 5       16    salt (all zero for plaintext)
//! 21      n     body
//! ```
//!
//! The layout must stay byte-stable: images written today have to decode
//! with any future version.

use super::error::StegoError;

/// Header length in bytes, independent of the flag.
pub const HEADER_LEN: usize = 21;

/// Key-derivation salt length in bytes.
pub const SALT_LEN: usize = 16;

/// How the body is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PayloadKind {
    /// Body is the raw UTF-8 text
    Plain = 0x00,
    /// Body is `nonce || ciphertext || tag`, keyed from password and salt
    Encrypted = 0x01,
}

impl TryFrom<u8> for PayloadKind {
    type Error = StegoError;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0x00 => Ok(PayloadKind::Plain),
            0x01 => Ok(PayloadKind::Encrypted),
            other => Err(StegoError::InvalidCarrier(format!(
                "unknown payload flag 0x{:02x}",
                other
            ))),
        }
    }
}

/// The fixed-width header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeHeader {
    pub kind: PayloadKind,
    pub body_len: u32,
    pub salt: [u8; SALT_LEN],
}

impl EnvelopeHeader {
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0] = self.kind as u8;
        bytes[1..5].copy_from_slice(&self.body_len.to_be_bytes());
        bytes[5..HEADER_LEN].copy_from_slice(&self.salt);
        bytes
    }

    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, StegoError> {
        let kind = PayloadKind::try_from(bytes[0])?;
        let body_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[5..HEADER_LEN]);

        Ok(Self {
            kind,
            body_len,
            salt,
        })
    }

    /// Total embedded size in bits, header included.
    pub fn total_bits(&self) -> usize {
        (HEADER_LEN + self.body_len as usize) * 8
    }
}

/// Header plus body, ready to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub header: EnvelopeHeader,
    pub body: Vec<u8>,
}

impl Envelope {
    /// Plaintext envelope: zero salt, body is the UTF-8 text.
    pub fn plain(text: &str) -> Result<Self, StegoError> {
        Self::new(PayloadKind::Plain, [0u8; SALT_LEN], text.as_bytes().to_vec())
    }

    /// Encrypted envelope around an already sealed body.
    pub fn encrypted(salt: [u8; SALT_LEN], body: Vec<u8>) -> Result<Self, StegoError> {
        Self::new(PayloadKind::Encrypted, salt, body)
    }

    fn new(kind: PayloadKind, salt: [u8; SALT_LEN], body: Vec<u8>) -> Result<Self, StegoError> {
        let body_len = u32::try_from(body.len()).map_err(|_| StegoError::CapacityExceeded {
            needed_bits: (HEADER_LEN + body.len()) * 8,
            available_bits: (HEADER_LEN + u32::MAX as usize) * 8,
        })?;

        Ok(Self {
            header: EnvelopeHeader {
                kind,
                body_len,
                salt,
            },
            body,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.body.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
