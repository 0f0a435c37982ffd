//! # Steganography
//!
//! Hides text in the least significant bits of an image, optionally encrypted
//! with a password.

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod steganography;

// Re-export main types for convenience
pub use envelope::{Envelope, EnvelopeHeader, PayloadKind, HEADER_LEN};
pub use error::StegoError;
pub use steganography::StegoCodec;
