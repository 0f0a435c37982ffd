//! Error kinds of the steganographic codec.

use thiserror::Error;

/// Why an encode or decode call failed.
///
/// Every failure is local to the call: the input image is never modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The envelope does not fit into the carrier's RGB least significant bits
    #[error("Image too small for this payload: need {needed_bits} bits but only have {available_bits} bits available")]
    CapacityExceeded {
        needed_bits: usize,
        available_bits: usize,
    },

    /// The payload is encrypted and no password was supplied
    #[error("The hidden text is encrypted, a password is required")]
    PasswordRequired,

    /// Wrong password, or the image is corrupted or was never an imprint
    #[error("Decryption failed: wrong password or corrupted image")]
    AuthenticationFailed,

    /// The image cannot hold or does not contain a valid envelope
    #[error("Invalid carrier image: {0}")]
    InvalidCarrier(String),
}
