//! # LSB Steganography Codec
//!
//! Hides a text, optionally password-encrypted, inside the least significant
//! bits of an image and recovers it again.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Wrap the text in an [`Envelope`] (21-byte header + body), encrypting the
//!    body first when a password is given
//! 2. Check the envelope fits: 3 bits per pixel (R, G, B; alpha is dropped)
//! 3. Walk the pixels row by row, left to right, and for each bit of the
//!    envelope (MSB first) overwrite the LSB of the next channel
//!    (R -> G -> B -> next pixel)
//! 4. Leave every channel after the last bit untouched
//!
//! ### Decoding Process
//! 1. Read the first 168 bits (21 bytes) to get flag, body length and salt
//! 2. Read `(21 + length) * 8` bits from the start and drop the header
//! 3. Decrypt with the password when the flag says so, else decode UTF-8
//!
//! ### Capacity
//! An image stores `(width * height * 3) / 8 - 21` bytes of body.
//! Example: a 1000x1000 imprint holds about 366 KB of text.

use image::{DynamicImage, GenericImageView, RgbImage};
use log::debug;

use super::crypto::{derive_key, open, random_salt, seal, KDF_ITERATIONS};
use super::envelope::{Envelope, EnvelopeHeader, PayloadKind, HEADER_LEN};
use super::error::StegoError;

/// Embeds and extracts envelopes.
///
/// Stateless apart from the key-derivation cost, so one codec can serve any
/// number of concurrent calls. The iteration count is not stored in the
/// envelope: encoder and decoder must agree on it.
#[derive(Debug, Clone)]
pub struct StegoCodec {
    kdf_iterations: u32,
}

impl Default for StegoCodec {
    fn default() -> Self {
        Self {
            kdf_iterations: KDF_ITERATIONS,
        }
    }
}

impl StegoCodec {
    /// Create a codec with a custom PBKDF2 iteration count (at least 1).
    pub fn new(kdf_iterations: u32) -> Self {
        Self {
            kdf_iterations: kdf_iterations.max(1),
        }
    }

    pub fn kdf_iterations(&self) -> u32 {
        self.kdf_iterations
    }

    /// Hide `text` in `image`.
    ///
    /// An empty password is treated like no password.
    ///
    /// # Arguments
    /// - `image`: Carrier image, any color type; alpha is discarded
    /// - `text`: UTF-8 text to embed
    /// - `password`: Optional password; a fresh random salt is used per call
    ///
    /// # Returns
    /// - `Ok(RgbImage)`: The carrier with the envelope in its LSBs
    /// - `Err(StegoError::CapacityExceeded)`: The image is too small
    ///
    /// # Example
    /// ```ignore
    /// let stego = codec.encode(&DynamicImage::ImageRgba8(image), "Secret", Some("pw"))?;
    /// ```
    pub fn encode(
        &self,
        image: &DynamicImage,
        text: &str,
        password: Option<&str>,
    ) -> Result<RgbImage, StegoError> {
        let envelope = match password.filter(|p| !p.is_empty()) {
            Some(password) => {
                let salt = random_salt();
                let key = derive_key(password, &salt, self.kdf_iterations);
                Envelope::encrypted(salt, seal(text.as_bytes(), &key)?)?
            }
            None => Envelope::plain(text)?,
        };

        debug!(
            "🔐 Embedding {:?} envelope: {} body bytes, {} bits",
            envelope.header.kind,
            envelope.body.len(),
            envelope.header.total_bits()
        );

        embed_bytes(image, &envelope.to_bytes())
    }

    /// Recover the text hidden in `image`.
    ///
    /// # Errors
    /// - [`StegoError::InvalidCarrier`]: Too small, unknown flag, impossible
    ///   length or a plaintext body that is not UTF-8
    /// - [`StegoError::PasswordRequired`]: Encrypted payload, no password
    /// - [`StegoError::AuthenticationFailed`]: Wrong password or damaged image
    pub fn decode(&self, image: &DynamicImage, password: Option<&str>) -> Result<String, StegoError> {
        let rgb = image.to_rgb8();

        let header_bytes = extract_bytes(&rgb, HEADER_LEN)?;
        let mut raw_header = [0u8; HEADER_LEN];
        raw_header.copy_from_slice(&header_bytes);
        let header = EnvelopeHeader::parse(&raw_header)?;

        let available_bits = channel_count(&rgb);
        if header.total_bits() > available_bits {
            return Err(StegoError::InvalidCarrier(format!(
                "header announces {} body bytes, image holds at most {}",
                header.body_len,
                (available_bits / 8).saturating_sub(HEADER_LEN)
            )));
        }

        let total = extract_bytes(&rgb, HEADER_LEN + header.body_len as usize)?;
        let body = &total[HEADER_LEN..];

        debug!(
            "🔓 Extracted {:?} envelope with {} body bytes",
            header.kind,
            body.len()
        );

        let plaintext = match header.kind {
            PayloadKind::Encrypted => {
                let password = password
                    .filter(|p| !p.is_empty())
                    .ok_or(StegoError::PasswordRequired)?;
                let key = derive_key(password, &header.salt, self.kdf_iterations);
                open(body, &key)?
            }
            PayloadKind::Plain => body.to_vec(),
        };

        String::from_utf8(plaintext)
            .map_err(|_| StegoError::InvalidCarrier("hidden text is not valid UTF-8".to_string()))
    }

    /// Largest text body, in bytes, that `image` can carry unencrypted.
    pub fn capacity(image: &DynamicImage) -> usize {
        let (width, height) = image.dimensions();
        let bits = width as usize * height as usize * 3;
        (bits / 8).saturating_sub(HEADER_LEN)
    }
}

/// Number of usable LSBs: three per pixel.
fn channel_count(image: &RgbImage) -> usize {
    image.as_raw().len()
}

/// Write `data` into the RGB least significant bits of `image`.
///
/// The raw RGB buffer is already in canonical order (row-major, R, G, B per
/// pixel), so bit `i` of the data lands in channel byte `i`.
///
/// # Returns
/// - `Ok(RgbImage)`: Copy of the image (alpha dropped) carrying the data
/// - `Err(StegoError::CapacityExceeded)`: Checked before any pixel is touched
pub fn embed_bytes(image: &DynamicImage, data: &[u8]) -> Result<RgbImage, StegoError> {
    let (width, height) = image.dimensions();
    let available_bits = width as usize * height as usize * 3;
    let required_bits = data.len() * 8;

    if required_bits > available_bits {
        return Err(StegoError::CapacityExceeded {
            needed_bits: required_bits,
            available_bits,
        });
    }

    let mut rgb = image.to_rgb8();
    let channels: &mut [u8] = &mut rgb;

    for (bit_index, channel) in channels.iter_mut().take(required_bits).enumerate() {
        // MSB first within each data byte
        let bit = (data[bit_index / 8] >> (7 - bit_index % 8)) & 1;
        *channel = (*channel & 0xFE) | bit;
    }

    Ok(rgb)
}

/// Read `count` bytes back from the RGB least significant bits of `image`.
pub fn extract_bytes(image: &RgbImage, count: usize) -> Result<Vec<u8>, StegoError> {
    let channels = image.as_raw();
    let required_bits = count * 8;

    if required_bits > channels.len() {
        return Err(StegoError::InvalidCarrier(format!(
            "need {} bits but the image only has {}",
            required_bits,
            channels.len()
        )));
    }

    let mut bytes = vec![0u8; count];
    for (bit_index, channel) in channels.iter().take(required_bits).enumerate() {
        bytes[bit_index / 8] |= (channel & 1) << (7 - bit_index % 8);
    }
    Ok(bytes)
}
