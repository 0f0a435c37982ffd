//! # SimHash
//!
//! Locality-sensitive digest over a stream of features. Texts that share most
//! of their features end up with fingerprints that differ in only a few bits,
//! so near-identical texts produce near-identical images.
//!
//! ## Algorithm
//! 1. Digest every feature occurrence with SHA-256, truncated to `bits`
//! 2. For each bit position add +1 when the feature bit is set, -1 otherwise
//! 3. The fingerprint bit is 1 where the running sum ended up positive
//!
//! Bits are numbered most-significant-first across the byte string, so bit 0
//! is the top bit of byte 0 in both the feature digest and the fingerprint.

use sha2::{Digest, Sha256};

/// Largest supported fingerprint width (one full SHA-256 digest).
pub const MAX_BITS: usize = 256;

/// Compute a `bits`-wide SimHash over `features`.
///
/// Repeated features are counted once per occurrence. An empty feature stream
/// produces an all-zero fingerprint.
///
/// # Arguments
/// - `features`: Feature strings, each with weight 1
/// - `bits`: Fingerprint width, a multiple of 8 no larger than [`MAX_BITS`]
///
/// # Returns
/// The fingerprint as `bits / 8` raw bytes.
pub fn simhash<I, S>(features: I, bits: usize) -> Vec<u8>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let bits = bits.clamp(8, MAX_BITS) / 8 * 8;
    let mut sums = vec![0i64; bits];

    for feature in features {
        let digest = Sha256::digest(feature.as_ref().as_bytes());
        for (i, sum) in sums.iter_mut().enumerate() {
            if (digest[i / 8] >> (7 - i % 8)) & 1 == 1 {
                *sum += 1;
            } else {
                *sum -= 1;
            }
        }
    }

    let mut out = vec![0u8; bits / 8];
    for (i, sum) in sums.iter().enumerate() {
        if *sum > 0 {
            out[i / 8] |= 1 << (7 - i % 8);
        }
    }
    out
}

/// Number of differing bits between two equally sized fingerprints.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}
