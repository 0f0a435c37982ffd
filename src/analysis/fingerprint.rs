//! # Fingerprinter
//!
//! Turns text into a [`Fingerprint`]: the SimHash that gives an image its
//! identity and seeds all of its pseudo-randomness, the canvas size, and the
//! per-character statistics used by the Crystal drawer.

use log::debug;
use serde::Serialize;
use hex::FromHexError;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use super::features::Features;
use super::simhash::simhash;
use crate::common::config::AnalyzerConfig;

/// Everything the render pipeline needs to know about a text.
///
/// The hash is only set through [`Fingerprinter::analyze`] or
/// [`Fingerprint::from_hash`], so it is always valid hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingerprint {
    /// Lowercase hex SimHash, zero-padded to the full digest width
    hash: String,
    #[serde(skip)]
    bytes: Vec<u8>,
    /// Side length of the square canvas in pixels
    pub canvas_size: u32,
    /// Number of chars in the text (1 for empty text)
    pub symbols_count: usize,
    /// Distinct chars with their counts, in order of first occurrence
    pub char_stats: Vec<(char, usize)>,
}

impl Fingerprint {
    /// Rebuild a fingerprint from a previously reported hash.
    ///
    /// # Returns
    /// - `Ok(Fingerprint)`: The hash decoded cleanly
    /// - `Err(FromHexError)`: Odd length or a non-hex digit
    ///
    /// # Example
    /// ```ignore
    /// let fingerprint = Fingerprint::from_hash("0f3a...", 1000, 13, vec![])?;
    /// ```
    pub fn from_hash(
        hash: &str,
        canvas_size: u32,
        symbols_count: usize,
        char_stats: Vec<(char, usize)>,
    ) -> Result<Self, FromHexError> {
        let bytes = hex::decode(hash)?;
        Ok(Self {
            hash: hex::encode(&bytes),
            bytes,
            canvas_size,
            symbols_count: symbols_count.max(1),
            char_stats,
        })
    }

    /// Lowercase hex SimHash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The hash as raw bytes, one per pair of hex digits.
    pub fn byte_list(&self) -> &[u8] {
        &self.bytes
    }

    /// Canvas size relative to the 1000px reference canvas.
    pub fn scale_factor(&self) -> f64 {
        self.canvas_size as f64 / 1000.0
    }

    /// The hash as an integer modulo 2^32, used to seed drawer generators.
    pub fn seed(&self) -> u64 {
        let tail = &self.bytes[self.bytes.len().saturating_sub(4)..];
        tail.iter().fold(0u64, |seed, &byte| (seed << 8) | byte as u64)
    }
}

/// Text analyzer producing [`Fingerprint`]s.
///
/// Stateless apart from its parameters; one instance serves any number of
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter {
    config: AnalyzerConfig,
}

impl Fingerprinter {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a text.
    ///
    /// Never fails: empty text yields a valid fingerprint with
    /// `symbols_count = 1` and the minimum canvas size.
    ///
    /// # Example
    /// ```ignore
    /// let fingerprint = Fingerprinter::default().analyze("Hello, world!");
    /// assert_eq!(fingerprint.hash().len(), 32);
    /// assert_eq!(fingerprint.canvas_size, 1000);
    /// ```
    pub fn analyze(&self, text: &str) -> Fingerprint {
        let features = Features::new(
            text,
            self.config.short_text_threshold,
            self.config.n_gram_size,
            self.config.word_shingle_size,
        );
        let bytes = simhash(features, self.config.hash_bits);

        let length = text.chars().count();
        let fingerprint = Fingerprint {
            hash: hex::encode(&bytes),
            bytes,
            canvas_size: self.canvas_size(length),
            symbols_count: length.max(1),
            char_stats: char_stats(text),
        };

        debug!(
            "🔎 Fingerprint {} (canvas {}px, {} symbols, {} distinct)",
            fingerprint.hash,
            fingerprint.canvas_size,
            fingerprint.symbols_count,
            fingerprint.char_stats.len()
        );

        fingerprint
    }

    /// Canvas side for a text of `length` chars.
    ///
    /// Grows with `log10(length)`: the range [2, 6] (100 chars to a million)
    /// maps linearly onto [min, max], clamped at both ends.
    pub fn canvas_size(&self, length: usize) -> u32 {
        let min = self.config.min_canvas_size;
        let max = self.config.max_canvas_size;
        if length <= 100 {
            return min;
        }

        let scale = ((length as f64).log10() - 2.0) / (6.0 - 2.0);
        let size = min as f64 + max.saturating_sub(min) as f64 * scale.clamp(0.0, 1.0);
        size as u32
    }
}

/// Count every distinct char of `text`, keeping first-occurrence order.
pub fn char_stats(text: &str) -> Vec<(char, usize)> {
    let mut index: HashMap<char, usize> = HashMap::new();
    let mut stats: Vec<(char, usize)> = Vec::new();

    for c in text.chars() {
        match index.get(&c) {
            Some(&i) => stats[i].1 += 1,
            None => {
                index.insert(c, stats.len());
                stats.push((c, 1));
            }
        }
    }
    stats
}

/// Append-only hash: the first 8 hex digits of SHA-256 for every
/// whitespace-separated part, concatenated.
///
/// Adding words to the end of a text only ever extends this hash, which makes
/// it a natural input for the prefix-stable Genesis walk.
pub fn incremental_hash(text: &str) -> String {
    text.split_whitespace()
        .map(|part| {
            let digest = Sha256::digest(part.as_bytes());
            hex::encode(&digest[..4])
        })
        .collect()
}
