//! # Text Analysis
//!
//! Derives the [`Fingerprint`] of a text: a locality-sensitive hash, the
//! canvas size and character statistics.
//!
//! ## Modules
//!
//! - [`features`]: Character n-grams and word shingles
//! - [`simhash`]: Bit-voting digest over features
//! - [`fingerprint`]: The [`Fingerprinter`] itself

pub mod features;
pub mod fingerprint;
pub mod simhash;

pub use fingerprint::{char_stats, incremental_hash, Fingerprint, Fingerprinter};
