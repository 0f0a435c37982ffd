//! # Configuration Utilities
//!
//! TOML configuration shared by the CLI and the web server. Every section
//! has defaults, so an empty file (or no file at all) is a valid config.
//!
//! ```toml
//! [analyzer]
//! hash_bits = 128
//!
//! [[render.drawers]]
//! kind = "crystal"
//! color = "teal"
//!
//! [[render.drawers]]
//! kind = "core"
//!
//! [stego]
//! kdf_iterations = 100000
//!
//! [server]
//! address = "0.0.0.0:8000"
//! ```

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::simhash::MAX_BITS;
use crate::processing::crypto::KDF_ITERATIONS;
use crate::render::DrawerConfig;

/// Lowest iteration count [`ImprintConfig::validate`] accepts.
pub const MIN_KDF_ITERATIONS: u32 = 1_000;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: ImprintConfig = load_config("config/imprint.toml")?;
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprintConfig {
    pub analyzer: AnalyzerConfig,
    pub render: RenderConfig,
    pub stego: StegoConfig,
    pub server: ServerSettings,
}

impl ImprintConfig {
    /// Load and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: ImprintConfig = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the fingerprinter, renderer or codec cannot work with.
    pub fn validate(&self) -> Result<()> {
        let analyzer = &self.analyzer;
        if analyzer.hash_bits == 0 || analyzer.hash_bits > MAX_BITS || analyzer.hash_bits % 8 != 0 {
            bail!(
                "analyzer.hash_bits must be a multiple of 8 in 8..={}, got {}",
                MAX_BITS,
                analyzer.hash_bits
            );
        }
        if analyzer.n_gram_size == 0 || analyzer.word_shingle_size == 0 {
            bail!("analyzer.n_gram_size and analyzer.word_shingle_size must be at least 1");
        }
        if analyzer.min_canvas_size == 0 || analyzer.min_canvas_size > analyzer.max_canvas_size {
            bail!(
                "analyzer canvas bounds must satisfy 0 < min <= max, got {}..{}",
                analyzer.min_canvas_size,
                analyzer.max_canvas_size
            );
        }

        for drawer in &self.render.drawers {
            if let Err(e) = drawer.validate() {
                bail!("render.drawers: {}", e);
            }
        }

        if self.stego.kdf_iterations < MIN_KDF_ITERATIONS {
            bail!(
                "stego.kdf_iterations must be at least {}, got {}",
                MIN_KDF_ITERATIONS,
                self.stego.kdf_iterations
            );
        }

        if self.server.max_upload_bytes == 0 || self.server.max_text_bytes == 0 {
            bail!("server size limits must be non-zero");
        }
        Ok(())
    }
}

/// Fingerprinter parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Width of character n-grams used for short texts
    pub n_gram_size: usize,
    /// Number of words per shingle used for long texts
    pub word_shingle_size: usize,
    /// Width of the content hash in bits
    pub hash_bits: usize,
    pub min_canvas_size: u32,
    pub max_canvas_size: u32,
    /// Texts shorter than this (in chars) use character n-grams
    pub short_text_threshold: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            n_gram_size: 3,
            word_shingle_size: 2,
            hash_bits: 128,
            min_canvas_size: 1000,
            max_canvas_size: 8000,
            short_text_threshold: 50,
        }
    }
}

/// Render pipeline configuration.
///
/// An empty drawer list means the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub drawers: Vec<DrawerConfig>,
}

/// Steganography configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    /// PBKDF2 rounds; images only decode with the count they were made with
    pub kdf_iterations: u32,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: KDF_ITERATIONS,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address (e.g., "127.0.0.1:8000")
    pub address: String,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
    /// Largest text accepted for imprinting
    pub max_text_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8000".to_string(),
            max_upload_bytes: 64 * 1024 * 1024,
            max_text_bytes: 1024 * 1024,
        }
    }
}
