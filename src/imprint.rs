//! # Imprint Service
//!
//! Wires the three stages together:
//!
//! ```text
//! create: text -> Fingerprinter -> RenderPipeline -> StegoCodec::encode -> RGB image
//! parse:  image -> StegoCodec::decode -> text
//! ```
//!
//! The `_png` variants add PNG encoding and decoding for callers that deal
//! in bytes (the CLI and the web server).

use image::{DynamicImage, ImageFormat, ImageOutputFormat, RgbImage};
use log::info;
use std::io::Cursor;
use std::time::Instant;
use thiserror::Error;

use crate::analysis::{Fingerprint, Fingerprinter};
use crate::common::config::ImprintConfig;
use crate::processing::{StegoCodec, StegoError};
use crate::render::{DrawerConfig, RenderPipeline};

/// Why a create or parse call failed.
#[derive(Error, Debug)]
pub enum ImprintError {
    #[error(transparent)]
    Stego(#[from] StegoError),

    /// PNG encoding or decoding failed
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}

/// Text-to-image and image-to-text service.
///
/// Holds only configuration, so it is shared between tasks behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ImprintService {
    fingerprinter: Fingerprinter,
    pipeline: RenderPipeline,
    codec: StegoCodec,
}

impl ImprintService {
    pub fn new(fingerprinter: Fingerprinter, pipeline: RenderPipeline, codec: StegoCodec) -> Self {
        Self {
            fingerprinter,
            pipeline,
            codec,
        }
    }

    /// Build the service from the `analyzer`, `render` and `stego` sections.
    ///
    /// # Example
    /// ```ignore
    /// let config = ImprintConfig::from_file("config/imprint.toml")?;
    /// let service = ImprintService::from_config(&config);
    /// ```
    pub fn from_config(config: &ImprintConfig) -> Self {
        Self::new(
            Fingerprinter::new(config.analyzer.clone()),
            RenderPipeline::new(config.render.drawers.clone()),
            StegoCodec::new(config.stego.kdf_iterations),
        )
    }

    pub fn fingerprint(&self, text: &str) -> Fingerprint {
        self.fingerprinter.analyze(text)
    }

    /// Render the fingerprint image of `text` and hide `text` inside it.
    ///
    /// # Arguments
    /// - `text`: Text to imprint (may be empty)
    /// - `password`: Optional password; empty means none
    /// - `drawers`: Drawers for this call; `None` uses the configured defaults
    ///
    /// # Returns
    /// - `Ok(RgbImage)`: The imprint, `canvas_size x canvas_size`
    /// - `Err(ImprintError::Stego)`: The text does not fit its own canvas
    pub fn create(
        &self,
        text: &str,
        password: Option<&str>,
        drawers: Option<&[DrawerConfig]>,
    ) -> Result<RgbImage, ImprintError> {
        let started = Instant::now();

        let fingerprint = self.fingerprinter.analyze(text);
        let image = self.pipeline.render(&fingerprint, drawers);
        let encrypted = password.is_some_and(|p| !p.is_empty());
        let imprint = self
            .codec
            .encode(&DynamicImage::ImageRgba8(image), text, password)?;

        info!(
            "🖼️  Created {}x{} imprint {} ({} chars, encrypted: {}) in {:?}",
            imprint.width(),
            imprint.height(),
            fingerprint.hash(),
            fingerprint.symbols_count,
            encrypted,
            started.elapsed()
        );

        Ok(imprint)
    }

    /// Recover the text hidden in an imprint.
    pub fn parse(&self, image: &DynamicImage, password: Option<&str>) -> Result<String, ImprintError> {
        let text = self.codec.decode(image, password)?;
        info!(
            "📖 Parsed {}x{} imprint ({} bytes of text)",
            image.width(),
            image.height(),
            text.len()
        );
        Ok(text)
    }

    /// [`create`](Self::create), encoded as PNG bytes.
    pub fn create_png(
        &self,
        text: &str,
        password: Option<&str>,
        drawers: Option<&[DrawerConfig]>,
    ) -> Result<Vec<u8>, ImprintError> {
        let imprint = self.create(text, password, drawers)?;
        encode_png(imprint)
    }

    /// [`parse`](Self::parse) from PNG bytes.
    ///
    /// Only PNG is accepted: lossy formats destroy the hidden bits.
    pub fn parse_png(&self, bytes: &[u8], password: Option<&str>) -> Result<String, ImprintError> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        self.parse(&image, password)
    }
}

/// Encode an RGB image as PNG.
pub fn encode_png(image: RgbImage) -> Result<Vec<u8>, ImprintError> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image).write_to(&mut buffer, ImageOutputFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawerKind;

    fn service() -> ImprintService {
        ImprintService::new(
            Fingerprinter::default(),
            RenderPipeline::default(),
            StegoCodec::new(1000),
        )
    }

    #[test]
    fn test_create_and_parse() {
        let service = service();
        let imprint = service.create("Hello, world!", None, None).unwrap();
        assert_eq!(imprint.dimensions(), (1000, 1000));

        let text = service.parse(&DynamicImage::ImageRgb8(imprint), None).unwrap();
        assert_eq!(text, "Hello, world!");
    }

    #[test]
    fn test_png_roundtrip_with_password() {
        let service = service();
        let drawers = [DrawerConfig::new(DrawerKind::Core)];
        let png = service.create_png("a secret", Some("pw"), Some(&drawers)).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        assert_eq!(service.parse_png(&png, Some("pw")).unwrap(), "a secret");
        assert!(matches!(
            service.parse_png(&png, None),
            Err(ImprintError::Stego(StegoError::PasswordRequired))
        ));
    }

    #[test]
    fn test_non_png_bytes_are_an_image_error() {
        let result = service().parse_png(b"definitely not a png", None);
        assert!(matches!(result, Err(ImprintError::Image(_))));
    }

    #[test]
    fn test_from_config_uses_configured_drawers() {
        let mut config = ImprintConfig::default();
        config.render.drawers = vec![DrawerConfig::new(DrawerKind::Genesis)];
        config.stego.kdf_iterations = 1000;
        let service = ImprintService::from_config(&config);

        let configured = service.create("same text", None, None).unwrap();
        let explicit = service
            .create("same text", None, Some(&[DrawerConfig::new(DrawerKind::Genesis)]))
            .unwrap();
        assert_eq!(configured.as_raw(), explicit.as_raw());
    }
}
