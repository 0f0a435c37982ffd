//! # Render Pipeline
//!
//! Runs an ordered list of drawers over a transparent overlay and composites
//! the result onto an opaque white background.
//!
//! ```text
//! Fingerprint -> [drawer 1] -> [drawer 2] -> ... -> overlay
//!                                                     |
//!                         white background <- alpha composite
//! ```

use image::{Rgba, RgbaImage};
use log::debug;
use std::time::Instant;

use super::drawers::{default_drawers, DrawerConfig};
use super::raster::alpha_composite;
use crate::analysis::Fingerprint;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Paints fingerprints into images.
///
/// Holds only the default drawer list, so a single pipeline can be shared
/// between any number of concurrent renders.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    default_drawers: Vec<DrawerConfig>,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(default_drawers())
    }
}

impl RenderPipeline {
    /// Create a pipeline; an empty list means the built-in default drawers.
    pub fn new(drawers: Vec<DrawerConfig>) -> Self {
        let default_drawers = if drawers.is_empty() {
            default_drawers()
        } else {
            drawers
        };
        Self { default_drawers }
    }

    pub fn default_drawers(&self) -> &[DrawerConfig] {
        &self.default_drawers
    }

    /// Render a fingerprint.
    ///
    /// # Arguments
    /// - `fingerprint`: Output of the fingerprinter
    /// - `drawers`: Drawers to run in order; `None` or an empty slice selects
    ///   the pipeline defaults
    ///
    /// # Returns
    /// A fully opaque `canvas_size x canvas_size` image.
    pub fn render(&self, fingerprint: &Fingerprint, drawers: Option<&[DrawerConfig]>) -> RgbaImage {
        let drawers = match drawers {
            Some(list) if !list.is_empty() => list,
            _ => self.default_drawers.as_slice(),
        };

        let size = fingerprint.canvas_size;
        let mut overlay = RgbaImage::new(size, size);

        for drawer in drawers {
            let started = Instant::now();
            drawer.draw(&mut overlay, fingerprint);
            debug!("🎨 {} drawer finished in {:?}", drawer.kind, started.elapsed());
        }

        let mut image = RgbaImage::from_pixel(size, size, BACKGROUND);
        alpha_composite(&mut image, &overlay);
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Fingerprinter;
    use crate::render::drawers::DrawerKind;

    #[test]
    fn test_hello_world_is_1000_square_and_opaque() {
        let fp = Fingerprinter::default().analyze("Hello, world!");
        let image = RenderPipeline::default().render(&fp, None);

        assert_eq!(image.dimensions(), (1000, 1000));
        assert!(image.pixels().all(|p| p.0[3] == 255));
        assert!(image.pixels().any(|p| p.0 != [255, 255, 255, 255]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let fp = Fingerprinter::default().analyze("determinism matters");
        let pipeline = RenderPipeline::default();
        let drawers = [
            DrawerConfig::new(DrawerKind::Crystal),
            DrawerConfig::new(DrawerKind::Flow),
            DrawerConfig::new(DrawerKind::Genesis),
        ];

        let a = pipeline.render(&fp, Some(&drawers));
        let b = pipeline.render(&fp, Some(&drawers));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_different_texts_differ() {
        let analyzer = Fingerprinter::default();
        let pipeline = RenderPipeline::default();
        let a = pipeline.render(&analyzer.analyze("first text"), None);
        let b = pipeline.render(&analyzer.analyze("second text"), None);
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_drawer_order_matters() {
        let fp = Fingerprinter::default().analyze("order");
        let pipeline = RenderPipeline::default();
        let core = DrawerConfig::new(DrawerKind::Core).with_alpha(255);
        let crystal = DrawerConfig::new(DrawerKind::Crystal).with_alpha(255);

        let core_on_top = pipeline.render(&fp, Some(&[crystal.clone(), core.clone()]));
        let crystal_on_top = pipeline.render(&fp, Some(&[core, crystal]));
        assert_ne!(core_on_top.as_raw(), crystal_on_top.as_raw());
    }

    #[test]
    fn test_empty_list_uses_defaults() {
        let fp = Fingerprinter::default().analyze("defaults");
        let pipeline = RenderPipeline::default();
        assert_eq!(
            pipeline.render(&fp, Some(&[])).as_raw(),
            pipeline.render(&fp, None).as_raw()
        );
    }
}
