//! Core drawer: one filled disc at the canvas center whose radius grows with
//! the logarithm of the text length.

use image::RgbaImage;

use super::{center, DrawerConfig};
use crate::analysis::Fingerprint;
use crate::render::color::{hsva, resolve_hue};
use crate::render::raster::fill_circle;

const SATURATION: f64 = 90.0;
const VALUE: f64 = 60.0;

/// Disc radius: `25 * scale * (1 + log10(max(1, symbols)))`, truncated.
pub fn radius(fingerprint: &Fingerprint) -> i64 {
    let symbols = fingerprint.symbols_count.max(1) as f64;
    (25.0 * fingerprint.scale_factor() * (1.0 + symbols.log10())) as i64
}

pub fn draw(canvas: &mut RgbaImage, fingerprint: &Fingerprint, config: &DrawerConfig) {
    let hue = resolve_hue(config.color, fingerprint.byte_list());
    let color = hsva(hue, SATURATION, VALUE, config.alpha());
    let c = center(fingerprint) as i64;

    fill_circle(canvas, c, c, radius(fingerprint), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Fingerprinter;
    use crate::render::drawers::DrawerKind;

    #[test]
    fn test_radius_grows_logarithmically() {
        let analyzer = Fingerprinter::default();
        assert_eq!(radius(&analyzer.analyze("a")), 25);
        assert_eq!(radius(&analyzer.analyze("")), 25);
        assert_eq!(radius(&analyzer.analyze(&"x".repeat(10))), 50);
    }

    #[test]
    fn test_center_pixel_uses_configured_alpha() {
        let fp = Fingerprinter::default().analyze("core");
        let mut canvas = RgbaImage::new(fp.canvas_size, fp.canvas_size);
        let config = DrawerConfig::new(DrawerKind::Core).with_alpha(77);
        draw(&mut canvas, &fp, &config);

        assert_eq!(canvas.get_pixel(500, 500).0[3], 77);
        assert_eq!(canvas.get_pixel(0, 0).0[3], 0);
    }
}
