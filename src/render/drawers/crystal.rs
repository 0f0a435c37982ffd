//! Crystal drawer: a starburst of rays split into angular sectors, one per
//! distinct character.
//!
//! Each sector sweeps an angle proportional to its character's share of the
//! text and reaches further out the more frequent the character is, so the
//! silhouette of the crystal is the character histogram wrapped around a
//! circle.

use image::RgbaImage;

use super::{center, seeded_rng, DrawerConfig};
use crate::analysis::Fingerprint;
use crate::render::color::{hsva, resolve_hue};
use crate::render::raster::draw_line;
use crate::render::walk::uniform;

const BASE_RAYS: u32 = 60;
pub const MAX_RAYS: u32 = 800;
const VALUE: f64 = 90.0;

/// Rays per sector: `base * (1 + 0.3 * log10(max(1, symbols)))`, at most 800.
pub fn rays_per_sector(base: u32, symbols_count: usize) -> u32 {
    let symbols = symbols_count.max(1) as f64;
    let rays = (base as f64 * (1.0 + 0.3 * symbols.log10())) as u32;
    rays.min(MAX_RAYS)
}

pub fn draw(canvas: &mut RgbaImage, fingerprint: &Fingerprint, config: &DrawerConfig) {
    let c = center(fingerprint);
    let hue = resolve_hue(config.color, fingerprint.byte_list());
    let width = config.stroke_width(fingerprint);
    let max_radius = c * 0.85;
    let symbols = fingerprint.symbols_count.max(1) as f64;
    let rays = rays_per_sector(config.density.unwrap_or(BASE_RAYS), fingerprint.symbols_count);
    let mut rng = seeded_rng(fingerprint);

    let mut start_angle = 0.0;
    for (i, &(_, count)) in fingerprint.char_stats.iter().enumerate() {
        let share = count as f64 / symbols;
        let sweep = share * 360.0;
        let saturation = (40 + i % 20) as f64;
        let color = hsva(hue, saturation, VALUE, config.alpha());
        let radius = (max_radius * share * 10.0).min(max_radius);

        for _ in 0..rays {
            let angle = uniform(&mut rng, start_angle, start_angle + sweep).to_radians();
            let length = radius * uniform(&mut rng, 0.7, 1.1);
            let end = (c + angle.cos() * length, c + angle.sin() * length);
            draw_line(canvas, (c, c), end, width, color);
        }

        start_angle += sweep;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Fingerprinter;
    use crate::render::drawers::DrawerKind;

    #[test]
    fn test_ray_count() {
        assert_eq!(rays_per_sector(60, 1), 60);
        assert_eq!(rays_per_sector(60, 10), 78);
        assert_eq!(rays_per_sector(60, usize::MAX), 406);
        assert_eq!(rays_per_sector(5000, 10), 800);
    }

    #[test]
    fn test_single_char_text_is_one_full_sector() {
        let fp = Fingerprinter::default().analyze("aaaa");
        assert_eq!(fp.char_stats, vec![('a', 4)]);

        let mut canvas = RgbaImage::new(fp.canvas_size, fp.canvas_size);
        draw(&mut canvas, &fp, &DrawerConfig::new(DrawerKind::Crystal));

        // Rays spread over the whole circle: every quadrant gets paint
        let painted = |x0: u32, y0: u32| {
            (x0..x0 + 500).any(|x| (y0..y0 + 500).any(|y| canvas.get_pixel(x, y).0[3] > 0))
        };
        assert!(painted(0, 0) && painted(500, 0) && painted(0, 500) && painted(500, 500));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let fp = Fingerprinter::default().analyze("");
        let mut canvas = RgbaImage::new(fp.canvas_size, fp.canvas_size);
        draw(&mut canvas, &fp, &DrawerConfig::new(DrawerKind::Crystal));
        assert!(canvas.pixels().all(|p| p.0[3] == 0));
    }
}
