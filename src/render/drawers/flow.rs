//! Flow drawer: one random-walk skeleton, rotated into every sector and
//! smoothed into continuous curves.

use image::RgbaImage;

use super::{center, seeded_rng, DrawerConfig};
use crate::analysis::Fingerprint;
use crate::render::color::{hsva, resolve_hue};
use crate::render::raster::{draw_polyline, Point};
use crate::render::walk::{bounded_walk, place, quadratic_smooth, walk_attempts, walk_sectors};

const SATURATION: f64 = 90.0;
const VALUE: f64 = 60.0;

/// The center-relative skeleton path for a fingerprint.
///
/// `attempts` defaults to the text-length based walk length.
pub fn skeleton(fingerprint: &Fingerprint, attempts: Option<u32>) -> Vec<Point> {
    let size = fingerprint.canvas_size as f64;
    let attempts = attempts.unwrap_or_else(|| walk_attempts(fingerprint.symbols_count));
    let mut rng = seeded_rng(fingerprint);

    bounded_walk(
        &mut rng,
        (size * 0.05, size * 0.05),
        attempts,
        12.0 * fingerprint.scale_factor(),
        size * 0.45,
    )
}

pub fn draw(canvas: &mut RgbaImage, fingerprint: &Fingerprint, config: &DrawerConfig) {
    let path = skeleton(fingerprint, config.density);
    if path.len() <= 2 {
        return;
    }

    let c = center(fingerprint);
    let hue = resolve_hue(config.color, fingerprint.byte_list());
    let color = hsva(hue, SATURATION, VALUE, config.alpha());
    let width = config.stroke_width(fingerprint);

    let smoothed = quadratic_smooth(&path);
    let num_sectors = walk_sectors(fingerprint.symbols_count);
    let angle_step = std::f64::consts::TAU / num_sectors as f64;

    for i in 0..num_sectors {
        let curve = place(&smoothed, i as f64 * angle_step, c);
        draw_polyline(canvas, &curve, width, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Fingerprinter;

    #[test]
    fn test_skeleton_is_bounded_and_deterministic() {
        let fp = Fingerprinter::default().analyze("go with the flow");
        let path = skeleton(&fp, None);

        assert_eq!(path, skeleton(&fp, None));
        assert_eq!(path[0], (50.0, 50.0));
        assert!(path.len() > 100);
        assert!(path.iter().all(|p| p.0.hypot(p.1) < 450.0));
    }

    #[test]
    fn test_density_overrides_length() {
        let fp = Fingerprinter::default().analyze("go with the flow");
        assert!(skeleton(&fp, Some(10)).len() <= 11);
    }
}
