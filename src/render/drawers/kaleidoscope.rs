//! Kaleidoscope drawer: a seeded random walk mirrored around the center.
//!
//! Every accepted walk segment is drawn once per sector, rotated by
//! `360 / sectors` degree increments, which gives the pattern its rotational
//! symmetry. The walk never leaves 45% of the canvas: an outward step is
//! rejected and re-drawn from the previous point.

use image::RgbaImage;
use rand::Rng;

use super::{center, seeded_rng, DrawerConfig};
use crate::analysis::Fingerprint;
use crate::render::color::{hsva, resolve_hue};
use crate::render::raster::{draw_line, Point};
use crate::render::walk::{rotate, step_from};

const DEFAULT_STEPS: u32 = 800;
const MAX_RETRIES: u32 = 16;
const SATURATION: f64 = 90.0;
const VALUE: f64 = 60.0;

/// Symmetry order: `4 + byte_list[0] % 9`, so 4 to 12 sectors.
pub fn sectors(fingerprint: &Fingerprint) -> u32 {
    4 + fingerprint.byte_list().first().copied().unwrap_or(0) as u32 % 9
}

/// Walk `steps` times from `start`, keeping inside `max_radius`.
///
/// A candidate outside the radius is discarded and a new direction is drawn
/// from the same point, up to [`MAX_RETRIES`] times; if every retry fails the
/// walker stays put for that step. Returns the visited points in order.
pub fn walk<R: Rng>(rng: &mut R, start: Point, steps: u32, step: f64, max_radius: f64) -> Vec<Point> {
    let mut points = vec![start];
    let mut current = start;

    for _ in 0..steps {
        for _ in 0..MAX_RETRIES {
            let candidate = step_from(rng, current, step);
            if candidate.0.hypot(candidate.1) <= max_radius {
                current = candidate;
                points.push(current);
                break;
            }
        }
    }
    points
}

pub fn draw(canvas: &mut RgbaImage, fingerprint: &Fingerprint, config: &DrawerConfig) {
    let size = fingerprint.canvas_size as f64;
    let c = center(fingerprint);
    let hue = resolve_hue(config.color, fingerprint.byte_list());
    let color = hsva(hue, SATURATION, VALUE, config.alpha());
    let width = config.stroke_width(fingerprint);

    let num_sectors = sectors(fingerprint);
    let angle_step = std::f64::consts::TAU / num_sectors as f64;

    let mut rng = seeded_rng(fingerprint);
    let points = walk(
        &mut rng,
        (size * 0.02, size * 0.02),
        config.density.unwrap_or(DEFAULT_STEPS),
        9.0 * fingerprint.scale_factor(),
        size * 0.45,
    );

    for segment in points.windows(2) {
        for i in 0..num_sectors {
            let angle = i as f64 * angle_step;
            let (x1, y1) = rotate(segment[0], angle);
            let (x2, y2) = rotate(segment[1], angle);
            draw_line(canvas, (x1 + c, y1 + c), (x2 + c, y2 + c), width, color);
        }
    }
}
