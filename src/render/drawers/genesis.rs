//! Genesis drawer: a walk grown chunk by chunk from the fingerprint's hex
//! digits, stroked with a radial gradient.
//!
//! Every chunk of hex digits seeds its own generator and contributes a short
//! sub-walk continuing from wherever the previous chunk stopped. Nothing a
//! chunk does depends on later chunks, so the path for a hash is always a
//! prefix of the path for any extension of that hash: growing the input only
//! ever adds geometry, it never moves what was already drawn.

use image::RgbaImage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{center, DrawerConfig};
use crate::analysis::Fingerprint;
use crate::render::color::{hsva, resolve_hue};
use crate::render::raster::{draw_line, Point};
use crate::render::walk::{place, step_from, walk_attempts, walk_sectors};

/// Hex digits per chunk.
pub const CHUNK_SIZE: usize = 4;
/// Walk attempts contributed by each chunk.
pub const POINTS_PER_CHUNK: u32 = 50;
const CURVE_STEPS: u32 = 4;

/// Parameters of a chunked walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkShape {
    pub start: Point,
    pub step: f64,
    pub max_radius: f64,
    /// Total attempts across all chunks
    pub budget: u32,
}

impl WalkShape {
    pub fn for_fingerprint(fingerprint: &Fingerprint, budget: Option<u32>) -> Self {
        let size = fingerprint.canvas_size as f64;
        Self {
            start: (size * 0.05, size * 0.05),
            step: 12.0 * fingerprint.scale_factor(),
            max_radius: size * 0.45,
            budget: budget.unwrap_or_else(|| walk_attempts(fingerprint.symbols_count)),
        }
    }
}

/// Build the center-relative walk for `hex`.
///
/// `hex` is cut into `chunk_size`-digit chunks (the last one may be shorter);
/// each chunk value seeds a generator making [`POINTS_PER_CHUNK`] attempts,
/// until `shape.budget` attempts have been made in total. Attempts leaving
/// `shape.max_radius` are dropped.
pub fn genesis_path(hex: &str, chunk_size: usize, shape: &WalkShape) -> Vec<Point> {
    let mut path = vec![shape.start];
    let mut current = shape.start;
    let mut attempts = 0;

    for chunk in hex.as_bytes().chunks(chunk_size.clamp(1, 16)) {
        if attempts >= shape.budget {
            break;
        }
        let value = std::str::from_utf8(chunk)
            .ok()
            .and_then(|digits| u64::from_str_radix(digits, 16).ok())
            .unwrap_or(0);
        let mut rng = ChaCha8Rng::seed_from_u64(value);

        for _ in 0..POINTS_PER_CHUNK {
            if attempts >= shape.budget {
                break;
            }
            let candidate = step_from(&mut rng, current, shape.step);
            if candidate.0.hypot(candidate.1) < shape.max_radius {
                current = candidate;
                path.push(current);
            }
            attempts += 1;
        }
    }
    path
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// Quadratic Bezier from `a` to `b` with control point `control`.
fn bezier(a: Point, control: Point, b: Point, t: f64) -> Point {
    lerp(lerp(a, control, t), lerp(control, b, t), t)
}

pub fn draw(canvas: &mut RgbaImage, fingerprint: &Fingerprint, config: &DrawerConfig) {
    let shape = WalkShape::for_fingerprint(fingerprint, config.density);
    let path = genesis_path(fingerprint.hash(), CHUNK_SIZE, &shape);
    if path.len() < 3 {
        return;
    }

    let c = center(fingerprint);
    let hue = resolve_hue(config.color, fingerprint.byte_list());
    let width = config.stroke_width(fingerprint);
    let alpha = config.alpha() as f64;
    let num_sectors = walk_sectors(fingerprint.symbols_count);
    let angle_step = std::f64::consts::TAU / num_sectors as f64;

    for i in 0..num_sectors {
        let rotated = place(&path, i as f64 * angle_step, c);

        for window in rotated.windows(3) {
            let (p0, p1, p2) = (window[0], window[1], window[2]);
            let m1 = lerp(p0, p1, 0.5);
            let m2 = lerp(p1, p2, 0.5);

            for t_idx in 0..CURVE_STEPS {
                let start = bezier(m1, p1, m2, t_idx as f64 / CURVE_STEPS as f64);
                let end = bezier(m1, p1, m2, (t_idx + 1) as f64 / CURVE_STEPS as f64);

                // Dense and dark near the center, pale and faint at the rim
                let ratio = ((start.0 - c).hypot(start.1 - c) / shape.max_radius).min(1.0);
                let color = hsva(
                    hue,
                    100.0 - ratio * 70.0,
                    40.0 + ratio * 60.0,
                    (alpha * (1.0 - ratio * 0.8)) as u8,
                );
                draw_line(canvas, start, end, width, color);
            }
        }
    }
}
