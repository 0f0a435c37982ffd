//! Geometry shared by the walk-based drawers (Kaleidoscope, Flow, Genesis).

use rand::Rng;

use super::raster::Point;

/// Uniform float in `[low, high]`; tolerates `low == high`.
pub fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + (high - low) * rng.gen::<f64>()
}

/// Rotate `point` about the origin by `angle` radians.
pub fn rotate(point: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    (point.0 * cos - point.1 * sin, point.0 * sin + point.1 * cos)
}

/// Rotate a center-relative path and move it onto the canvas.
pub fn place(points: &[Point], angle: f64, center: f64) -> Vec<Point> {
    points
        .iter()
        .map(|&p| {
            let (x, y) = rotate(p, angle);
            (x + center, y + center)
        })
        .collect()
}

/// One step of length `step` in a random direction.
pub fn step_from<R: Rng>(rng: &mut R, from: Point, step: f64) -> Point {
    let angle = uniform(rng, 0.0, std::f64::consts::TAU);
    (from.0 + angle.cos() * step, from.1 + angle.sin() * step)
}

/// Rotational symmetry order for walks: `4 + floor(log4(symbols))`, in [4, 18].
pub fn walk_sectors(symbols_count: usize) -> u32 {
    let sc = symbols_count.max(1) as f64;
    (4 + sc.log(4.0) as u32).clamp(4, 18)
}

/// Walk length for a text: `300 + 50 * floor(log3(symbols))`, in [300, 1000].
pub fn walk_attempts(symbols_count: usize) -> u32 {
    let sc = symbols_count.max(1) as f64;
    (300 + 50 * sc.log(3.0) as u32).clamp(300, 1000)
}

/// Random walk from `start` that drops every step leaving `max_radius`.
///
/// `attempts` steps are drawn; the returned path holds `start` plus every
/// accepted point, so it is never empty.
pub fn bounded_walk<R: Rng>(
    rng: &mut R,
    start: Point,
    attempts: u32,
    step: f64,
    max_radius: f64,
) -> Vec<Point> {
    let mut path = vec![start];
    let mut current = start;

    for _ in 0..attempts {
        let candidate = step_from(rng, current, step);
        if candidate.0.hypot(candidate.1) < max_radius {
            current = candidate;
            path.push(current);
        }
    }
    path
}

/// Round off a jagged path with quadratic curves.
///
/// For every point after the first, four samples are taken on the quadratic
/// Bezier running from the last emitted sample, through the point as control,
/// to the midpoint between it and its successor. Paths of two points or fewer
/// are returned unchanged.
pub fn quadratic_smooth(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut smoothed = Vec::with_capacity(1 + (points.len() - 2) * 4);
    smoothed.push(points[0]);

    for pair in points[1..].windows(2) {
        let (control, next) = (pair[0], pair[1]);
        let target = ((control.0 + next.0) / 2.0, (control.1 + next.1) / 2.0);

        for t_step in 1..=4 {
            let t = t_step as f64 / 4.0;
            let last = smoothed[smoothed.len() - 1];
            let a = (1.0 - t) * (1.0 - t);
            let b = 2.0 * (1.0 - t) * t;
            let c = t * t;
            smoothed.push((
                a * last.0 + b * control.0 + c * target.0,
                a * last.1 + b * control.1 + c * target.1,
            ));
        }
    }
    smoothed
}
