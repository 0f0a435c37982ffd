//! # Raster Primitives
//!
//! Minimal drawing operations on an RGBA canvas: filled circles, thick line
//! segments, polylines and the final alpha composite.
//!
//! Pixel centers sit on integer coordinates, so a 1px line from `(0, 10)` to
//! `(9, 10)` covers exactly row 10. Every primitive blends its color
//! source-over onto the canvas with straight (non-premultiplied) alpha.

use image::{Rgba, RgbaImage};

/// A point in canvas coordinates.
pub type Point = (f64, f64);

/// Blend `color` source-over onto the pixel at `(x, y)`.
///
/// Coordinates outside the canvas are ignored.
pub fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    *pixel = Rgba(blend(pixel.0, color));
}

/// Source-over blend of `src` onto `dst`, in integer arithmetic.
fn blend(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u32;
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = dst[3] as u32;
    // Output alpha scaled by 255
    let out_a = sa * 255 + da * (255 - sa);
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let value = src[c] as u32 * sa * 255 + dst[c] as u32 * da * (255 - sa);
        out[c] = ((value + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    out
}

/// Fill the disc of `radius` around the pixel `(cx, cy)`.
pub fn fill_circle(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: [u8; 4]) {
    let radius = radius.max(0);
    let r2 = (radius * radius) as f64;

    for dy in -radius..=radius {
        let half = (r2 - (dy * dy) as f64).sqrt().floor() as i64;
        fill_span(canvas, cy + dy, cx - half, cx + half, color);
    }
}

/// Blend a horizontal run of pixels, clipped to the canvas.
fn fill_span(canvas: &mut RgbaImage, y: i64, x0: i64, x1: i64, color: [u8; 4]) {
    if y < 0 || y >= canvas.height() as i64 {
        return;
    }
    let x0 = x0.max(0);
    let x1 = x1.min(canvas.width() as i64 - 1);
    for x in x0..=x1 {
        blend_pixel(canvas, x, y, color);
    }
}

/// Draw a straight segment `width` pixels wide with butt ends.
///
/// The segment is rasterized as a quad, one span per row, so every covered
/// pixel is blended exactly once.
pub fn draw_line(canvas: &mut RgbaImage, from: Point, to: Point, width: f64, color: [u8; 4]) {
    let half = width.max(1.0) / 2.0;
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);

    if length < 1e-9 {
        let (cx, cy) = (from.0.round() as i64, from.1.round() as i64);
        let extent = (half - 0.5).max(0.0).round() as i64;
        for y in cy - extent..=cy + extent {
            fill_span(canvas, y, cx - extent, cx + extent, color);
        }
        return;
    }

    let (nx, ny) = (-dy / length * half, dx / length * half);
    let quad = [
        (from.0 + nx, from.1 + ny),
        (to.0 + nx, to.1 + ny),
        (to.0 - nx, to.1 - ny),
        (from.0 - nx, from.1 - ny),
    ];
    fill_convex(canvas, &quad, color);
}

/// Scanline fill of a convex polygon.
fn fill_convex(canvas: &mut RgbaImage, polygon: &[Point], color: [u8; 4]) {
    let y_min = polygon.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = polygon.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let first_row = (y_min.ceil() as i64).max(0);
    let last_row = (y_max.floor() as i64).min(canvas.height() as i64 - 1);

    for row in first_row..=last_row {
        let y = row as f64;
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;

        for (i, a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            let (lo, hi) = if a.1 <= b.1 { (*a, b) } else { (b, *a) };
            if y < lo.1 || y > hi.1 {
                continue;
            }
            if hi.1 == lo.1 {
                x_min = x_min.min(lo.0.min(hi.0));
                x_max = x_max.max(lo.0.max(hi.0));
            } else {
                let x = lo.0 + (y - lo.1) / (hi.1 - lo.1) * (hi.0 - lo.0);
                x_min = x_min.min(x);
                x_max = x_max.max(x);
            }
        }

        if x_min <= x_max {
            fill_span(canvas, row, x_min.ceil() as i64, x_max.floor() as i64, color);
        }
    }
}

/// Stroke consecutive points as one line.
///
/// Lines wider than 2px get round joints so sharp turns leave no notches.
pub fn draw_polyline(canvas: &mut RgbaImage, points: &[Point], width: f64, color: [u8; 4]) {
    for pair in points.windows(2) {
        draw_line(canvas, pair[0], pair[1], width, color);
    }

    if width > 2.0 && points.len() > 2 {
        let radius = (width / 2.0).floor() as i64;
        for p in &points[1..points.len() - 1] {
            fill_circle(canvas, p.0.round() as i64, p.1.round() as i64, radius, color);
        }
    }
}

/// Composite `overlay` over `background` in place.
///
/// Both images must have the same dimensions.
pub fn alpha_composite(background: &mut RgbaImage, overlay: &RgbaImage) {
    for (dst, src) in background.pixels_mut().zip(overlay.pixels()) {
        *dst = Rgba(blend(dst.0, src.0));
    }
}
