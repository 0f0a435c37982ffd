//! # Drawers
//!
//! The closed set of rendering passes that paint a fingerprint onto the
//! shared overlay. Every drawer is a pure function of the fingerprint and its
//! [`DrawerConfig`]; all randomness comes from generators seeded by the
//! fingerprint, so identical inputs always paint identical pixels.
//!
//! | kind | alpha | line width | density |
//! |---|---|---|---|
//! | core | 200 | - | - |
//! | crystal | 180 | 0.5 | 60 base rays per sector |
//! | kaleidoscope | 255 | 2.0 | 800 walk steps |
//! | flow | 255 | 2.0 | derived from text length |
//! | genesis | 255 | 2.0 | derived from text length |
//!
//! Overrides are bounded: line width in `(0, 20]`, density at most 800 rays
//! for Crystal and 5000 walk steps for the walk-based drawers.

use image::RgbaImage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::color::Color;
use crate::analysis::Fingerprint;

pub mod core_circle;
pub mod crystal;
pub mod flow;
pub mod genesis;
pub mod kaleidoscope;

/// Widest accepted `line_width`, before canvas scaling.
pub const MAX_LINE_WIDTH: f64 = 20.0;

/// Largest accepted walk length for Kaleidoscope, Flow and Genesis.
pub const MAX_WALK_STEPS: u32 = 5_000;

/// Which rendering algorithm a drawer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerKind {
    Core,
    Crystal,
    Kaleidoscope,
    Flow,
    Genesis,
}

impl DrawerKind {
    pub const ALL: [DrawerKind; 5] = [
        DrawerKind::Core,
        DrawerKind::Crystal,
        DrawerKind::Kaleidoscope,
        DrawerKind::Flow,
        DrawerKind::Genesis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DrawerKind::Core => "core",
            DrawerKind::Crystal => "crystal",
            DrawerKind::Kaleidoscope => "kaleidoscope",
            DrawerKind::Flow => "flow",
            DrawerKind::Genesis => "genesis",
        }
    }

    fn default_alpha(&self) -> u8 {
        match self {
            DrawerKind::Core => 200,
            DrawerKind::Crystal => 180,
            _ => 255,
        }
    }

    /// Upper bound for the `density` override.
    pub fn max_density(&self) -> u32 {
        match self {
            DrawerKind::Crystal => crystal::MAX_RAYS,
            _ => MAX_WALK_STEPS,
        }
    }

    fn default_line_width(&self) -> f64 {
        match self {
            DrawerKind::Crystal => 0.5,
            _ => 2.0,
        }
    }
}

impl fmt::Display for DrawerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DrawerKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown drawer '{}'", s))
    }
}

/// A drawer together with its styling.
///
/// Unset fields fall back to the per-kind defaults listed in the module docs.
/// Configurations are plain values and can be reused across any number of
/// renders.
///
/// # Example
/// ```ignore
/// let drawer = DrawerConfig::new(DrawerKind::Crystal).with_color("red".parse()?);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerConfig {
    pub kind: DrawerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<u32>,
}

impl DrawerConfig {
    pub fn new(kind: DrawerKind) -> Self {
        Self {
            kind,
            color: None,
            alpha: None,
            line_width: None,
            density: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    pub fn with_density(mut self, density: u32) -> Self {
        self.density = Some(density);
        self
    }

    /// Check the overrides against the bounds in the module docs.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(width) = self.line_width {
            if !width.is_finite() || width <= 0.0 || width > MAX_LINE_WIDTH {
                return Err(format!(
                    "drawer '{}': line_width must be in (0, {}], got {}",
                    self.kind, MAX_LINE_WIDTH, width
                ));
            }
        }
        if let Some(density) = self.density {
            if density > self.kind.max_density() {
                return Err(format!(
                    "drawer '{}': density must be at most {}, got {}",
                    self.kind,
                    self.kind.max_density(),
                    density
                ));
            }
        }
        Ok(())
    }

    /// Effective alpha for this drawer.
    pub fn alpha(&self) -> u8 {
        self.alpha.unwrap_or_else(|| self.kind.default_alpha())
    }

    /// Stroke width in pixels: `max(1, trunc(line_width * scale))`.
    pub fn stroke_width(&self, fingerprint: &Fingerprint) -> f64 {
        let width = self.line_width.unwrap_or_else(|| self.kind.default_line_width());
        (width * fingerprint.scale_factor()).trunc().max(1.0)
    }

    /// Paint this drawer's pass onto `canvas`.
    pub fn draw(&self, canvas: &mut RgbaImage, fingerprint: &Fingerprint) {
        match self.kind {
            DrawerKind::Core => core_circle::draw(canvas, fingerprint, self),
            DrawerKind::Crystal => crystal::draw(canvas, fingerprint, self),
            DrawerKind::Kaleidoscope => kaleidoscope::draw(canvas, fingerprint, self),
            DrawerKind::Flow => flow::draw(canvas, fingerprint, self),
            DrawerKind::Genesis => genesis::draw(canvas, fingerprint, self),
        }
    }
}

/// The drawers used when a render call does not name any.
pub fn default_drawers() -> Vec<DrawerConfig> {
    vec![
        DrawerConfig::new(DrawerKind::Crystal),
        DrawerConfig::new(DrawerKind::Core),
        DrawerConfig::new(DrawerKind::Kaleidoscope),
    ]
}

/// Fresh generator for one drawing pass, seeded from the fingerprint.
pub fn seeded_rng(fingerprint: &Fingerprint) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(fingerprint.seed())
}

/// Canvas center, the pixel `canvas_size / 2` on both axes.
pub fn center(fingerprint: &Fingerprint) -> f64 {
    (fingerprint.canvas_size / 2) as f64
}
