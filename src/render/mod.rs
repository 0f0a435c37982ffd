//! # Procedural Rendering
//!
//! Paints the image of a [`Fingerprint`](crate::analysis::Fingerprint).
//!
//! ## Modules
//!
//! - [`pipeline`]: Runs drawers and composites the result
//! - [`drawers`]: Core, Crystal, Kaleidoscope, Flow and Genesis passes
//! - [`color`]: Color parsing, HSV conversion and hue resolution
//! - [`raster`]: Circles, thick lines and alpha compositing
//! - [`walk`]: Random walks and path smoothing

pub mod color;
pub mod drawers;
pub mod pipeline;
pub mod raster;
pub mod walk;

pub use color::Color;
pub use drawers::{default_drawers, DrawerConfig, DrawerKind};
pub use pipeline::RenderPipeline;
