//! # Imprint
//!
//! Turns text into a deterministic fingerprint image and hides the text
//! itself, optionally password-encrypted, in that image's pixels.
//!
//! ## Modules
//!
//! - [`analysis`]: SimHash fingerprinting of text
//! - [`render`]: Hash-seeded drawers and the render pipeline
//! - [`processing`]: LSB steganography with an encrypted envelope
//! - [`imprint`]: The create/parse service tying the stages together
//! - [`api`]: Axum HTTP API
//! - [`common`]: Configuration
//! - [`logging`]: Logger setup for the binaries

pub mod analysis;
pub mod api;
pub mod common;
pub mod imprint;
pub mod logging;
pub mod processing;
pub mod render;

pub use analysis::{Fingerprint, Fingerprinter};
pub use imprint::{ImprintError, ImprintService};
pub use processing::{StegoCodec, StegoError};
pub use render::{DrawerConfig, DrawerKind, RenderPipeline};
