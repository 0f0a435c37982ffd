//! # Common Components
//!
//! Shared utilities used by the library and both binaries.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities

pub mod config;
