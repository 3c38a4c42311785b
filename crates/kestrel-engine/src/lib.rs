//! Kestrel engine crate.
//!
//! Math kernel, path geometry, the two-tier render-resource lifecycle and
//! the single-window runtime that drives it.

pub mod coords;
pub mod core;
pub mod device;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod time;
pub mod window;
