//! Paint model shared between scenes and the backend.
//!
//! Scope: color representation (sRGB-encoded, premultiplied alpha). Solid colors
//! are the only paint source; the backend turns them into brushes.

pub mod color;

pub use color::Color;
