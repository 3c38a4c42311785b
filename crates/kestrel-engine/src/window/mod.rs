//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the
//! render-resource manager.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
