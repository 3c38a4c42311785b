//! Coordinate, geometry and transform types shared across the engine.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! `Mat3` transforms points as column vectors; the GPU backend uploads its
//! two affine rows per draw and converts to NDC in the shader.

mod mat3;
mod rect;
mod scalar;
mod vec2;
mod viewport;

pub use mat3::{inverse_of, transpose_of, Mat3};
pub use rect::Rect;
pub use scalar::{deg_to_rad, is_zero, rad_to_deg, EPSILON};
pub use vec2::{
    angle_between, dot_product, is_orthogonal, normal_of, ortho_from, projection_of, Vec2,
};
pub use viewport::Viewport;
