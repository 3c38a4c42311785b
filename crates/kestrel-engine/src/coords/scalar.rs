/// Tolerance used by every approximate comparison in the math kernel.
pub const EPSILON: f32 = 0.000_001;

/// Returns `true` when `value` lies within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= EPSILON
}

#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * core::f32::consts::PI / 180.0
}

#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / core::f32::consts::PI
}
