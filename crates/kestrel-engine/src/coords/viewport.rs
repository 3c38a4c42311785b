/// Scene extent in logical pixels.
///
/// The fill shader divides by this to reach NDC, so scene coordinates are
/// logical pixels regardless of the surface's DPI.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Logical extent of a surface of `width x height` physical pixels.
    ///
    /// A non-positive or non-finite scale factor is treated as `1.0`.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor as f32
        } else {
            1.0
        };
        Self::new(width as f32 / scale, height as f32 / scale)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}
