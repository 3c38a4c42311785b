/// Premultiplied RGBA color with sRGB-encoded components.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Brushes are created from these values; the GPU backend converts them with
/// [`to_linear`](Self::to_linear) when the surface format is sRGB and blends
/// with `One, OneMinusSrcAlpha`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_premul(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::opaque_u8(0, 0, 0);
    pub const WHITE: Color = Color::opaque_u8(255, 255, 255);
    pub const ORANGE: Color = Color::opaque_u8(255, 165, 0);
    pub const DEEP_SKY_BLUE: Color = Color::opaque_u8(0, 191, 255);
    pub const LAWN_GREEN: Color = Color::opaque_u8(124, 252, 0);

    /// Creates an opaque color from sRGB bytes (`0`–`255`).
    #[inline]
    pub const fn opaque_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Decodes the sRGB transfer curve, keeping alpha and premultiplication.
    pub fn to_linear(self) -> Color {
        let (r, g, b, a) = self.to_straight();
        Color::from_straight(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_are_opaque() {
        for c in [Color::BLACK, Color::WHITE, Color::ORANGE, Color::DEEP_SKY_BLUE, Color::LAWN_GREEN] {
            assert_eq!(c.a, 1.0);
            assert!(c.is_finite());
        }
        assert_eq!(Color::ORANGE.to_array(), [1.0, 165.0 / 255.0, 0.0, 1.0]);
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
        assert_eq!(c.to_straight(), (1.0, 0.5, 0.0, 0.5));
    }

    #[test]
    fn linear_conversion_keeps_endpoints_and_alpha() {
        let close = |a: Color, b: Color| {
            a.to_array().iter().zip(b.to_array()).all(|(x, y)| (x - y).abs() < 1e-5)
        };
        assert!(close(Color::BLACK.to_linear(), Color::BLACK));
        assert!(close(Color::WHITE.to_linear(), Color::WHITE));

        let half = Color::from_straight(0.5, 0.5, 0.5, 0.5).to_linear();
        assert_eq!(half.a, 0.5);
        assert!((half.r - 0.214_041 * 0.5).abs() < 1e-4);
    }

    #[test]
    fn transparent_has_zero_straight_components() {
        assert_eq!(Color::TRANSPARENT.to_straight(), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(Color::from_straight(1.0, 1.0, 1.0, 0.0), Color::TRANSPARENT);
    }
}
