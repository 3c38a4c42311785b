use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::scalar::is_zero;

/// 2D vector in logical pixels.
///
/// Equality is approximate: two vectors compare equal when both coordinate
/// differences are within [`EPSILON`](super::EPSILON).
#[derive(Debug, Copy, Clone, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);
    pub const UNIT_X: Vec2 = Vec2::new(1.0, 0.0);
    pub const UNIT_Y: Vec2 = Vec2::new(0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        is_zero(self.x) && is_zero(self.y)
    }

    #[inline]
    pub fn magnitude_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Scales `self` to unit length in place.
    ///
    /// A zero-magnitude vector becomes the zero vector.
    pub fn normalize(&mut self) -> &mut Self {
        let magnitude = self.magnitude();
        if is_zero(magnitude) {
            *self = Vec2::ZERO;
        } else {
            self.x /= magnitude;
            self.y /= magnitude;
        }
        self
    }

    /// Non-mutating [`normalize`](Self::normalize).
    #[inline]
    pub fn normalized(self) -> Vec2 {
        let mut v = self;
        v.normalize();
        v
    }

    /// Projection of `self` onto `onto`.
    ///
    /// `onto` must not be the zero vector.
    pub fn projection_onto(self, onto: Vec2) -> Vec2 {
        let len_sq = onto.magnitude_squared();
        debug_assert!(!is_zero(len_sq), "projection onto a zero vector");
        onto * (self.dot(onto) / len_sq)
    }

    /// Returns `self` rotated by 90 degrees, counter-clockwise when `ccw` is set.
    #[inline]
    pub fn orthogonal(self, ccw: bool) -> Vec2 {
        if ccw {
            Vec2::new(-self.y, self.x)
        } else {
            Vec2::new(self.y, -self.x)
        }
    }
}

/// Unit vector with the direction of `v`, or zero for a zero vector.
#[inline]
pub fn normal_of(v: Vec2) -> Vec2 {
    v.normalized()
}

#[inline]
pub fn dot_product(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

/// `true` when `a` and `b` are perpendicular within epsilon.
#[inline]
pub fn is_orthogonal(a: Vec2, b: Vec2) -> bool {
    is_zero(a.dot(b))
}

/// Angle between `a` and `b`, in radians.
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let cos = a.dot(b) / (a.magnitude() * b.magnitude());
    cos.clamp(-1.0, 1.0).acos()
}

#[inline]
pub fn projection_of(v: Vec2, onto: Vec2) -> Vec2 {
    v.projection_onto(onto)
}

#[inline]
pub fn ortho_from(v: Vec2, ccw: bool) -> Vec2 {
    v.orthogonal(ccw)
}

impl PartialEq for Vec2 {
    #[inline]
    fn eq(&self, other: &Vec2) -> bool {
        is_zero(self.x - other.x) && is_zero(self.y - other.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        let mut v = self;
        v /= rhs;
        v
    }
}

impl DivAssign<f32> for Vec2 {
    /// # Panics
    /// Panics (debug only) when `rhs` is approximately zero.
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        debug_assert!(!is_zero(rhs), "Vec2 divided by a near-zero scalar ({rhs})");
        self.x /= rhs;
        self.y /= rhs;
    }
}
