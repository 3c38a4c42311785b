use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::scalar::{deg_to_rad, is_zero};
use super::Vec2;

/// 3x3 homogeneous matrix for 2D affine transforms.
///
/// Storage is row-major. Points are treated as column vectors, so `a * b`
/// applies `b` first and `a` second, and `m * p` transforms a point including
/// translation. Rows 1-2 hold the linear part plus translation; row 3 is
/// `[0, 0, 1]` for every matrix produced by the builders.
///
/// Equality is element-wise within [`EPSILON`](super::EPSILON). Use
/// [`approx_eq`](Self::approx_eq) when magnitudes call for a looser tolerance.
#[derive(Debug, Copy, Clone)]
pub struct Mat3 {
    m: [f32; 9],
}

impl Mat3 {
    pub const NULL: Mat3 = Mat3::from_row_major([0.0; 9]);

    pub const IDENTITY: Mat3 = Mat3::new(
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    );

    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        a11: f32, a12: f32, a13: f32,
        a21: f32, a22: f32, a23: f32,
        a31: f32, a32: f32, a33: f32,
    ) -> Self {
        Self { m: [a11, a12, a13, a21, a22, a23, a31, a32, a33] }
    }

    #[inline]
    pub const fn from_row_major(m: [f32; 9]) -> Self {
        Self { m }
    }

    /// Row-major flat copy of the elements.
    #[inline]
    pub const fn as_row_major(&self) -> [f32; 9] {
        self.m
    }

    /// The two affine rows `[a11 a12 a13]` and `[a21 a22 a23]`.
    #[inline]
    pub fn affine_rows(&self) -> [[f32; 3]; 2] {
        [[self.m[0], self.m[1], self.m[2]], [self.m[3], self.m[4], self.m[5]]]
    }

    /// Element at zero-based `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is out of `0..3`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 3 && col < 3, "Mat3 index ({row}, {col}) out of range");
        self.m[row * 3 + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < 3 && col < 3, "Mat3 index ({row}, {col}) out of range");
        self.m[row * 3 + col] = value;
    }

    /// Horizontal translation component (`a13`).
    #[inline]
    pub fn translation_x(&self) -> f32 {
        self.m[2]
    }

    /// Vertical translation component (`a23`).
    #[inline]
    pub fn translation_y(&self) -> f32 {
        self.m[5]
    }

    // ── builders ──────────────────────────────────────────────────────────

    #[inline]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self::new(
            1.0, 0.0, dx,
            0.0, 1.0, dy,
            0.0, 0.0, 1.0,
        )
    }

    #[inline]
    pub const fn translation_by(offset: Vec2) -> Self {
        Self::translation(offset.x, offset.y)
    }

    /// Rotation by `degrees` about the origin.
    #[inline]
    pub fn rotation(degrees: f32) -> Self {
        Self::rotation_about(degrees, Vec2::ZERO)
    }

    /// Rotation by `degrees` about `pivot`.
    ///
    /// x' = x0 + (x - x0) cos - (y - y0) sin
    /// y' = y0 + (x - x0) sin + (y - y0) cos
    pub fn rotation_about(degrees: f32, pivot: Vec2) -> Self {
        let (sin, cos) = deg_to_rad(degrees).sin_cos();
        let Vec2 { x: x0, y: y0 } = pivot;

        Self::new(
            cos, -sin, x0 * (1.0 - cos) + y0 * sin,
            sin, cos, y0 * (1.0 - cos) - x0 * sin,
            0.0, 0.0, 1.0,
        )
    }

    #[inline]
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::scale_about(sx, sy, Vec2::ZERO)
    }

    /// Scale by `(sx, sy)` keeping `pivot` fixed.
    pub fn scale_about(sx: f32, sy: f32, pivot: Vec2) -> Self {
        Self::new(
            sx, 0.0, (1.0 - sx) * pivot.x,
            0.0, sy, (1.0 - sy) * pivot.y,
            0.0, 0.0, 1.0,
        )
    }

    // ── algebra ───────────────────────────────────────────────────────────

    pub fn determinant(&self) -> f32 {
        let [a11, a12, a13, a21, a22, a23, a31, a32, a33] = self.m;

        a11 * (a22 * a33 - a23 * a32) - a12 * (a21 * a33 - a23 * a31)
            + a13 * (a21 * a32 - a22 * a31)
    }

    #[inline]
    pub fn is_invertible(&self) -> bool {
        !is_zero(self.determinant())
    }

    /// Classical adjoint (transposed cofactor matrix).
    pub fn adjoint(&self) -> Mat3 {
        let [a11, a12, a13, a21, a22, a23, a31, a32, a33] = self.m;

        let c11 = a22 * a33 - a23 * a32;
        let c12 = -(a21 * a33 - a23 * a31);
        let c13 = a21 * a32 - a22 * a31;
        let c21 = -(a12 * a33 - a13 * a32);
        let c22 = a11 * a33 - a13 * a31;
        let c23 = -(a11 * a32 - a12 * a31);
        let c31 = a12 * a23 - a13 * a22;
        let c32 = -(a11 * a23 - a13 * a21);
        let c33 = a11 * a22 - a12 * a21;

        Mat3::new(
            c11, c21, c31,
            c12, c22, c32,
            c13, c23, c33,
        )
    }

    /// Inverts in place.
    ///
    /// # Panics
    /// Panics (debug only) if the matrix is not invertible. Release builds
    /// produce non-finite elements instead.
    pub fn invert(&mut self) -> &mut Self {
        let det = self.determinant();
        debug_assert!(!is_zero(det), "inverting a singular matrix (det = {det})");
        *self = self.adjoint() / det;
        self
    }

    /// Non-mutating [`invert`](Self::invert).
    #[inline]
    pub fn inverse(&self) -> Mat3 {
        let mut m = *self;
        m.invert();
        m
    }

    /// Checked inversion; `None` for a singular matrix.
    pub fn try_inverse(&self) -> Option<Mat3> {
        let det = self.determinant();
        if is_zero(det) {
            None
        } else {
            Some(self.adjoint() / det)
        }
    }

    pub fn transpose(&mut self) -> &mut Self {
        self.m.swap(1, 3);
        self.m.swap(2, 6);
        self.m.swap(5, 7);
        self
    }

    #[inline]
    pub fn transposed(&self) -> Mat3 {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Applies the transform to a point (translation included).
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        *self * p
    }

    /// Element-wise comparison with an explicit tolerance.
    pub fn approx_eq(&self, other: &Mat3, tolerance: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[inline]
pub fn inverse_of(m: &Mat3) -> Mat3 {
    m.inverse()
}

#[inline]
pub fn transpose_of(m: &Mat3) -> Mat3 {
    m.transposed()
}

impl PartialEq for Mat3 {
    fn eq(&self, other: &Mat3) -> bool {
        self.m.iter().zip(other.m.iter()).all(|(a, b)| is_zero(a - b))
    }
}

impl Add for Mat3 {
    type Output = Mat3;
    #[inline]
    fn add(mut self, rhs: Mat3) -> Mat3 {
        self += rhs;
        self
    }
}

impl AddAssign for Mat3 {
    #[inline]
    fn add_assign(&mut self, rhs: Mat3) {
        for (a, b) in self.m.iter_mut().zip(rhs.m) {
            *a += b;
        }
    }
}

impl Sub for Mat3 {
    type Output = Mat3;
    #[inline]
    fn sub(mut self, rhs: Mat3) -> Mat3 {
        self -= rhs;
        self
    }
}

impl SubAssign for Mat3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Mat3) {
        for (a, b) in self.m.iter_mut().zip(rhs.m) {
            *a -= b;
        }
    }
}

impl Neg for Mat3 {
    type Output = Mat3;
    #[inline]
    fn neg(self) -> Mat3 {
        self * -1.0
    }
}

impl Mul<f32> for Mat3 {
    type Output = Mat3;
    #[inline]
    fn mul(mut self, k: f32) -> Mat3 {
        self *= k;
        self
    }
}

impl Mul<Mat3> for f32 {
    type Output = Mat3;
    #[inline]
    fn mul(self, m: Mat3) -> Mat3 {
        m * self
    }
}

impl MulAssign<f32> for Mat3 {
    #[inline]
    fn mul_assign(&mut self, k: f32) {
        for a in self.m.iter_mut() {
            *a *= k;
        }
    }
}

impl Div<f32> for Mat3 {
    type Output = Mat3;
    #[inline]
    fn div(mut self, k: f32) -> Mat3 {
        self /= k;
        self
    }
}

impl DivAssign<f32> for Mat3 {
    #[inline]
    fn div_assign(&mut self, k: f32) {
        for a in self.m.iter_mut() {
            *a /= k;
        }
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut out = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3)
                    .map(|k| self.m[row * 3 + k] * rhs.m[k * 3 + col])
                    .sum();
            }
        }
        Mat3::from_row_major(out)
    }
}

impl MulAssign for Mat3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Mat3) {
        *self = *self * rhs;
    }
}

impl Mul<Vec2> for Mat3 {
    type Output = Vec2;

    #[inline]
    fn mul(self, p: Vec2) -> Vec2 {
        let m = &self.m;
        Vec2::new(
            m[0] * p.x + m[1] * p.y + m[2],
            m[3] * p.x + m[4] * p.y + m[5],
        )
    }
}
