//! 3x3 matrix type

use std::ops::Mul;

use super::{Matrix4, Vector3};

/// A 3x3 matrix, stored column-major
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3 {
    /// Matrix values in column-major order
    pub elements: [f64; 9],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    /// The identity matrix
    pub const IDENTITY: Self = Self {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Create a matrix from row-major arguments
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n11: f64,
        n12: f64,
        n13: f64,
        n21: f64,
        n22: f64,
        n23: f64,
        n31: f64,
        n32: f64,
        n33: f64,
    ) -> Self {
        Self {
            elements: [n11, n21, n31, n12, n22, n32, n13, n23, n33],
        }
    }

    /// Extract the upper-left 3x3 of a 4x4 matrix
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let me = &m.elements;
        Self::new(
            me[0], me[4], me[8], //
            me[1], me[5], me[9], //
            me[2], me[6], me[10],
        )
    }

    /// Read the basis vectors (columns) of this matrix
    pub fn extract_basis(&self) -> (Vector3, Vector3, Vector3) {
        (
            Vector3::from_matrix3_column(self, 0),
            Vector3::from_matrix3_column(self, 1),
            Vector3::from_matrix3_column(self, 2),
        )
    }

    /// Multiply every element by a scalar
    pub fn multiply_scalar(&self, s: f64) -> Self {
        let mut elements = self.elements;
        for value in &mut elements {
            *value *= s;
        }
        Self { elements }
    }

    /// Determinant of this matrix
    pub fn determinant(&self) -> f64 {
        let te = &self.elements;
        let (a, b, c) = (te[0], te[1], te[2]);
        let (d, e, f) = (te[3], te[4], te[5]);
        let (g, h, i) = (te[6], te[7], te[8]);

        a * e * i - a * f * h - b * d * i + b * f * g + c * d * h - c * e * g
    }

    /// Inverse of this matrix; a degenerate matrix inverts to all zeros
    pub fn inverse(&self) -> Self {
        let te = &self.elements;
        let (n11, n21, n31) = (te[0], te[1], te[2]);
        let (n12, n22, n32) = (te[3], te[4], te[5]);
        let (n13, n23, n33) = (te[6], te[7], te[8]);

        let t11 = n33 * n22 - n32 * n23;
        let t12 = n32 * n13 - n33 * n12;
        let t13 = n23 * n12 - n22 * n13;

        let det = n11 * t11 + n21 * t12 + n31 * t13;
        if det == 0.0 {
            return Self { elements: [0.0; 9] };
        }
        let det_inv = 1.0 / det;

        Self {
            elements: [
                t11 * det_inv,
                (n31 * n23 - n33 * n21) * det_inv,
                (n32 * n21 - n31 * n22) * det_inv,
                t12 * det_inv,
                (n33 * n11 - n31 * n13) * det_inv,
                (n31 * n12 - n32 * n11) * det_inv,
                t13 * det_inv,
                (n21 * n13 - n23 * n11) * det_inv,
                (n22 * n11 - n21 * n12) * det_inv,
            ],
        }
    }

    /// Transpose of this matrix
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self {
            elements: [m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]],
        }
    }

    /// Normal matrix (inverse transpose of the upper-left 3x3) of a 4x4 matrix
    pub fn normal_matrix(matrix4: &Matrix4) -> Self {
        Self::from_matrix4(matrix4).inverse().transpose()
    }

    /// Build a 2D UV transform from offset, repeat, rotation and center
    #[allow(clippy::too_many_arguments)]
    pub fn from_uv_transform(
        tx: f64,
        ty: f64,
        sx: f64,
        sy: f64,
        rotation: f64,
        cx: f64,
        cy: f64,
    ) -> Self {
        let (s, c) = rotation.sin_cos();
        Self::new(
            sx * c,
            sx * s,
            -sx * (c * cx + s * cy) + cx + tx,
            -sy * s,
            sy * c,
            -sy * (-s * cx + c * cy) + cy + ty,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Apply a 2D scale to this affine transform
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        let mut te = self.elements;
        te[0] *= sx;
        te[3] *= sx;
        te[6] *= sx;
        te[1] *= sy;
        te[4] *= sy;
        te[7] *= sy;
        Self { elements: te }
    }

    /// Apply a 2D rotation to this affine transform
    pub fn rotate(&self, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        let te = &self.elements;

        let (a11, a12, a13) = (te[0], te[3], te[6]);
        let (a21, a22, a23) = (te[1], te[4], te[7]);

        let mut out = self.elements;
        out[0] = c * a11 + s * a21;
        out[3] = c * a12 + s * a22;
        out[6] = c * a13 + s * a23;
        out[1] = -s * a11 + c * a21;
        out[4] = -s * a12 + c * a22;
        out[7] = -s * a13 + c * a23;
        Self { elements: out }
    }

    /// Apply a 2D translation to this affine transform
    pub fn translate(&self, tx: f64, ty: f64) -> Self {
        let mut te = self.elements;
        te[0] += tx * te[2];
        te[3] += tx * te[5];
        te[6] += tx * te[8];
        te[1] += ty * te[2];
        te[4] += ty * te[5];
        te[7] += ty * te[8];
        Self { elements: te }
    }

    /// Matrix product `self * m`
    pub fn multiply(&self, m: &Self) -> Self {
        Self::multiply_matrices(self, m)
    }

    /// Matrix product `m * self`
    pub fn premultiply(&self, m: &Self) -> Self {
        Self::multiply_matrices(m, self)
    }

    /// Matrix product `a * b`
    pub fn multiply_matrices(a: &Self, b: &Self) -> Self {
        let ae = &a.elements;
        let be = &b.elements;

        let (a11, a12, a13) = (ae[0], ae[3], ae[6]);
        let (a21, a22, a23) = (ae[1], ae[4], ae[7]);
        let (a31, a32, a33) = (ae[2], ae[5], ae[8]);

        let (b11, b12, b13) = (be[0], be[3], be[6]);
        let (b21, b22, b23) = (be[1], be[4], be[7]);
        let (b31, b32, b33) = (be[2], be[5], be[8]);

        Self {
            elements: [
                a11 * b11 + a12 * b21 + a13 * b31,
                a21 * b11 + a22 * b21 + a23 * b31,
                a31 * b11 + a32 * b21 + a33 * b31,
                a11 * b12 + a12 * b22 + a13 * b32,
                a21 * b12 + a22 * b22 + a23 * b32,
                a31 * b12 + a32 * b22 + a33 * b32,
                a11 * b13 + a12 * b23 + a13 * b33,
                a21 * b13 + a22 * b23 + a23 * b33,
                a31 * b13 + a32 * b23 + a33 * b33,
            ],
        }
    }

    /// Elements as a column-major array
    pub fn to_array(&self) -> [f64; 9] {
        self.elements
    }

    /// Create a matrix from a column-major array
    pub fn from_array(array: [f64; 9]) -> Self {
        Self { elements: array }
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, m: Self) -> Self {
        Self::multiply_matrices(&self, &m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_determinant() {
        assert_relative_eq!(Matrix3::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn test_inverse_times_matrix_is_identity() {
        let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0);
        let product = m.multiply(&m.inverse());
        for (value, expected) in product.elements.iter().zip(Matrix3::IDENTITY.elements) {
            assert_relative_eq!(*value, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_inverse_is_zero() {
        let singular = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0);
        assert_eq!(singular.inverse().elements, [0.0; 9]);
    }

    #[test]
    fn test_transpose_round_trip() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_rotate_then_apply() {
        use crate::math::Vector2;
        let m = Matrix3::IDENTITY.rotate(std::f64::consts::FRAC_PI_2);
        let v = Vector2::new(1.0, 0.0).apply_matrix3(&m);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, -1.0, epsilon = 1e-12);
    }
}
