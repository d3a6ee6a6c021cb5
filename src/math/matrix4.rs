//! 4x4 matrix type

use std::ops::Mul;

use super::{Euler, Quaternion, Vector3};

/// A 4x4 matrix, stored column-major
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4 {
    /// Matrix values in column-major order
    pub elements: [f64; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// The identity matrix
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Create a matrix from row-major arguments
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n11: f64,
        n12: f64,
        n13: f64,
        n14: f64,
        n21: f64,
        n22: f64,
        n23: f64,
        n24: f64,
        n31: f64,
        n32: f64,
        n33: f64,
        n34: f64,
        n41: f64,
        n42: f64,
        n43: f64,
        n44: f64,
    ) -> Self {
        Self {
            elements: [
                n11, n21, n31, n41, //
                n12, n22, n32, n42, //
                n13, n23, n33, n43, //
                n14, n24, n34, n44,
            ],
        }
    }

    /// Copy the translation component of `m` into this matrix
    pub fn copy_position(&self, m: &Self) -> Self {
        let mut te = self.elements;
        te[12] = m.elements[12];
        te[13] = m.elements[13];
        te[14] = m.elements[14];
        Self { elements: te }
    }

    /// Read the basis vectors (columns) of this matrix
    pub fn extract_basis(&self) -> (Vector3, Vector3, Vector3) {
        (
            Vector3::from_matrix_column(self, 0),
            Vector3::from_matrix_column(self, 1),
            Vector3::from_matrix_column(self, 2),
        )
    }

    /// Build a matrix with the given basis vectors as columns
    pub fn from_basis(x_axis: Vector3, y_axis: Vector3, z_axis: Vector3) -> Self {
        Self::new(
            x_axis.x, y_axis.x, z_axis.x, 0.0, //
            x_axis.y, y_axis.y, z_axis.y, 0.0, //
            x_axis.z, y_axis.z, z_axis.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Extract the rotation component of `m`, removing scale
    pub fn extract_rotation(m: &Self) -> Self {
        let me = &m.elements;

        let scale_x_inv = 1.0 / Vector3::from_matrix_column(m, 0).length();
        let scale_y_inv = 1.0 / Vector3::from_matrix_column(m, 1).length();
        let scale_z_inv = 1.0 / Vector3::from_matrix_column(m, 2).length();

        let mut te = [0.0; 16];
        te[0] = me[0] * scale_x_inv;
        te[1] = me[1] * scale_x_inv;
        te[2] = me[2] * scale_x_inv;
        te[4] = me[4] * scale_y_inv;
        te[5] = me[5] * scale_y_inv;
        te[6] = me[6] * scale_y_inv;
        te[8] = me[8] * scale_z_inv;
        te[9] = me[9] * scale_z_inv;
        te[10] = me[10] * scale_z_inv;
        te[15] = 1.0;
        Self { elements: te }
    }

    /// Build a rotation matrix from an Euler rotation
    pub fn from_euler(euler: &Euler) -> Self {
        Self::from_quaternion(&Quaternion::from_euler(euler))
    }

    /// Build a rotation matrix from a quaternion
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::compose(Vector3::ZERO, q, Vector3::splat(1.0))
    }

    /// Build a rotation matrix looking from `eye` towards `target`
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let mut z = eye - target;

        if z.length_squared() == 0.0 {
            // eye and target are in the same position
            z.z = 1.0;
        }
        z = z.normalize();

        let mut x = up.cross(z);
        if x.length_squared() == 0.0 {
            // up and z are parallel
            z.x += 0.0001;
            z = z.normalize();
            x = up.cross(z);
        }
        x = x.normalize();
        let y = z.cross(x);

        Self::new(
            x.x, y.x, z.x, 0.0, //
            x.y, y.y, z.y, 0.0, //
            x.z, y.z, z.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
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
        let mut te = [0.0; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += ae[k * 4 + row] * be[col * 4 + k];
                }
                te[col * 4 + row] = sum;
            }
        }
        Self { elements: te }
    }

    /// Multiply every element by a scalar
    pub fn multiply_scalar(&self, s: f64) -> Self {
        let mut elements = self.elements;
        for value in &mut elements {
            *value *= s;
        }
        Self { elements }
    }

    /// Determinant, cofactor expansion along the bottom row
    pub fn determinant(&self) -> f64 {
        let te = &self.elements;

        let (n11, n12, n13, n14) = (te[0], te[4], te[8], te[12]);
        let (n21, n22, n23, n24) = (te[1], te[5], te[9], te[13]);
        let (n31, n32, n33, n34) = (te[2], te[6], te[10], te[14]);
        let (n41, n42, n43, n44) = (te[3], te[7], te[11], te[15]);

        n41 * (n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33
            + n12 * n24 * n33
            + n13 * n22 * n34
            - n12 * n23 * n34)
            + n42
                * (n11 * n23 * n34 - n11 * n24 * n33 + n14 * n21 * n33 - n13 * n21 * n34
                    + n13 * n24 * n31
                    - n14 * n23 * n31)
            + n43
                * (n11 * n24 * n32 - n11 * n22 * n34 - n14 * n21 * n32
                    + n12 * n21 * n34
                    + n14 * n22 * n31
                    - n12 * n24 * n31)
            + n44
                * (-n13 * n22 * n31 - n11 * n23 * n32 + n11 * n22 * n33 + n13 * n21 * n32
                    - n12 * n21 * n33
                    + n12 * n23 * n31)
    }

    /// Transpose of this matrix
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        let mut te = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                te[row * 4 + col] = m[col * 4 + row];
            }
        }
        Self { elements: te }
    }

    /// Replace the translation component
    pub fn with_position(&self, v: Vector3) -> Self {
        let mut te = self.elements;
        te[12] = v.x;
        te[13] = v.y;
        te[14] = v.z;
        Self { elements: te }
    }

    /// Inverse of this matrix; a degenerate matrix inverts to all zeros
    pub fn inverse(&self) -> Self {
        let te = &self.elements;

        let (n11, n21, n31, n41) = (te[0], te[1], te[2], te[3]);
        let (n12, n22, n32, n42) = (te[4], te[5], te[6], te[7]);
        let (n13, n23, n33, n43) = (te[8], te[9], te[10], te[11]);
        let (n14, n24, n34, n44) = (te[12], te[13], te[14], te[15]);

        let t11 = n23 * n34 * n42 - n24 * n33 * n42 + n24 * n32 * n43
            - n22 * n34 * n43
            - n23 * n32 * n44
            + n22 * n33 * n44;
        let t12 = n14 * n33 * n42 - n13 * n34 * n42 - n14 * n32 * n43
            + n12 * n34 * n43
            + n13 * n32 * n44
            - n12 * n33 * n44;
        let t13 = n13 * n24 * n42 - n14 * n23 * n42 + n14 * n22 * n43
            - n12 * n24 * n43
            - n13 * n22 * n44
            + n12 * n23 * n44;
        let t14 = n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33
            + n12 * n24 * n33
            + n13 * n22 * n34
            - n12 * n23 * n34;

        let det = n11 * t11 + n21 * t12 + n31 * t13 + n41 * t14;
        if det == 0.0 {
            return Self { elements: [0.0; 16] };
        }
        let det_inv = 1.0 / det;

        let mut out = [0.0; 16];
        out[0] = t11 * det_inv;
        out[1] = (n24 * n33 * n41 - n23 * n34 * n41 - n24 * n31 * n43
            + n21 * n34 * n43
            + n23 * n31 * n44
            - n21 * n33 * n44)
            * det_inv;
        out[2] = (n22 * n34 * n41 - n24 * n32 * n41 + n24 * n31 * n42
            - n21 * n34 * n42
            - n22 * n31 * n44
            + n21 * n32 * n44)
            * det_inv;
        out[3] = (n23 * n32 * n41 - n22 * n33 * n41 - n23 * n31 * n42
            + n21 * n33 * n42
            + n22 * n31 * n43
            - n21 * n32 * n43)
            * det_inv;

        out[4] = t12 * det_inv;
        out[5] = (n13 * n34 * n41 - n14 * n33 * n41 + n14 * n31 * n43
            - n11 * n34 * n43
            - n13 * n31 * n44
            + n11 * n33 * n44)
            * det_inv;
        out[6] = (n14 * n32 * n41 - n12 * n34 * n41 - n14 * n31 * n42
            + n11 * n34 * n42
            + n12 * n31 * n44
            - n11 * n32 * n44)
            * det_inv;
        out[7] = (n12 * n33 * n41 - n13 * n32 * n41 + n13 * n31 * n42
            - n11 * n33 * n42
            - n12 * n31 * n43
            + n11 * n32 * n43)
            * det_inv;

        out[8] = t13 * det_inv;
        out[9] = (n14 * n23 * n41 - n13 * n24 * n41 - n14 * n21 * n43
            + n11 * n24 * n43
            + n13 * n21 * n44
            - n11 * n23 * n44)
            * det_inv;
        out[10] = (n12 * n24 * n41 - n14 * n22 * n41 + n14 * n21 * n42
            - n11 * n24 * n42
            - n12 * n21 * n44
            + n11 * n22 * n44)
            * det_inv;
        out[11] = (n13 * n22 * n41 - n12 * n23 * n41 - n13 * n21 * n42
            + n11 * n23 * n42
            + n12 * n21 * n43
            - n11 * n22 * n43)
            * det_inv;

        out[12] = t14 * det_inv;
        out[13] = (n13 * n24 * n31 - n14 * n23 * n31 + n14 * n21 * n33
            - n11 * n24 * n33
            - n13 * n21 * n34
            + n11 * n23 * n34)
            * det_inv;
        out[14] = (n14 * n22 * n31 - n12 * n24 * n31 - n14 * n21 * n32
            + n11 * n24 * n32
            + n12 * n21 * n34
            - n11 * n22 * n34)
            * det_inv;
        out[15] = (n12 * n23 * n31 - n13 * n22 * n31 + n13 * n21 * n32
            - n11 * n23 * n32
            - n12 * n21 * n33
            + n11 * n22 * n33)
            * det_inv;

        Self { elements: out }
    }

    /// Multiply the basis columns by the components of `v`
    pub fn scale(&self, v: Vector3) -> Self {
        let mut te = self.elements;
        te[0] *= v.x;
        te[1] *= v.x;
        te[2] *= v.x;
        te[3] *= v.x;
        te[4] *= v.y;
        te[5] *= v.y;
        te[6] *= v.y;
        te[7] *= v.y;
        te[8] *= v.z;
        te[9] *= v.z;
        te[10] *= v.z;
        te[11] *= v.z;
        Self { elements: te }
    }

    /// Largest scale factor applied by this matrix along any basis axis
    pub fn max_scale_on_axis(&self) -> f64 {
        let te = &self.elements;
        let scale_x_sq = te[0] * te[0] + te[1] * te[1] + te[2] * te[2];
        let scale_y_sq = te[4] * te[4] + te[5] * te[5] + te[6] * te[6];
        let scale_z_sq = te[8] * te[8] + te[9] * te[9] + te[10] * te[10];
        scale_x_sq.max(scale_y_sq).max(scale_z_sq).sqrt()
    }

    /// Build a translation matrix
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self::new(
            1.0, 0.0, 0.0, x, //
            0.0, 1.0, 0.0, y, //
            0.0, 0.0, 1.0, z, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Build a rotation matrix around the X axis
    pub fn from_rotation_x(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Build a rotation matrix around the Y axis
    pub fn from_rotation_y(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Build a rotation matrix around the Z axis
    pub fn from_rotation_z(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Build a rotation matrix around an arbitrary unit axis
    pub fn from_rotation_axis(axis: Vector3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (tx, ty) = (t * x, t * y);

        Self::new(
            tx * x + c,
            tx * y - s * z,
            tx * z + s * y,
            0.0,
            tx * y + s * z,
            ty * y + c,
            ty * z - s * x,
            0.0,
            tx * z - s * y,
            ty * z + s * x,
            t * z * z + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Build a scale matrix
    pub fn from_scale(x: f64, y: f64, z: f64) -> Self {
        Self::new(
            x, 0.0, 0.0, 0.0, //
            0.0, y, 0.0, 0.0, //
            0.0, 0.0, z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Compose a transform from translation, rotation and scale
    pub fn compose(position: Vector3, quaternion: &Quaternion, scale: Vector3) -> Self {
        let (x, y, z, w) = (quaternion.x, quaternion.y, quaternion.z, quaternion.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let (sx, sy, sz) = (scale.x, scale.y, scale.z);

        Self {
            elements: [
                (1.0 - (yy + zz)) * sx,
                (xy + wz) * sx,
                (xz - wy) * sx,
                0.0,
                (xy - wz) * sy,
                (1.0 - (xx + zz)) * sy,
                (yz + wx) * sy,
                0.0,
                (xz + wy) * sz,
                (yz - wx) * sz,
                (1.0 - (xx + yy)) * sz,
                0.0,
                position.x,
                position.y,
                position.z,
                1.0,
            ],
        }
    }

    /// Decompose this transform into translation, rotation and scale
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        let te = &self.elements;

        let mut sx = Vector3::from_matrix_column(self, 0).length();
        let sy = Vector3::from_matrix_column(self, 1).length();
        let sz = Vector3::from_matrix_column(self, 2).length();

        // negative determinant flips one axis
        if self.determinant() < 0.0 {
            sx = -sx;
        }

        let position = Vector3::new(te[12], te[13], te[14]);

        let (inv_sx, inv_sy, inv_sz) = (1.0 / sx, 1.0 / sy, 1.0 / sz);
        let mut rotation = *self;
        rotation.elements[0] *= inv_sx;
        rotation.elements[1] *= inv_sx;
        rotation.elements[2] *= inv_sx;
        rotation.elements[4] *= inv_sy;
        rotation.elements[5] *= inv_sy;
        rotation.elements[6] *= inv_sy;
        rotation.elements[8] *= inv_sz;
        rotation.elements[9] *= inv_sz;
        rotation.elements[10] *= inv_sz;

        let quaternion = Quaternion::from_rotation_matrix(&rotation);
        let scale = Vector3::new(sx, sy, sz);

        (position, quaternion, scale)
    }

    /// Build a perspective projection (frustum) matrix
    pub fn make_perspective(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let x = 2.0 * near / (right - left);
        let y = 2.0 * near / (top - bottom);

        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);

        Self::new(
            x, 0.0, a, 0.0, //
            0.0, y, b, 0.0, //
            0.0, 0.0, c, d, //
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Build an orthographic projection matrix
    pub fn make_orthographic(
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let w = 1.0 / (right - left);
        let h = 1.0 / (top - bottom);
        let p = 1.0 / (far - near);

        let x = (right + left) * w;
        let y = (top + bottom) * h;
        let z = (far + near) * p;

        Self::new(
            2.0 * w,
            0.0,
            0.0,
            -x,
            0.0,
            2.0 * h,
            0.0,
            -y,
            0.0,
            0.0,
            -2.0 * p,
            -z,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Elements as a column-major array
    pub fn to_array(&self) -> [f64; 16] {
        self.elements
    }

    /// Create a matrix from a column-major array
    pub fn from_array(array: [f64; 16]) -> Self {
        Self { elements: array }
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, m: Self) -> Self {
        Self::multiply_matrices(&self, &m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_matrices_close(a: &Matrix4, b: &Matrix4) {
        for (x, y) in a.elements.iter().zip(b.elements.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_identity_round_trips() {
        assert_eq!(Matrix4::IDENTITY.transpose(), Matrix4::IDENTITY);
        assert_relative_eq!(Matrix4::IDENTITY.determinant(), 1.0);
        assert_matrices_close(&Matrix4::IDENTITY.inverse(), &Matrix4::IDENTITY);
    }

    #[test]
    fn test_inverse_of_affine_transform() {
        let m = Matrix4::from_translation(1.0, 2.0, 3.0)
            .multiply(&Matrix4::from_rotation_y(0.7))
            .multiply(&Matrix4::from_scale(2.0, 2.0, 2.0));
        let product = m.multiply(&m.inverse());
        assert_matrices_close(&product, &Matrix4::IDENTITY);
    }

    #[test]
    fn test_degenerate_inverse_is_zero() {
        let singular = Matrix4::from_scale(0.0, 1.0, 1.0);
        assert_eq!(singular.inverse().elements, [0.0; 16]);
    }

    #[test]
    fn test_rotation_matrix_matches_axis_angle() {
        let a = Matrix4::from_rotation_x(0.4);
        let b = Matrix4::from_rotation_axis(Vector3::X, 0.4);
        assert_matrices_close(&a, &b);
    }

    #[test]
    fn test_compose_decompose_round_trip() {
        let position = Vector3::new(1.0, -2.0, 0.5);
        let rotation = Quaternion::from_axis_angle(Vector3::Y.normalize(), FRAC_PI_2);
        let scale = Vector3::new(2.0, 3.0, 4.0);

        let m = Matrix4::compose(position, &rotation, scale);
        let (p, q, s) = m.decompose();

        assert_relative_eq!(p.x, position.x, epsilon = 1e-12);
        assert_relative_eq!(p.y, position.y, epsilon = 1e-12);
        assert_relative_eq!(s.x, scale.x, epsilon = 1e-12);
        assert_relative_eq!(s.z, scale.z, epsilon = 1e-12);
        assert_relative_eq!(q.dot(&rotation).abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_translation_moves_point() {
        let m = Matrix4::from_translation(5.0, 0.0, 0.0);
        let p = Vector3::ZERO.apply_matrix4(&m);
        assert_relative_eq!(p.x, 5.0);
    }

    #[test]
    fn test_max_scale_on_axis() {
        let m = Matrix4::from_scale(2.0, -5.0, 1.0);
        assert_relative_eq!(m.max_scale_on_axis(), 5.0);
    }
}
