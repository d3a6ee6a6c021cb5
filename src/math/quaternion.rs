//! Quaternion rotation type

use super::{Euler, MathError, Matrix4, RotationOrder, Vector3};

/// A rotation quaternion; defaults to the identity rotation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
    /// W (scalar) component
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from its components
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Get a component by index (0 = x, 1 = y, 2 = z, 3 = w)
    pub fn component(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::IndexOutOfRange { index, limit: 4 }),
        }
    }

    /// Set a component by index (0 = x, 1 = y, 2 = z, 3 = w)
    pub fn set_component(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(MathError::IndexOutOfRange { index, limit: 4 }),
        }
        Ok(())
    }

    /// Build a quaternion from an Euler rotation
    pub fn from_euler(euler: &Euler) -> Self {
        let (x, y, z) = (euler.x, euler.y, euler.z);

        let c1 = (x / 2.0).cos();
        let c2 = (y / 2.0).cos();
        let c3 = (z / 2.0).cos();
        let s1 = (x / 2.0).sin();
        let s2 = (y / 2.0).sin();
        let s3 = (z / 2.0).sin();

        match euler.order {
            RotationOrder::Xyz => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Yxz => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::Zxy => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Zyx => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::Yzx => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Xzy => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
        }
    }

    /// Build a quaternion from a unit axis and an angle in radians
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let half_angle = angle / 2.0;
        let s = half_angle.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half_angle.cos())
    }

    /// Build a quaternion from the unscaled rotation part of a matrix
    pub fn from_rotation_matrix(m: &Matrix4) -> Self {
        let te = &m.elements;

        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        let trace = m11 + m22 + m33;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::new(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::new((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::new((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        }
    }

    /// Build the rotation carrying unit vector `from` onto unit vector `to`
    pub fn from_unit_vectors(from: Vector3, to: Vector3) -> Self {
        const EPS: f64 = 0.000001;

        let r = from.dot(to) + 1.0;

        let q = if r < EPS {
            // opposite directions: pick any orthogonal axis
            if from.x.abs() > from.z.abs() {
                Self::new(-from.y, from.x, 0.0, 0.0)
            } else {
                Self::new(0.0, -from.z, from.y, 0.0)
            }
        } else {
            let cross = from.cross(to);
            Self::new(cross.x, cross.y, cross.z, r)
        };
        q.normalize()
    }

    /// Angle to another quaternion in radians
    pub fn angle_to(&self, q: &Self) -> f64 {
        2.0 * self.dot(q).clamp(-1.0, 1.0).abs().acos()
    }

    /// Rotate towards `q` by at most `step` radians
    pub fn rotate_towards(&self, q: &Self, step: f64) -> Self {
        let angle = self.angle_to(q);
        if angle == 0.0 {
            return *self;
        }
        let t = (step / angle).min(1.0);
        self.slerp(q, t)
    }

    /// Inverse rotation; assumes unit length
    pub fn inverse(&self) -> Self {
        self.conjugate()
    }

    /// Conjugate of this quaternion
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Dot product with `q`
    pub fn dot(&self, q: &Self) -> f64 {
        self.x * q.x + self.y * q.y + self.z * q.z + self.w * q.w
    }

    /// Squared length
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Length
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length; a zero quaternion becomes the identity
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            Self::IDENTITY
        } else {
            let inv = 1.0 / length;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        }
    }

    /// Hamilton product `self * q`
    pub fn multiply(&self, q: &Self) -> Self {
        Self::multiply_quaternions(self, q)
    }

    /// Hamilton product `q * self`
    pub fn premultiply(&self, q: &Self) -> Self {
        Self::multiply_quaternions(q, self)
    }

    /// Hamilton product `a * b`
    pub fn multiply_quaternions(a: &Self, b: &Self) -> Self {
        let (qax, qay, qaz, qaw) = (a.x, a.y, a.z, a.w);
        let (qbx, qby, qbz, qbw) = (b.x, b.y, b.z, b.w);

        Self::new(
            qax * qbw + qaw * qbx + qay * qbz - qaz * qby,
            qay * qbw + qaw * qby + qaz * qbx - qax * qbz,
            qaz * qbw + qaw * qbz + qax * qby - qay * qbx,
            qaw * qbw - qax * qbx - qay * qby - qaz * qbz,
        )
    }

    /// Spherical linear interpolation towards `qb` by factor `t`
    pub fn slerp(&self, qb: &Self, t: f64) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *qb;
        }

        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let mut cos_half_theta = self.dot(qb);

        // take the shorter arc
        let mut target = *qb;
        if cos_half_theta < 0.0 {
            target = Self::new(-qb.x, -qb.y, -qb.z, -qb.w);
            cos_half_theta = -cos_half_theta;
        }

        if cos_half_theta >= 1.0 {
            return *self;
        }

        let sqr_sin_half_theta = 1.0 - cos_half_theta * cos_half_theta;
        if sqr_sin_half_theta <= f64::EPSILON {
            // angles are nearly identical: plain lerp, renormalized
            let s = 1.0 - t;
            return Self::new(
                s * x + t * target.x,
                s * y + t * target.y,
                s * z + t * target.z,
                s * w + t * target.w,
            )
            .normalize();
        }

        let sin_half_theta = sqr_sin_half_theta.sqrt();
        let half_theta = sin_half_theta.atan2(cos_half_theta);
        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self::new(
            x * ratio_a + target.x * ratio_b,
            y * ratio_a + target.y * ratio_b,
            z * ratio_a + target.z * ratio_b,
            w * ratio_a + target.w * ratio_b,
        )
    }

    /// Components as an `[x, y, z, w]` array
    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Create a quaternion from an `[x, y, z, w]` array
    pub fn from_array(array: [f64; 4]) -> Self {
        Self::new(array[0], array[1], array[2], array[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_identity_is_default() {
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);
        assert_relative_eq!(Quaternion::IDENTITY.length(), 1.0);
    }

    #[test]
    fn test_axis_angle_round_trip_through_matrix() {
        let q = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2);
        let m = Matrix4::from_quaternion(&q);
        let back = Quaternion::from_rotation_matrix(&m);
        assert_relative_eq!(q.dot(&back).abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_multiply_by_conjugate_is_identity() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0, 0.6, 0.8), 1.2);
        let product = q.multiply(&q.conjugate());
        assert_relative_eq!(product.w, 1.0, epsilon = 1e-12);
        assert_relative_eq!(product.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_unit_vectors() {
        let q = Quaternion::from_unit_vectors(Vector3::X, Vector3::Y);
        let rotated = Vector3::X.apply_quaternion(&q);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);

        // antiparallel input still produces a valid half-turn
        let q = Quaternion::from_unit_vectors(Vector3::X, -Vector3::X);
        let rotated = Vector3::X.apply_quaternion(&q);
        assert_relative_eq!(rotated.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vector3::Y, FRAC_PI_2);

        assert_eq!(a.slerp(&b, 0.0), a);
        assert_eq!(a.slerp(&b, 1.0), b);

        let mid = a.slerp(&b, 0.5);
        assert_relative_eq!(a.angle_to(&mid), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_to() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vector3::X, FRAC_PI_2);
        assert_relative_eq!(a.angle_to(&b), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_identity() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalize(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_component_index_bounds() {
        let q = Quaternion::IDENTITY;
        assert_eq!(q.component(3), Ok(1.0));
        assert_eq!(
            q.component(4),
            Err(MathError::IndexOutOfRange { index: 4, limit: 4 })
        );
    }
}
