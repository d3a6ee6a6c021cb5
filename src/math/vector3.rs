//! 3D vector type
//!
//! This is the position type consumed by the spatial index; the index
//! itself only relies on component access and [`Vector3::distance_to`].

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

use super::{Euler, MathError, Matrix3, Matrix4, Quaternion};

/// A 3D vector with `f64` components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// The zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Unit vector along the X axis
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };

    /// Unit vector along the Y axis
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };

    /// Unit vector along the Z axis
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a vector from its components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to `scalar`
    pub const fn splat(scalar: f64) -> Self {
        Self::new(scalar, scalar, scalar)
    }

    /// Get a component by index (0 = x, 1 = y, 2 = z)
    pub fn component(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::IndexOutOfRange { index, limit: 3 }),
        }
    }

    /// Set a component by index (0 = x, 1 = y, 2 = z)
    pub fn set_component(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(MathError::IndexOutOfRange { index, limit: 3 }),
        }
        Ok(())
    }

    /// Dot product with `v`
    pub fn dot(self, v: Self) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Cross product with `v`
    pub fn cross(self, v: Self) -> Self {
        Self::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared Euclidean length
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Manhattan (taxicab) length
    pub fn manhattan_length(self) -> f64 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Euclidean distance to `v`
    pub fn distance_to(self, v: Self) -> f64 {
        self.distance_to_squared(v).sqrt()
    }

    /// Squared Euclidean distance to `v`
    pub fn distance_to_squared(self, v: Self) -> f64 {
        let dx = self.x - v.x;
        let dy = self.y - v.y;
        let dz = self.z - v.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Manhattan distance to `v`
    pub fn manhattan_distance_to(self, v: Self) -> f64 {
        (self.x - v.x).abs() + (self.y - v.y).abs() + (self.z - v.z).abs()
    }

    /// Normalize to unit length; a zero vector is returned unchanged
    pub fn normalize(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            self
        } else {
            self / length
        }
    }

    /// Normalize and scale to the given length
    pub fn set_length(self, length: f64) -> Self {
        self.normalize() * length
    }

    /// Linear interpolation towards `v` by factor `alpha`
    pub fn lerp(self, v: Self, alpha: f64) -> Self {
        self + (v - self) * alpha
    }

    /// Component-wise minimum with `v`
    pub fn min(self, v: Self) -> Self {
        Self::new(self.x.min(v.x), self.y.min(v.y), self.z.min(v.z))
    }

    /// Component-wise maximum with `v`
    pub fn max(self, v: Self) -> Self {
        Self::new(self.x.max(v.x), self.y.max(v.y), self.z.max(v.z))
    }

    /// Component-wise clamp between `min` and `max` (assumed ordered)
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Clamp every component between two scalars
    pub fn clamp_scalar(self, min: f64, max: f64) -> Self {
        self.clamp(Self::splat(min), Self::splat(max))
    }

    /// Clamp the vector's length between `min` and `max`
    pub fn clamp_length(self, min: f64, max: f64) -> Self {
        let length = self.length();
        let divisor = if length == 0.0 { 1.0 } else { length };
        self / divisor * length.clamp(min, max)
    }

    /// Round every component down
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Round every component up
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil())
    }

    /// Round every component to the nearest integer
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round())
    }

    /// Round every component towards zero
    pub fn round_to_zero(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc(), self.z.trunc())
    }

    /// Project onto `v`; projecting onto a zero vector yields zero
    pub fn project_on_vector(self, v: Self) -> Self {
        let denominator = v.length_squared();
        if denominator == 0.0 {
            Self::ZERO
        } else {
            v * (v.dot(self) / denominator)
        }
    }

    /// Project onto the plane through the origin with the given normal
    pub fn project_on_plane(self, plane_normal: Self) -> Self {
        self - self.project_on_vector(plane_normal)
    }

    /// Reflect off the plane orthogonal to `normal` (assumed unit length)
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Transform by a 3x3 matrix
    pub fn apply_matrix3(self, m: &Matrix3) -> Self {
        let Self { x, y, z } = self;
        let e = &m.elements;
        Self::new(
            e[0] * x + e[3] * y + e[6] * z,
            e[1] * x + e[4] * y + e[7] * z,
            e[2] * x + e[5] * y + e[8] * z,
        )
    }

    /// Transform by a normal matrix and renormalize
    pub fn apply_normal_matrix(self, m: &Matrix3) -> Self {
        self.apply_matrix3(m).normalize()
    }

    /// Transform by a 4x4 matrix, applying the perspective divide
    pub fn apply_matrix4(self, m: &Matrix4) -> Self {
        let Self { x, y, z } = self;
        let e = &m.elements;
        let w = 1.0 / (e[3] * x + e[7] * y + e[11] * z + e[15]);
        Self::new(
            (e[0] * x + e[4] * y + e[8] * z + e[12]) * w,
            (e[1] * x + e[5] * y + e[9] * z + e[13]) * w,
            (e[2] * x + e[6] * y + e[10] * z + e[14]) * w,
        )
    }

    /// Rotate by a quaternion
    pub fn apply_quaternion(self, q: &Quaternion) -> Self {
        let Self { x, y, z } = self;
        let (qx, qy, qz, qw) = (q.x, q.y, q.z, q.w);

        // quat * vector
        let ix = qw * x + qy * z - qz * y;
        let iy = qw * y + qz * x - qx * z;
        let iz = qw * z + qx * y - qy * x;
        let iw = -qx * x - qy * y - qz * z;

        // result * inverse quat
        Self::new(
            ix * qw + iw * -qx + iy * -qz - iz * -qy,
            iy * qw + iw * -qy + iz * -qx - ix * -qz,
            iz * qw + iw * -qz + ix * -qy - iy * -qx,
        )
    }

    /// Rotate by an Euler rotation
    pub fn apply_euler(self, euler: &Euler) -> Self {
        self.apply_quaternion(&Quaternion::from_euler(euler))
    }

    /// Rotate around `axis` (assumed unit length) by `angle` radians
    pub fn apply_axis_angle(self, axis: Self, angle: f64) -> Self {
        self.apply_quaternion(&Quaternion::from_axis_angle(axis, angle))
    }

    /// Transform as a direction by the rotation part of an affine matrix
    pub fn transform_direction(self, m: &Matrix4) -> Self {
        let Self { x, y, z } = self;
        let e = &m.elements;
        Self::new(
            e[0] * x + e[4] * y + e[8] * z,
            e[1] * x + e[5] * y + e[9] * z,
            e[2] * x + e[6] * y + e[10] * z,
        )
        .normalize()
    }

    /// Create a vector from spherical coordinates
    pub fn from_spherical_coords(radius: f64, phi: f64, theta: f64) -> Self {
        let sin_phi_radius = phi.sin() * radius;
        Self::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        )
    }

    /// Create a vector from cylindrical coordinates
    pub fn from_cylindrical_coords(radius: f64, theta: f64, y: f64) -> Self {
        Self::new(radius * theta.sin(), y, radius * theta.cos())
    }

    /// Extract the translation component of a 4x4 matrix
    pub fn from_matrix_position(m: &Matrix4) -> Self {
        let e = &m.elements;
        Self::new(e[12], e[13], e[14])
    }

    /// Extract the per-axis scale factors of a 4x4 matrix
    pub fn from_matrix_scale(m: &Matrix4) -> Self {
        Self::new(
            Self::from_matrix_column(m, 0).length(),
            Self::from_matrix_column(m, 1).length(),
            Self::from_matrix_column(m, 2).length(),
        )
    }

    /// Read a column of a 4x4 matrix (0-3)
    pub fn from_matrix_column(m: &Matrix4, index: usize) -> Self {
        let offset = index * 4;
        let e = &m.elements;
        Self::new(e[offset], e[offset + 1], e[offset + 2])
    }

    /// Read a column of a 3x3 matrix (0-2)
    pub fn from_matrix3_column(m: &Matrix3, index: usize) -> Self {
        let offset = index * 3;
        let e = &m.elements;
        Self::new(e[offset], e[offset + 1], e[offset + 2])
    }

    /// Sum of a slice of vectors
    pub fn sum(list: &[Self]) -> Self {
        list.iter().fold(Self::ZERO, |acc, v| acc + *v)
    }

    /// Component-wise mean of a slice of vectors; empty slices yield zero
    pub fn centroid(list: &[Self]) -> Self {
        if list.is_empty() {
            Self::ZERO
        } else {
            Self::sum(list) * (1.0 / list.len() as f64)
        }
    }

    /// Create a vector with components uniformly sampled from [0, 1)
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::new(rng.random(), rng.random(), rng.random())
    }

    /// Components as an array
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Create a vector from an array
    pub fn from_array(array: [f64; 3]) -> Self {
        Self::new(array[0], array[1], array[2])
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, v: Self) {
        *self = *self + v;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, v: Self) {
        *self = *self - v;
    }
}

impl Mul for Vector3 {
    type Output = Self;

    /// Component-wise product
    fn mul(self, v: Self) -> Self {
        Self::new(self.x * v.x, self.y * v.y, self.z * v.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, scalar: f64) {
        *self = *self * scalar;
    }
}

impl Div for Vector3 {
    type Output = Self;

    /// Component-wise quotient
    fn div(self, v: Self) -> Self {
        Self::new(self.x / v.x, self.y / v.y, self.z / v.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        self * (1.0 / scalar)
    }
}

impl DivAssign<f64> for Vector3 {
    fn div_assign(&mut self, scalar: f64) {
        *self = *self / scalar;
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross_product_of_axes() {
        let c = Vector3::X.cross(Vector3::Y);
        assert_relative_eq!(c.x, 0.0);
        assert_relative_eq!(c.y, 0.0);
        assert_relative_eq!(c.z, 1.0);
    }

    #[test]
    fn test_distance_and_length() {
        let a = Vector3::new(1.0, 2.0, 2.0);
        assert_relative_eq!(a.length(), 3.0);
        assert_relative_eq!(a.distance_to(Vector3::ZERO), 3.0);
        assert_relative_eq!(a.manhattan_length(), 5.0);
    }

    #[test]
    fn test_normalize_zero_vector_is_unchanged() {
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
        let v = Vector3::new(0.0, 3.0, 4.0).normalize();
        assert_relative_eq!(v.length(), 1.0);
    }

    #[test]
    fn test_component_index_bounds() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.component(2), Ok(3.0));
        assert_eq!(
            v.component(3),
            Err(MathError::IndexOutOfRange { index: 3, limit: 3 })
        );

        let mut v = v;
        assert!(v.set_component(0, 9.0).is_ok());
        assert_eq!(v.x, 9.0);
        assert!(v.set_component(4, 1.0).is_err());
    }

    #[test]
    fn test_apply_quaternion_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vector3::Y, std::f64::consts::FRAC_PI_2);
        let rotated = Vector3::X.apply_quaternion(&q);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid() {
        let corners = [Vector3::new(-10.0, -10.0, -10.0), Vector3::new(10.0, 10.0, 10.0)];
        assert_eq!(Vector3::centroid(&corners), Vector3::ZERO);
        assert_eq!(Vector3::centroid(&[]), Vector3::ZERO);
    }

    #[test]
    fn test_reflect() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        let reflected = v.reflect(Vector3::Y);
        assert_relative_eq!(reflected.x, 1.0);
        assert_relative_eq!(reflected.y, 1.0);
    }

    #[test]
    fn test_lerp() {
        let a = Vector3::ZERO;
        let b = Vector3::new(10.0, 20.0, 30.0);
        let mid = a.lerp(b, 0.5);
        assert_relative_eq!(mid.x, 5.0);
        assert_relative_eq!(mid.y, 10.0);
        assert_relative_eq!(mid.z, 15.0);
    }
}
