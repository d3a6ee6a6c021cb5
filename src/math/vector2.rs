//! 2D vector type

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

use super::{MathError, Matrix3};

/// A 2D vector with `f64` components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vector2 {
    /// The zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector from its components
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a vector with both components set to `scalar`
    pub const fn splat(scalar: f64) -> Self {
        Self::new(scalar, scalar)
    }

    /// Get a component by index (0 = x, 1 = y)
    pub fn component(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(MathError::IndexOutOfRange { index, limit: 2 }),
        }
    }

    /// Set a component by index (0 = x, 1 = y)
    pub fn set_component(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => return Err(MathError::IndexOutOfRange { index, limit: 2 }),
        }
        Ok(())
    }

    /// Dot product with `v`
    pub fn dot(self, v: Self) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Scalar cross product (z component of the 3D cross product)
    pub fn cross(self, v: Self) -> f64 {
        self.x * v.y - self.y * v.x
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
        self.x.abs() + self.y.abs()
    }

    /// Angle in radians with respect to the positive x-axis, in [0, 2pi)
    pub fn angle(self) -> f64 {
        (-self.y).atan2(-self.x) + std::f64::consts::PI
    }

    /// Euclidean distance to `v`
    pub fn distance_to(self, v: Self) -> f64 {
        self.distance_to_squared(v).sqrt()
    }

    /// Squared Euclidean distance to `v`
    pub fn distance_to_squared(self, v: Self) -> f64 {
        let dx = self.x - v.x;
        let dy = self.y - v.y;
        dx * dx + dy * dy
    }

    /// Manhattan distance to `v`
    pub fn manhattan_distance_to(self, v: Self) -> f64 {
        (self.x - v.x).abs() + (self.y - v.y).abs()
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
        Self::new(self.x.min(v.x), self.y.min(v.y))
    }

    /// Component-wise maximum with `v`
    pub fn max(self, v: Self) -> Self {
        Self::new(self.x.max(v.x), self.y.max(v.y))
    }

    /// Component-wise clamp between `min` and `max` (assumed ordered)
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Clamp both components between two scalars
    pub fn clamp_scalar(self, min: f64, max: f64) -> Self {
        self.clamp(Self::splat(min), Self::splat(max))
    }

    /// Clamp the vector's length between `min` and `max`
    pub fn clamp_length(self, min: f64, max: f64) -> Self {
        let length = self.length();
        let divisor = if length == 0.0 { 1.0 } else { length };
        self / divisor * length.clamp(min, max)
    }

    /// Round both components down
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Round both components up
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    /// Round both components to the nearest integer
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Round both components towards zero
    pub fn round_to_zero(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }

    /// Transform by a 3x3 matrix (as a 2D point, w = 1)
    pub fn apply_matrix3(self, m: &Matrix3) -> Self {
        let Self { x, y } = self;
        let e = &m.elements;
        Self::new(e[0] * x + e[3] * y + e[6], e[1] * x + e[4] * y + e[7])
    }

    /// Rotate around `center` by `angle` radians
    pub fn rotate_around(self, center: Self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let x = self.x - center.x;
        let y = self.y - center.y;
        Self::new(x * c - y * s + center.x, x * s + y * c + center.y)
    }

    /// Create a vector with components uniformly sampled from [0, 1)
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::new(rng.random(), rng.random())
    }

    /// Components as an array
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Create a vector from an array
    pub fn from_array(array: [f64; 2]) -> Self {
        Self::new(array[0], array[1])
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, v: Self) {
        *self = *self + v;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, v: Self) {
        *self = *self - v;
    }
}

impl Mul for Vector2 {
    type Output = Self;

    /// Component-wise product
    fn mul(self, v: Self) -> Self {
        Self::new(self.x * v.x, self.y * v.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, scalar: f64) {
        *self = *self * scalar;
    }
}

impl Div for Vector2 {
    type Output = Self;

    /// Component-wise quotient
    fn div(self, v: Self) -> Self {
        Self::new(self.x / v.x, self.y / v.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        self * (1.0 / scalar)
    }
}

impl DivAssign<f64> for Vector2 {
    fn div_assign(&mut self, scalar: f64) {
        *self = *self / scalar;
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle() {
        assert_relative_eq!(Vector2::new(1.0, 0.0).angle(), 0.0);
        assert_relative_eq!(Vector2::new(0.0, 1.0).angle(), FRAC_PI_2);
        assert_relative_eq!(Vector2::new(-1.0, 0.0).angle(), PI);
    }

    #[test]
    fn test_cross() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 1.0);
        assert_relative_eq!(a.cross(b), 1.0);
        assert_relative_eq!(b.cross(a), -1.0);
    }

    #[test]
    fn test_rotate_around() {
        let v = Vector2::new(2.0, 1.0).rotate_around(Vector2::new(1.0, 1.0), FRAC_PI_2);
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_component_index_bounds() {
        let v = Vector2::new(1.0, 2.0);
        assert_eq!(v.component(1), Ok(2.0));
        assert_eq!(
            v.component(2),
            Err(MathError::IndexOutOfRange { index: 2, limit: 2 })
        );
    }
}
