//! Closed-form vector, matrix, rotation and color arithmetic
//!
//! All types here are plain `Copy` data with value-returning operations.
//! Component accessors that take a runtime index reject out-of-range
//! indices with [`MathError::IndexOutOfRange`] instead of clamping or
//! returning a default.

mod color;
mod euler;
mod matrix3;
mod matrix4;
mod quaternion;
pub mod utils;
mod vector2;
mod vector3;

pub use color::Color;
pub use euler::{Euler, RotationOrder};
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::Quaternion;
pub use vector2::Vector2;
pub use vector3::Vector3;

/// Errors reported by the math types
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A runtime component index was outside the valid range for the type
    #[error("component index {index} is out of range (valid: 0..{limit})")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of components the type has
        limit: usize,
    },
}
