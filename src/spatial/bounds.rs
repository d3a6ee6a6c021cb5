//! Axis-aligned boxes used by the spatial index

use std::fmt;

use crate::math::Vector3;

/// A coordinate axis, used when reporting per-axis validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The x axis
    X,
    /// The y axis
    Y,
    /// The z axis
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Axis-aligned box described by two opposite corners.
///
/// The corners may come in any order; extents are resolved per axis
/// with min/max when the box is tested, so a "flipped" box behaves the
/// same as its sorted counterpart.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// First corner
    pub corner_a: Vector3,
    /// Opposite corner
    pub corner_b: Vector3,
}

impl Aabb {
    /// Create a box from two opposite corners
    pub const fn new(corner_a: Vector3, corner_b: Vector3) -> Self {
        Self { corner_a, corner_b }
    }

    /// Per-axis minimum corner
    pub fn min(&self) -> Vector3 {
        self.corner_a.min(self.corner_b)
    }

    /// Per-axis maximum corner
    pub fn max(&self) -> Vector3 {
        self.corner_a.max(self.corner_b)
    }

    /// Midpoint of the two corners
    pub fn center(&self) -> Vector3 {
        (self.corner_a + self.corner_b) * 0.5
    }

    /// Whether `pos` lies inside the box. Points exactly on a face count
    /// as inside.
    pub fn contains(&self, pos: Vector3) -> bool {
        let min = self.min();
        let max = self.max();
        if pos.x > max.x || pos.x < min.x {
            return false;
        }
        if pos.y > max.y || pos.y < min.y {
            return false;
        }
        if pos.z > max.z || pos.z < min.z {
            return false;
        }
        true
    }

    /// Whether `pos` lies inside the box expanded by `range` on every
    /// face. A `range` of exactly zero degrades to [`Aabb::contains`].
    pub fn is_close_to(&self, pos: Vector3, range: f64) -> bool {
        if range == 0.0 {
            return self.contains(pos);
        }
        let min = self.min();
        let max = self.max();
        if pos.x - range > max.x || pos.x + range < min.x {
            return false;
        }
        if pos.y - range > max.y || pos.y + range < min.y {
            return false;
        }
        if pos.z - range > max.z || pos.z + range < min.z {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_order_does_not_matter() {
        let a = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(-1.0, -1.0, -1.0));
        let p = Vector3::new(0.5, -0.5, 0.9);
        assert_eq!(a.contains(p), b.contains(p));
        assert_eq!(a.min(), b.min());
        assert_eq!(a.center(), b.center());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bx = Aabb::new(Vector3::ZERO, Vector3::new(2.0, 2.0, 2.0));
        assert!(bx.contains(Vector3::new(2.0, 2.0, 2.0)));
        assert!(bx.contains(Vector3::ZERO));
        assert!(!bx.contains(Vector3::new(2.0 + 1e-12, 1.0, 1.0)));
    }

    #[test]
    fn test_is_close_to_expands_every_face() {
        let bx = Aabb::new(Vector3::ZERO, Vector3::new(1.0, 1.0, 1.0));
        assert!(!bx.contains(Vector3::new(1.5, 0.5, 0.5)));
        assert!(bx.is_close_to(Vector3::new(1.5, 0.5, 0.5), 0.6));
        assert!(!bx.is_close_to(Vector3::new(1.5, 0.5, 0.5), 0.4));
        // zero range falls back to plain containment
        assert!(bx.is_close_to(Vector3::new(1.0, 1.0, 1.0), 0.0));
        assert!(!bx.is_close_to(Vector3::new(1.1, 1.0, 1.0), 0.0));
    }

    #[test]
    fn test_axis_display() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Z.to_string(), "z");
    }
}
