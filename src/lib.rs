//! # geomath
//!
//! A small 3D math library with an eagerly-subdivided octree spatial
//! index.
//!
//! ## Features
//!
//! - **Vectors, matrices, rotations**: [`Vector2`](math::Vector2),
//!   [`Vector3`](math::Vector3), [`Matrix3`](math::Matrix3),
//!   [`Matrix4`](math::Matrix4), [`Quaternion`](math::Quaternion) and
//!   [`Euler`](math::Euler) angles with conversions between them
//! - **Color**: RGBA [`Color`](math::Color) with hex and CSS keyword
//!   support and alpha-weighted blending
//! - **Spatial index**: a fixed-depth [`Octree`](spatial::Octree) for
//!   radius and nearest-record point queries
//! - **Scalar helpers**: interpolation curves, seeded randomness and
//!   small linear solvers in [`math::utils`]
//!
//! ## Quick Start
//!
//! ```rust
//! use geomath::prelude::*;
//!
//! fn main() -> Result<(), OctreeError> {
//!     let mut tree = Octree::new(
//!         Vector3::new(-10.0, -10.0, -10.0),
//!         Vector3::new(10.0, 10.0, 10.0),
//!     )?;
//!
//!     tree.insert("a", Vector3::new(1.0, 1.0, 1.0));
//!     tree.insert("b", Vector3::new(-5.0, -5.0, -5.0));
//!
//!     let hits = tree.query_range(Vector3::ZERO, 3.0);
//!     assert_eq!(hits.len(), 1);
//!     assert_eq!(hits[0].value, "a");
//!
//!     let nearest = tree.query_nearest(Vector3::ZERO);
//!     assert_eq!(nearest.map(|e| e.value), Some("a"));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod math;
pub mod spatial;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        math::{
            Color, Euler, MathError, Matrix3, Matrix4, Quaternion, RotationOrder, Vector2,
            Vector3,
        },
        spatial::{Aabb, Octree, OctreeEntry, OctreeError},
    };
}
