//! Spatial indexing over point data
//!
//! The centerpiece is [`Octree`], a fixed-depth index that answers
//! radius and nearest-record queries over positions in a bounded
//! region. [`Aabb`] is the box primitive it prunes with.

mod bounds;
mod octree;

pub use bounds::{Aabb, Axis};
pub use octree::{Octree, OctreeEntry, OctreeError, DEFAULT_DEPTH};
