//! Fixed-depth octree spatial index
//!
//! The tree is subdivided eagerly on construction: every interior node
//! always has 8 children down to the configured depth, whether or not
//! anything is stored there. Each inserted record is listed at every
//! node on its root-to-leaf path, so an empty subtree is recognized in
//! O(1) and skipped during queries. Only leaf contents are ever matched
//! against a query; the interior lists exist purely for pruning.

use crate::math::Vector3;
use crate::spatial::bounds::{Aabb, Axis};

/// Number of levels below the root when none is specified
pub const DEFAULT_DEPTH: u32 = 3;

/// Errors reported when building an octree
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum OctreeError {
    /// A boundary corner had a NaN or infinite component
    #[error("octree boundary has non-finite {axis} component: {value}")]
    InvalidBoundary {
        /// Axis of the offending component
        axis: Axis,
        /// The rejected value
        value: f64,
    },
}

/// A stored record: the caller's value plus the position it was indexed at
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OctreeEntry<T> {
    /// The caller's payload
    pub value: T,
    /// Position the payload was inserted at
    pub position: Vector3,
}

/// Single node of the tree. Contents are indices into the owning
/// octree's entry arena.
#[derive(Debug, Clone)]
struct Octant {
    bounds: Aabb,
    /// Levels remaining below this node; 0 marks a leaf
    level: u32,
    contents: Vec<u32>,
    children: Option<Box<[Octant; 8]>>,
}

impl Octant {
    /// Build a node and, unless `level` is 0, its full subtree
    fn new(bounds: Aabb, level: u32) -> Self {
        let children = if level > 0 {
            let center = bounds.center();
            // Child order is fixed: x picks first, then y, then z. Each
            // child spans one corner-derived point to the center.
            Some(Box::new(std::array::from_fn(|index| {
                let i = index >> 2 & 1;
                let j = index >> 1 & 1;
                let k = index & 1;
                let corner = Vector3::new(
                    if i == 1 { bounds.corner_a.x } else { bounds.corner_b.x },
                    if j == 1 { bounds.corner_a.y } else { bounds.corner_b.y },
                    if k == 1 { bounds.corner_a.z } else { bounds.corner_b.z },
                );
                Octant::new(Aabb::new(corner, center), level - 1)
            })))
        } else {
            None
        };

        Self {
            bounds,
            level,
            contents: Vec::new(),
            children,
        }
    }

    /// Record `index` at this node and below. Returns false without
    /// touching anything when the position is outside this node's box.
    fn insert(&mut self, index: u32, position: Vector3) -> bool {
        if !self.bounds.contains(position) {
            return false;
        }
        self.contents.push(index);
        if let Some(children) = self.children.as_mut() {
            // A position on a shared face fits several children; the
            // first accepting child in creation order takes it.
            for child in children.iter_mut() {
                if child.insert(index, position) {
                    break;
                }
            }
        }
        true
    }

    /// Gather every leaf record within `range` of `pos` into `found`
    fn collect_range<T, F>(
        &self,
        entries: &[OctreeEntry<T>],
        pos: Vector3,
        range: f64,
        found: &mut Vec<u32>,
        filter: &F,
    ) where
        F: Fn(&T) -> bool,
    {
        if self.contents.is_empty() {
            return;
        }
        if !self.bounds.is_close_to(pos, range) {
            return;
        }
        match self.children.as_ref() {
            None => {
                for &index in &self.contents {
                    let entry = &entries[index as usize];
                    if filter(&entry.value) && entry.position.distance_to(pos) <= range {
                        found.push(index);
                    }
                }
            }
            Some(children) => {
                for child in children.iter() {
                    child.collect_range(entries, pos, range, found, filter);
                }
            }
        }
    }

    /// Walk the tree keeping the closest record seen so far.
    ///
    /// Until a candidate exists, only nodes containing `pos` are
    /// entered; afterwards the box expanded by the best distance is
    /// enough. Ties keep the earlier record since later ones must be
    /// strictly closer to replace it.
    fn collect_nearest<T, F>(
        &self,
        entries: &[OctreeEntry<T>],
        pos: Vector3,
        best: &mut Option<(u32, f64)>,
        filter: &F,
    ) where
        F: Fn(&T) -> bool,
    {
        if self.contents.is_empty() {
            return;
        }
        match best {
            Some((_, distance)) => {
                if !self.bounds.is_close_to(pos, *distance) {
                    return;
                }
            }
            None => {
                if !self.bounds.contains(pos) {
                    return;
                }
            }
        }
        match self.children.as_ref() {
            None => {
                for &index in &self.contents {
                    let entry = &entries[index as usize];
                    if !filter(&entry.value) {
                        continue;
                    }
                    match best {
                        Some((best_index, best_distance)) => {
                            let distance = entry.position.distance_to(pos);
                            if distance < *best_distance {
                                *best_index = index;
                                *best_distance = distance;
                            }
                        }
                        None => {
                            *best = Some((index, entry.position.distance_to(pos)));
                        }
                    }
                }
            }
            Some(children) => {
                for child in children.iter() {
                    child.collect_nearest(entries, pos, best, filter);
                }
            }
        }
    }

    /// Total node count of this subtree, including self
    fn node_count(&self) -> usize {
        match self.children.as_ref() {
            None => 1,
            Some(children) => 1 + children.iter().map(Octant::node_count).sum::<usize>(),
        }
    }

    /// Leaf count of this subtree
    fn leaf_count(&self) -> usize {
        match self.children.as_ref() {
            None => 1,
            Some(children) => children.iter().map(Octant::leaf_count).sum(),
        }
    }
}

/// Point index over a fixed region of space.
///
/// Records are stored at the position given on insert and never move.
/// Range queries return everything within a radius; nearest queries
/// return the single closest record. A nearest query placed outside
/// the root box finds nothing, because the initial descent only enters
/// nodes that contain the query position.
#[derive(Debug, Clone)]
pub struct Octree<T> {
    root: Octant,
    entries: Vec<OctreeEntry<T>>,
}

impl<T> Octree<T> {
    /// Create a tree over the box spanned by two opposite corners,
    /// subdivided to [`DEFAULT_DEPTH`]
    pub fn new(corner_a: Vector3, corner_b: Vector3) -> Result<Self, OctreeError> {
        Self::with_depth(corner_a, corner_b, DEFAULT_DEPTH)
    }

    /// Create a tree subdivided `depth` levels below the root. A depth
    /// of 0 makes the root the only (leaf) node.
    pub fn with_depth(
        corner_a: Vector3,
        corner_b: Vector3,
        depth: u32,
    ) -> Result<Self, OctreeError> {
        for corner in [corner_a, corner_b] {
            for (axis, value) in [
                (Axis::X, corner.x),
                (Axis::Y, corner.y),
                (Axis::Z, corner.z),
            ] {
                if !value.is_finite() {
                    return Err(OctreeError::InvalidBoundary { axis, value });
                }
            }
        }

        Ok(Self {
            root: Octant::new(Aabb::new(corner_a, corner_b), depth),
            entries: Vec::new(),
        })
    }

    /// Store `value` at `position`. Returns false, storing nothing,
    /// when the position falls outside the root box.
    pub fn insert(&mut self, value: T, position: Vector3) -> bool {
        if !self.root.bounds.contains(position) {
            return false;
        }
        let index = self.entries.len() as u32;
        self.entries.push(OctreeEntry { value, position });
        self.root.insert(index, position)
    }

    /// All records within `range` of `pos`
    pub fn query_range(&self, pos: Vector3, range: f64) -> Vec<&OctreeEntry<T>> {
        self.query_range_filtered(pos, range, |_| true)
    }

    /// Records within `range` of `pos` whose value passes `filter`
    pub fn query_range_filtered<F>(
        &self,
        pos: Vector3,
        range: f64,
        filter: F,
    ) -> Vec<&OctreeEntry<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut found = Vec::new();
        self.root
            .collect_range(&self.entries, pos, range, &mut found, &filter);
        found
            .into_iter()
            .map(|index| &self.entries[index as usize])
            .collect()
    }

    /// The record closest to `pos`, if the descent reaches one
    pub fn query_nearest(&self, pos: Vector3) -> Option<&OctreeEntry<T>> {
        self.query_nearest_filtered(pos, |_| true)
    }

    /// The closest record whose value passes `filter`
    pub fn query_nearest_filtered<F>(&self, pos: Vector3, filter: F) -> Option<&OctreeEntry<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut best = None;
        self.root
            .collect_nearest(&self.entries, pos, &mut best, &filter);
        best.map(|(index, _)| &self.entries[index as usize])
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The root box
    pub fn bounds(&self) -> Aabb {
        self.root.bounds
    }

    /// Levels below the root
    pub fn depth(&self) -> u32 {
        self.root.level
    }

    /// All stored records in insertion order
    pub fn entries(&self) -> &[OctreeEntry<T>] {
        &self.entries
    }

    /// Total node count of the tree
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn symmetric_tree<T>(half_extent: f64, depth: u32) -> Octree<T> {
        Octree::with_depth(
            Vector3::new(-half_extent, -half_extent, -half_extent),
            Vector3::new(half_extent, half_extent, half_extent),
            depth,
        )
        .unwrap()
    }

    #[test]
    fn test_non_finite_boundary_is_rejected() {
        let err = Octree::<u32>::new(
            Vector3::new(0.0, f64::NAN, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(err, OctreeError::InvalidBoundary { axis: Axis::Y, .. }));

        let err = Octree::<u32>::new(
            Vector3::ZERO,
            Vector3::new(1.0, 1.0, f64::INFINITY),
        )
        .unwrap_err();
        assert!(matches!(err, OctreeError::InvalidBoundary { axis: Axis::Z, .. }));
    }

    #[test]
    fn test_eager_subdivision_counts() {
        for depth in 0..4 {
            let tree = symmetric_tree::<()>(10.0, depth);
            let leaves = 8usize.pow(depth);
            assert_eq!(tree.leaf_count(), leaves);
            assert_eq!(tree.node_count(), (8usize.pow(depth + 1) - 1) / 7);
        }
    }

    #[test]
    fn test_range_and_nearest_example() {
        let mut tree = symmetric_tree(10.0, 2);
        assert!(tree.insert("a", Vector3::new(1.0, 1.0, 1.0)));
        assert!(tree.insert("b", Vector3::new(-5.0, -5.0, -5.0)));

        let hits = tree.query_range(Vector3::ZERO, 3.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "a");

        let nearest = tree.query_nearest(Vector3::ZERO).unwrap();
        assert_eq!(nearest.value, "a");
        assert_relative_eq!(nearest.position.distance_to(Vector3::ZERO), 3.0_f64.sqrt());
    }

    #[test]
    fn test_nearest_from_outside_the_root_finds_nothing() {
        let mut tree = symmetric_tree(10.0, 2);
        tree.insert("a", Vector3::new(1.0, 1.0, 1.0));
        // the descent requires containment until a candidate exists
        assert!(tree.query_nearest(Vector3::new(50.0, 50.0, 50.0)).is_none());
    }

    #[test]
    fn test_insert_outside_root_leaves_tree_unchanged() {
        let mut tree = symmetric_tree(10.0, 2);
        assert!(!tree.insert("out", Vector3::new(20.0, 0.0, 0.0)));
        assert!(tree.is_empty());
        assert_eq!(tree.entries().len(), 0);
        assert!(tree.query_range(Vector3::ZERO, 100.0).is_empty());
    }

    #[test]
    fn test_zero_radius_range_query_finds_the_point_itself() {
        let mut tree = symmetric_tree(10.0, 3);
        let p = Vector3::new(2.5, -7.0, 0.25);
        assert!(tree.insert("here", p));
        let hits = tree.query_range(p, 0.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "here");
    }

    #[test]
    fn test_range_query_is_inclusive_at_the_radius() {
        let mut tree = symmetric_tree(10.0, 3);
        tree.insert("edge", Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(tree.query_range(Vector3::ZERO, 2.0).len(), 1);
        assert!(tree.query_range(Vector3::ZERO, 1.999).is_empty());
    }

    #[test]
    fn test_nearest_tie_keeps_the_earlier_record() {
        let mut tree = symmetric_tree(10.0, 1);
        // both land in the same leaf and sit at distance 1 from the query
        tree.insert("first", Vector3::new(3.0, 2.0, 2.0));
        tree.insert("second", Vector3::new(5.0, 2.0, 2.0));
        let nearest = tree.query_nearest(Vector3::new(4.0, 2.0, 2.0)).unwrap();
        assert_eq!(nearest.value, "first");
    }

    #[test]
    fn test_filtered_queries_skip_rejected_values() {
        let mut tree = symmetric_tree(10.0, 2);
        tree.insert(1, Vector3::new(1.0, 0.0, 0.0));
        tree.insert(2, Vector3::new(2.0, 0.0, 0.0));
        tree.insert(3, Vector3::new(3.0, 0.0, 0.0));

        let odd = tree.query_range_filtered(Vector3::ZERO, 10.0, |v| v % 2 == 1);
        assert_eq!(odd.len(), 2);

        let nearest = tree
            .query_nearest_filtered(Vector3::ZERO, |v| *v != 1)
            .unwrap();
        assert_eq!(nearest.value, 2);
    }

    #[test]
    fn test_range_results_match_brute_force_at_every_depth() {
        let mut rng = StdRng::seed_from_u64(7);
        let points: Vec<Vector3> = (0..200)
            .map(|_| {
                Vector3::new(
                    rng.random_range(-10.0..=10.0),
                    rng.random_range(-10.0..=10.0),
                    rng.random_range(-10.0..=10.0),
                )
            })
            .collect();

        let queries = [
            (Vector3::ZERO, 4.0),
            (Vector3::new(6.0, -3.0, 1.0), 2.5),
            (Vector3::new(-9.0, -9.0, -9.0), 8.0),
        ];

        for depth in 0..4 {
            let mut tree = symmetric_tree(10.0, depth);
            for (id, &p) in points.iter().enumerate() {
                assert!(tree.insert(id, p));
            }
            for &(pos, range) in &queries {
                let mut got: Vec<usize> =
                    tree.query_range(pos, range).iter().map(|e| e.value).collect();
                got.sort_unstable();
                let expected: Vec<usize> = points
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.distance_to(pos) <= range)
                    .map(|(id, _)| id)
                    .collect();
                assert_eq!(got, expected, "depth {depth} range query diverged");
            }
        }
    }

    #[test]
    fn test_nearest_reaches_closer_records_in_later_octants() {
        // child 0 covers the all-positive octant and is visited first;
        // once it yields a candidate, the all-negative octant (visited
        // last) is still entered via the expanded-box check
        let mut tree = symmetric_tree(10.0, 1);
        tree.insert("far", Vector3::new(9.0, 9.0, 9.0));
        tree.insert("near", Vector3::new(-0.5, -0.5, -0.5));
        let nearest = tree.query_nearest(Vector3::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(nearest.value, "near");
    }

    #[test]
    fn test_nearest_does_not_revisit_earlier_octants() {
        // siblings visited before the first candidate exists are only
        // entered when they contain the query position, so a closer
        // record in an already-passed octant stays unseen
        let mut tree = symmetric_tree(10.0, 1);
        tree.insert("missed", Vector3::new(0.5, 0.5, 0.5));
        tree.insert("found", Vector3::new(-9.0, -9.0, -9.0));
        let pos = Vector3::new(-1.0, -1.0, -1.0);
        let nearest = tree.query_nearest(pos).unwrap();
        assert_eq!(nearest.value, "found");
    }

    #[test]
    fn test_contents_are_duplicated_along_the_path() {
        let mut tree = symmetric_tree(8.0, 2);
        tree.insert("a", Vector3::new(1.0, 1.0, 1.0));
        // the record appears at the root and at one node per level below
        assert_eq!(tree.root.contents.len(), 1);
        let mut node = &tree.root;
        let mut levels = 0;
        while let Some(children) = node.children.as_ref() {
            let holders: Vec<&Octant> = children
                .iter()
                .filter(|c| !c.contents.is_empty())
                .collect();
            assert_eq!(holders.len(), 1);
            node = holders[0];
            levels += 1;
        }
        assert_eq!(levels, 2);
    }
}
