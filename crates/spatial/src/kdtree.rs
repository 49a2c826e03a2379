use kiddo::float::distance::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use scanmatch_core::{is_finite, point_from_array, point_to_array, Point};

use crate::SpatialIndex;

/// An exact nearest-neighbour map backed by a KdTree.
///
/// Built on top of kiddo v5's `ImmutableKdTree`, which uses a cache-optimized
/// layout for faster queries than the mutable variant. Since the tree cannot
/// be modified, every call to [`SpatialIndex::add_points`] rebuilds it from
/// the full point set. Points are never pruned and the sensor origin is
/// ignored, so this map suits bounded scenes and tests more than long runs.
///
/// The tree stores `u32` indices into the owned point buffer.
#[derive(Debug, Clone)]
pub struct KdTreeMap {
    points: Vec<[f64; 3]>,
    tree: ImmutableKdTree<f64, u32, 3, 32>,
}

impl KdTreeMap {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            tree: ImmutableKdTree::new_from_slice(&[]),
        }
    }

    /// Build a map holding `points`.
    pub fn build(points: &[Point]) -> Self {
        let mut map = Self::new();
        map.add_points(points, &Point::zeros());
        map
    }

    /// Returns the number of points in the tree.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    fn rebuild(&mut self) {
        self.tree = ImmutableKdTree::new_from_slice(&self.points);
    }
}

impl Default for KdTreeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex for KdTreeMap {
    fn clear(&mut self) {
        self.points.clear();
        self.rebuild();
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn pointcloud(&self) -> Vec<Point> {
        self.points.iter().copied().map(point_from_array).collect()
    }

    fn add_points(&mut self, points: &[Point], _origin: &Point) {
        if points.is_empty() {
            return;
        }
        self.points.reserve(points.len());
        self.points.extend(points.iter().map(point_to_array));
        self.rebuild();
    }

    /// Exact nearest neighbour. Returns `None` on an empty map or when the
    /// query contains NaN or infinite coordinates.
    fn closest_neighbor(&self, query: &Point) -> Option<Point> {
        if self.points.is_empty() || !is_finite(query) {
            return None;
        }
        let nn = self
            .tree
            .nearest_one::<SquaredEuclidean>(&point_to_array(query));
        self.points
            .get(nn.item as usize)
            .copied()
            .map(point_from_array)
    }
}
