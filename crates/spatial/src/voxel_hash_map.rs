use hashbrown::HashMap;
use scanmatch_core::{is_finite, Point};
use tracing::trace;

use crate::SpatialIndex;

type VoxelKey = (i32, i32, i32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelHashMapConfig {
    /// Edge length of a voxel, in map units.
    pub voxel_size: f64,
    /// Voxels whose first point is farther than this from the latest
    /// ingestion origin are dropped.
    pub max_distance: f64,
    /// Points beyond this count are not added to a voxel.
    pub max_points_per_voxel: usize,
}

impl Default for VoxelHashMapConfig {
    fn default() -> Self {
        Self {
            voxel_size: 1.0,
            max_distance: 100.0,
            max_points_per_voxel: 20,
        }
    }
}

/// Sparse voxel grid keeping a bounded number of points per voxel.
///
/// Nearest-neighbour queries only look at the 3x3x3 block of voxels around
/// the query, so a neighbour farther than one voxel away may be missed. That
/// is fine for registration, where correspondences are capped well below the
/// voxel size anyway.
#[derive(Debug, Clone)]
pub struct VoxelHashMap {
    config: VoxelHashMapConfig,
    voxels: HashMap<VoxelKey, Vec<Point>>,
}

impl VoxelHashMap {
    pub fn new(config: VoxelHashMapConfig) -> Self {
        assert!(
            config.voxel_size.is_finite() && config.voxel_size > 0.0,
            "voxel_size must be > 0 and finite"
        );
        Self {
            config,
            voxels: HashMap::new(),
        }
    }

    pub fn config(&self) -> &VoxelHashMapConfig {
        &self.config
    }

    /// Number of occupied voxels.
    pub fn num_voxels(&self) -> usize {
        self.voxels.len()
    }

    /// Total number of stored points.
    pub fn len(&self) -> usize {
        self.voxels.values().map(Vec::len).sum()
    }

    fn voxel_key(&self, p: &Point) -> VoxelKey {
        let s = self.config.voxel_size;
        (
            (p.x / s).floor() as i32,
            (p.y / s).floor() as i32,
            (p.z / s).floor() as i32,
        )
    }

    fn remove_points_far_from(&mut self, origin: &Point) {
        let max_distance_sq = self.config.max_distance * self.config.max_distance;
        let before = self.voxels.len();
        self.voxels.retain(|_, points| {
            points
                .first()
                .is_some_and(|p| (p - origin).norm_squared() <= max_distance_sq)
        });
        let removed = before - self.voxels.len();
        if removed > 0 {
            trace!(removed, remaining = self.voxels.len(), "pruned distant voxels");
        }
    }
}

impl Default for VoxelHashMap {
    fn default() -> Self {
        Self::new(VoxelHashMapConfig::default())
    }
}

impl SpatialIndex for VoxelHashMap {
    fn clear(&mut self) {
        self.voxels.clear();
    }

    fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    fn pointcloud(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.len());
        for points in self.voxels.values() {
            out.extend_from_slice(points);
        }
        out
    }

    fn add_points(&mut self, points: &[Point], origin: &Point) {
        let max_points = self.config.max_points_per_voxel;
        for p in points {
            let key = self.voxel_key(p);
            let voxel = self.voxels.entry(key).or_default();
            if voxel.len() < max_points {
                voxel.push(*p);
            }
        }
        self.remove_points_far_from(origin);
    }

    fn closest_neighbor(&self, query: &Point) -> Option<Point> {
        if !is_finite(query) {
            return None;
        }
        let (kx, ky, kz) = self.voxel_key(query);

        let mut closest = None;
        let mut closest_dist_sq = f64::INFINITY;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(points) = self.voxels.get(&(
                        kx.saturating_add(dx),
                        ky.saturating_add(dy),
                        kz.saturating_add(dz),
                    )) else {
                        continue;
                    };
                    for p in points {
                        let d = (p - query).norm_squared();
                        if d < closest_dist_sq {
                            closest_dist_sq = d;
                            closest = Some(*p);
                        }
                    }
                }
            }
        }
        closest
    }
}
