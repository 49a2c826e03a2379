//! Scan-to-map registration for LiDAR odometry.
//!
//! A [`PointCloudMap`] accumulates registered scans in a pluggable
//! [`SpatialIndex`] and aligns each new scan to it with robust
//! point-to-point ICP.
//!
//! ```
//! use scanmatch::{Point, PointCloudMap, Pose, VoxelHashMap};
//!
//! let mut map = PointCloudMap::new(VoxelHashMap::default());
//! let scan: Vec<Point> = (0..200)
//!     .map(|i| {
//!         let t = i as f64 * 0.1;
//!         Point::new(t.cos() * 5.0, t.sin() * 5.0, (t * 0.3).sin())
//!     })
//!     .collect();
//!
//! // The first scan only seeds the map.
//! let pose = map.register_point_cloud(&scan, &Pose::identity(), 1.0, 0.3).unwrap();
//! assert_eq!(pose, Pose::identity());
//! map.add_points_with_pose(&scan, &pose);
//! assert!(!map.is_empty());
//! ```

#![forbid(unsafe_code)]

pub use scanmatch_core::{
    is_finite, point_from_array, point_to_array, transform_points, transform_points_in_place,
    Point, Pose,
};
pub use scanmatch_registration::{
    find_correspondences, Alignment, AlignmentSolver, Correspondences, GemanMcClure,
    PointCloudMap, RegistrationError, RegistrationSummary,
};
pub use scanmatch_spatial::{KdTreeMap, SpatialIndex, VoxelHashMap, VoxelHashMapConfig};

