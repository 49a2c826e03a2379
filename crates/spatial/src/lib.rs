#![forbid(unsafe_code)]

pub mod kdtree;
pub mod traits;
pub mod voxel_hash_map;

pub use kdtree::KdTreeMap;
pub use traits::SpatialIndex;
pub use voxel_hash_map::{VoxelHashMap, VoxelHashMapConfig};
