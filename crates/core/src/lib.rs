#![forbid(unsafe_code)]

pub mod point;
pub mod pose;
pub mod transform;

pub use point::{is_finite, point_from_array, point_to_array, Point};
pub use pose::Pose;
pub use transform::{transform_points, transform_points_in_place};
