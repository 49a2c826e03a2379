#![forbid(unsafe_code)]

pub mod correspondence;
pub mod error;
pub mod map;
pub mod solver;

pub use correspondence::{find_correspondences, Correspondences};
pub use error::RegistrationError;
pub use map::{PointCloudMap, RegistrationSummary};
pub use solver::{Alignment, AlignmentSolver, GemanMcClure};
