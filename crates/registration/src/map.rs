use scanmatch_core::{transform_points, transform_points_in_place, Point, Pose};
use scanmatch_spatial::SpatialIndex;
use tracing::{debug, instrument, trace, warn};

use crate::correspondence::{find_correspondences, Correspondences};
use crate::solver::{Alignment, AlignmentSolver, GemanMcClure};
use crate::RegistrationError;

// Algorithm-internal tuning, intentionally not exposed to callers.
const MAX_NUM_ITERATIONS: usize = 500;
const ESTIMATION_THRESHOLD: f64 = 1e-4;

/// How a registration run went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// Number of ICP iterations performed.
    pub iterations: usize,
    /// True if the last update fell below the convergence threshold.
    pub converged: bool,
    /// Correspondences used by the last iteration.
    pub correspondences: usize,
}

/// An accumulated point cloud map that registers incoming scans against
/// itself.
///
/// Storage and nearest-neighbour queries are delegated to the spatial index
/// `I`; each ICP step is delegated to the solver `S`. The map must not be
/// mutated while a query or registration on it is running, which the borrow
/// checker enforces for a single owner.
#[derive(Debug, Clone)]
pub struct PointCloudMap<I, S = GemanMcClure> {
    index: I,
    solver: S,
}

impl<I: SpatialIndex> PointCloudMap<I> {
    /// Wrap `index`, aligning with the [`GemanMcClure`] solver.
    pub fn new(index: I) -> Self {
        Self::with_solver(index, GemanMcClure)
    }
}

impl<I, S> PointCloudMap<I, S>
where
    I: SpatialIndex,
    S: AlignmentSolver,
{
    pub fn with_solver(index: I, solver: S) -> Self {
        Self { index, solver }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Snapshot of the stored points, in no particular order.
    pub fn pointcloud(&self) -> Vec<Point> {
        self.index.pointcloud()
    }

    /// Ingest points already expressed in the map frame, recorded as seen
    /// from the sensor position `origin`.
    pub fn add_points(&mut self, points: &[Point], origin: &Point) {
        self.index.add_points(points, origin);
    }

    /// Ingest points expressed in the sensor frame, placing them with `pose`.
    /// The sensor origin is the translation of `pose`.
    pub fn add_points_with_pose(&mut self, points: &[Point], pose: &Pose) {
        let points_t = transform_points(pose, points);
        self.index.add_points(&points_t, &pose.translation);
    }

    /// Pair each of `points` with its nearest map point, keeping pairs closer
    /// than `max_distance`. See [`find_correspondences`].
    pub fn get_correspondences(&self, points: &[Point], max_distance: f64) -> Correspondences {
        find_correspondences(&self.index, points, max_distance)
    }

    /// Estimate the pose aligning `points` (sensor frame) to the map, starting
    /// from `initial_guess`.
    ///
    /// Returns `initial_guess` unchanged when the map is empty. Stops after
    /// the update norm drops below the convergence threshold or after the
    /// iteration cap; hitting the cap is not an error. Solver failures, such
    /// as a degenerate correspondence set, are returned as is.
    pub fn register_point_cloud(
        &self,
        points: &[Point],
        initial_guess: &Pose,
        max_correspondence_distance: f64,
        kernel_scale: f64,
    ) -> Result<Pose, RegistrationError> {
        self.register_point_cloud_with_stats(
            points,
            initial_guess,
            max_correspondence_distance,
            kernel_scale,
        )
        .map(|(pose, _)| pose)
    }

    /// Same as [`register_point_cloud`](Self::register_point_cloud), also
    /// reporting iteration count and convergence.
    #[instrument(level = "debug", skip(self, points, initial_guess), fields(num_points = points.len()))]
    pub fn register_point_cloud_with_stats(
        &self,
        points: &[Point],
        initial_guess: &Pose,
        max_correspondence_distance: f64,
        kernel_scale: f64,
    ) -> Result<(Pose, RegistrationSummary), RegistrationError> {
        let mut summary = RegistrationSummary::default();
        if self.index.is_empty() {
            debug!("map is empty, keeping initial guess");
            return Ok((*initial_guess, summary));
        }

        let mut source = transform_points(initial_guess, points);

        let mut t_icp = Pose::identity();
        for iteration in 0..MAX_NUM_ITERATIONS {
            let correspondences = self.get_correspondences(&source, max_correspondence_distance);
            summary.correspondences = correspondences.len();

            let Alignment { update, estimate } =
                self.solver.align(&correspondences, kernel_scale)?;

            transform_points_in_place(&estimate, &mut source);
            t_icp = estimate * t_icp;
            summary.iterations = iteration + 1;

            let update_norm = update.norm();
            trace!(
                iteration,
                correspondences = summary.correspondences,
                update_norm,
                "icp step"
            );
            if update_norm < ESTIMATION_THRESHOLD {
                summary.converged = true;
                debug!(iterations = summary.iterations, update_norm, "registration converged");
                break;
            }
        }

        if !summary.converged {
            warn!(
                iterations = summary.iterations,
                "registration hit the iteration cap without converging"
            );
        }

        Ok((t_icp * *initial_guess, summary))
    }
}
