use nalgebra::{Matrix3, Matrix3x6, Matrix6, Vector6};
use rayon::prelude::*;
use scanmatch_core::Pose;

use crate::{Correspondences, RegistrationError};

/// Smallest eigenvalue of the normal matrix relative to its largest below
/// which the system is treated as rank deficient.
const DEGENERACY_RATIO: f64 = 1e-12;

/// Result of one alignment step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// 6-DoF parameter update `[tx, ty, tz, rx, ry, rz]`.
    pub update: Vector6<f64>,
    /// The rigid transform the update stands for.
    pub estimate: Pose,
}

/// Computes an incremental rigid transform from matched point pairs.
///
/// `kernel_scale` controls how strongly large residuals are down-weighted.
pub trait AlignmentSolver {
    fn align(
        &self,
        correspondences: &Correspondences,
        kernel_scale: f64,
    ) -> Result<Alignment, RegistrationError>;
}

/// One Gauss-Newton step of robust point-to-point ICP with a Geman-McClure
/// kernel.
///
/// Each pair contributes the residual `r = s - t` with Jacobian
/// `J = [I | -[s]x]` and weight `k^2 / (k + |r|^2)^2`. The weighted normal
/// equations `J^T W J x = -J^T W r` are solved by Cholesky and the update is
/// mapped to a pose through the SE(3) exponential. Fewer than three
/// non-collinear pairs leave the system rank deficient and are reported as
/// [`RegistrationError::DegenerateSystem`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GemanMcClure;

impl AlignmentSolver for GemanMcClure {
    fn align(
        &self,
        correspondences: &Correspondences,
        kernel_scale: f64,
    ) -> Result<Alignment, RegistrationError> {
        if !(kernel_scale.is_finite() && kernel_scale > 0.0) {
            return Err(RegistrationError::InvalidKernelScale(kernel_scale));
        }
        if correspondences.source.len() != correspondences.target.len() {
            return Err(RegistrationError::CorrespondenceMismatch {
                sources: correspondences.source.len(),
                targets: correspondences.target.len(),
            });
        }

        let degenerate = RegistrationError::DegenerateSystem {
            correspondences: correspondences.len(),
        };
        if correspondences.is_empty() {
            return Err(degenerate);
        }

        let (jtj, jtr) = build_linear_system(correspondences, kernel_scale);
        let eigenvalues = jtj.symmetric_eigenvalues();
        if !(eigenvalues.min() > eigenvalues.max() * DEGENERACY_RATIO) {
            return Err(degenerate);
        }
        let update = jtj
            .cholesky()
            .map(|chol| chol.solve(&(-jtr)))
            .ok_or_else(|| degenerate.clone())?;
        if !update.iter().all(|v| v.is_finite()) {
            return Err(degenerate);
        }

        Ok(Alignment {
            update,
            estimate: Pose::exp(&update),
        })
    }
}

fn build_linear_system(
    correspondences: &Correspondences,
    kernel_scale: f64,
) -> (Matrix6<f64>, Vector6<f64>) {
    let kernel_sq = kernel_scale * kernel_scale;
    let zero = || (Matrix6::<f64>::zeros(), Vector6::<f64>::zeros());

    correspondences
        .source
        .par_iter()
        .zip(correspondences.target.par_iter())
        .fold(zero, |(mut jtj, mut jtr), (s, t)| {
            let residual = s - t;

            let mut j_r = Matrix3x6::<f64>::zeros();
            j_r.fixed_view_mut::<3, 3>(0, 0)
                .copy_from(&Matrix3::identity());
            j_r.fixed_view_mut::<3, 3>(0, 3)
                .copy_from(&(-s.cross_matrix()));

            let denom = kernel_scale + residual.norm_squared();
            let weight = kernel_sq / (denom * denom);

            let j_t = j_r.transpose();
            jtj += j_t * j_r * weight;
            jtr += j_t * residual * weight;
            (jtj, jtr)
        })
        .reduce(zero, |(jtj_a, jtr_a), (jtj_b, jtr_b)| {
            (jtj_a + jtj_b, jtr_a + jtr_b)
        })
}
