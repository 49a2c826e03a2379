use std::ops::Mul;

use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector3, Vector6};

use crate::Point;

/// A rigid-body transform: rotation followed by translation.
///
/// The rotation is expected to be orthonormal with determinant +1. Nothing
/// here re-orthonormalizes it; floating-point drift from long composition
/// chains is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Pose {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation,
        }
    }

    /// Rotation of `angle` radians about `axis` (need not be unit length),
    /// followed by `translation`.
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64, translation: Vector3<f64>) -> Self {
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle);
        Self {
            rotation: rotation.into_inner(),
            translation,
        }
    }

    /// Build a pose from a homogeneous 4x4 matrix. The bottom row is ignored.
    pub fn from_homogeneous(m: &Matrix4<f64>) -> Self {
        Self {
            rotation: m.fixed_view::<3, 3>(0, 0).into_owned(),
            translation: m.fixed_view::<3, 1>(0, 3).into_owned(),
        }
    }

    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        m
    }

    pub fn is_identity(&self, eps: f64) -> bool {
        let r_ok = (self.rotation - Matrix3::identity())
            .iter()
            .all(|v| v.abs() <= eps);
        r_ok && self.translation.iter().all(|v| v.abs() <= eps)
    }

    /// Apply the rigid transform to a single point: R * p + t
    pub fn apply_to_point(&self, p: &Point) -> Point {
        self.rotation * p + self.translation
    }

    /// Compose two transforms: apply `self` first, then `other`.
    ///
    /// Result: R_new = other.R * self.R, t_new = other.R * self.t + other.t
    pub fn compose(&self, other: &Pose) -> Pose {
        Pose {
            rotation: other.rotation * self.rotation,
            translation: other.rotation * self.translation + other.translation,
        }
    }

    pub fn inverse(&self) -> Pose {
        let r_t = self.rotation.transpose();
        Pose {
            rotation: r_t,
            translation: -(r_t * self.translation),
        }
    }

    /// Angle of the rotation component in radians, in `[0, pi]`.
    pub fn rotation_angle(&self) -> f64 {
        let cos = ((self.rotation.trace() - 1.0) * 0.5).clamp(-1.0, 1.0);
        cos.acos()
    }

    /// SE(3) exponential map.
    ///
    /// `xi = [rho, omega]`: the first three components are the translational
    /// part, the last three the rotation vector (axis * angle).
    pub fn exp(xi: &Vector6<f64>) -> Pose {
        let rho = xi.fixed_rows::<3>(0).into_owned();
        let omega = xi.fixed_rows::<3>(3).into_owned();

        let theta = omega.norm();
        let k = omega.cross_matrix();
        let k2 = k * k;

        let v = if theta < 1e-10 {
            Matrix3::identity() + k * 0.5 + k2 * (1.0 / 6.0)
        } else {
            let theta2 = theta * theta;
            Matrix3::identity()
                + k * ((1.0 - theta.cos()) / theta2)
                + k2 * ((theta - theta.sin()) / (theta2 * theta))
        };

        Pose {
            rotation: Rotation3::new(omega).into_inner(),
            translation: v * rho,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix-order product: `(a * b).apply_to_point(p) == a.apply_to_point(&b.apply_to_point(p))`.
impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        rhs.compose(&self)
    }
}

impl Mul<&Pose> for &Pose {
    type Output = Pose;

    fn mul(self, rhs: &Pose) -> Pose {
        rhs.compose(self)
    }
}
