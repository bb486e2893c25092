//! # Rotation models
//!
//! A rotation model gives the orientation of a body relative to its body frame. The
//! orientation is the product `spin(t) * equator_orientation(t)`: the equator places the pole,
//! the spin turns the body about it.
//!
//! Orientations follow the crate-wide convention: a quaternion `q` maps a vector expressed in
//! the parent frame to the rotated frame, `local = q * parent`.

pub mod precessing_rotation;
pub mod sampled_rotation;
pub mod uniform_rotation;

use nalgebra::{UnitQuaternion, Vector3};

use crate::constants::{Days, JulianDay, DIFF_DELTA_DAYS};

pub use precessing_rotation::PrecessingRotation;
pub use sampled_rotation::{RotationSample, SampledRotation};
pub use uniform_rotation::UniformRotation;

/// Angular velocity (rad/day, parent frame) turning `q0` into `q1` over `dt` days.
///
/// Returns zero when the two orientations are indistinguishable.
pub fn angular_velocity_between(
    q0: &UnitQuaternion<f64>,
    q1: &UnitQuaternion<f64>,
    dt: Days,
) -> Vector3<f64> {
    let dq = q1.inverse() * q0;

    // q and -q are the same rotation: take the short way round
    let (w, imag) = if dq.w < 0.0 {
        (-dq.w, -dq.imag())
    } else {
        (dq.w, dq.imag())
    };

    if w > 0.999_999_99 {
        return Vector3::zeros();
    }

    imag.normalize() * (2.0 * w.acos() / dt)
}

#[derive(Debug, Clone)]
pub enum RotationModel {
    /// Fixed orientation relative to the body frame
    Constant(UnitQuaternion<f64>),
    Uniform(UniformRotation),
    Precessing(PrecessingRotation),
    Sampled(SampledRotation),
}

impl RotationModel {
    pub fn spin(&self, t: JulianDay) -> UnitQuaternion<f64> {
        match self {
            RotationModel::Constant(q) => *q,
            RotationModel::Uniform(r) => r.spin(t),
            RotationModel::Precessing(r) => r.spin(t),
            RotationModel::Sampled(r) => r.orientation_at_time(t),
        }
    }

    /// Orientation of the equator; identity for models without one.
    pub fn equator_orientation(&self, t: JulianDay) -> UnitQuaternion<f64> {
        match self {
            RotationModel::Uniform(r) => r.equator_orientation(),
            RotationModel::Precessing(r) => r.equator_orientation(t),
            RotationModel::Constant(_) | RotationModel::Sampled(_) => UnitQuaternion::identity(),
        }
    }

    pub fn orientation_at_time(&self, t: JulianDay) -> UnitQuaternion<f64> {
        self.spin(t) * self.equator_orientation(t)
    }

    /// Angular velocity in rad/day, in the body frame.
    pub fn angular_velocity_at_time(&self, t: JulianDay) -> Vector3<f64> {
        match self {
            RotationModel::Constant(_) => Vector3::zeros(),
            RotationModel::Uniform(r) => r.angular_velocity(),
            _ => angular_velocity_between(
                &self.orientation_at_time(t),
                &self.orientation_at_time(t + DIFF_DELTA_DAYS),
                DIFF_DELTA_DAYS,
            ),
        }
    }

    pub fn is_periodic(&self) -> bool {
        matches!(
            self,
            RotationModel::Uniform(_) | RotationModel::Precessing(_)
        )
    }

    /// Rotation period in days, zero if not periodic.
    pub fn period(&self) -> Days {
        match self {
            RotationModel::Uniform(r) => r.period,
            RotationModel::Precessing(r) => r.period,
            _ => 0.0,
        }
    }

    pub fn valid_range(&self) -> Option<(JulianDay, JulianDay)> {
        match self {
            RotationModel::Sampled(r) => Some(r.valid_range()),
            _ => None,
        }
    }
}

impl Default for RotationModel {
    fn default() -> Self {
        RotationModel::Constant(UnitQuaternion::identity())
    }
}

impl From<UniformRotation> for RotationModel {
    fn from(r: UniformRotation) -> Self {
        RotationModel::Uniform(r)
    }
}

impl From<PrecessingRotation> for RotationModel {
    fn from(r: PrecessingRotation) -> Self {
        RotationModel::Precessing(r)
    }
}

impl From<SampledRotation> for RotationModel {
    fn from(r: SampledRotation) -> Self {
        RotationModel::Sampled(r)
    }
}

#[cfg(test)]
mod rotation_model_test {
    use super::*;
    use crate::constants::DPI;
    use approx::assert_relative_eq;

    #[test]
    fn test_numeric_angular_velocity_matches_uniform() {
        let uniform = UniformRotation::new(2.0, 0.1, 2_451_545.0).with_equator(0.3, 1.1);
        let precessing = RotationModel::Precessing(PrecessingRotation {
            period: 2.0,
            offset: 0.1,
            epoch: 2_451_545.0,
            inclination: 0.3,
            ascending_node: 1.1,
            precession_period: 0.0,
        });

        let analytic = RotationModel::from(uniform).angular_velocity_at_time(2_451_546.3);
        let numeric = precessing.angular_velocity_at_time(2_451_546.3);

        assert_relative_eq!(analytic.norm(), DPI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(numeric, analytic, max_relative = 1e-5);
    }

    #[test]
    fn test_identical_orientations_give_zero() {
        let q = UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3);
        assert_eq!(angular_velocity_between(&q, &q, 0.1), Vector3::zeros());
        assert_eq!(
            RotationModel::default().angular_velocity_at_time(0.0),
            Vector3::zeros()
        );
    }

    #[test]
    fn test_periodicity() {
        let uniform = RotationModel::from(UniformRotation::new(3.0, 0.0, 0.0));
        assert!(uniform.is_periodic());
        assert_eq!(uniform.period(), 3.0);

        let constant = RotationModel::default();
        assert!(!constant.is_periodic());
        assert_eq!(constant.period(), 0.0);
    }

    #[test]
    fn test_orientation_is_spin_times_equator() {
        let model = RotationModel::from(UniformRotation::new(1.5, 0.2, 0.0).with_equator(0.4, 0.9));
        let t = 3.7;
        assert_relative_eq!(
            model.orientation_at_time(t),
            model.spin(t) * model.equator_orientation(t),
            epsilon = 1e-15
        );
    }
}
