use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{Days, JulianDay, Radian, DPI};

/// Rotation at a constant rate about a fixed axis.
///
/// Units:
/// * `period`: days per sidereal rotation
/// * `offset`: rotation angle at `epoch`, radians
/// * `inclination`, `ascending_node`: orientation of the equator relative to the parent
///   frame, radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRotation {
    pub period: Days,
    pub offset: Radian,
    pub epoch: JulianDay,
    pub inclination: Radian,
    pub ascending_node: Radian,
}

/// Rotation about the internal `y` (pole) axis after `elapsed` days of a `period`-day spin.
///
/// Half a turn is added: longitude zero of a body map sits in the middle of the texture.
pub(crate) fn spin_about_pole(elapsed: Days, period: Days, offset: Radian) -> UnitQuaternion<f64> {
    let rotations = elapsed / period;
    let remainder = rotations - rotations.floor() + 0.5;
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -remainder * DPI - offset)
}

/// Tilt of an equator with the given inclination and node longitude.
pub(crate) fn equator_tilt(inclination: Radian, node: Radian) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -inclination)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -node)
}

impl UniformRotation {
    pub fn new(period: Days, offset: Radian, epoch: JulianDay) -> Self {
        UniformRotation {
            period,
            offset,
            epoch,
            inclination: 0.0,
            ascending_node: 0.0,
        }
    }

    pub fn with_equator(mut self, inclination: Radian, ascending_node: Radian) -> Self {
        self.inclination = inclination;
        self.ascending_node = ascending_node;
        self
    }

    pub fn spin(&self, t: JulianDay) -> UnitQuaternion<f64> {
        spin_about_pole(t - self.epoch, self.period, self.offset)
    }

    pub fn equator_orientation(&self) -> UnitQuaternion<f64> {
        equator_tilt(self.inclination, self.ascending_node)
    }

    /// Angular velocity in rad/day, expressed in the parent frame.
    pub fn angular_velocity(&self) -> Vector3<f64> {
        let spin = Vector3::new(0.0, DPI / self.period, 0.0);
        self.equator_orientation().inverse() * spin
    }
}
