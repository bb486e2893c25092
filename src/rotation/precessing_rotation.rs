use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::constants::{Days, JulianDay, Radian, DPI};

use super::uniform_rotation::{equator_tilt, spin_about_pole};

/// Uniform rotation whose equator node regresses at a constant rate.
///
/// A `precession_period` of zero means no precession. A positive period makes the node move
/// backwards, as the Earth's equinoxes do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecessingRotation {
    pub period: Days,
    pub offset: Radian,
    pub epoch: JulianDay,
    pub inclination: Radian,
    pub ascending_node: Radian,
    pub precession_period: Days,
}

impl PrecessingRotation {
    pub fn spin(&self, t: JulianDay) -> UnitQuaternion<f64> {
        spin_about_pole(t - self.epoch, self.period, self.offset)
    }

    /// Longitude of the ascending node at `t`.
    pub fn node_of_date(&self, t: JulianDay) -> Radian {
        if self.precession_period == 0.0 {
            self.ascending_node
        } else {
            self.ascending_node - DPI / self.precession_period * (t - self.epoch)
        }
    }

    pub fn equator_orientation(&self, t: JulianDay) -> UnitQuaternion<f64> {
        equator_tilt(self.inclination, self.node_of_date(t))
    }
}
