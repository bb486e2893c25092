use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Days, JulianDay, Kilometer};

use super::OrbitSource;

/// A body at rest in its orbit frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedOrbit {
    pub position: Vector3<Kilometer>,
}

impl FixedOrbit {
    pub fn new(position: Vector3<Kilometer>) -> Self {
        FixedOrbit { position }
    }
}

impl OrbitSource for FixedOrbit {
    fn compute_position(&self, _t: JulianDay) -> Vector3<Kilometer> {
        self.position
    }

    fn compute_velocity(&self, _t: JulianDay) -> Vector3<f64> {
        Vector3::zeros()
    }

    fn period(&self) -> Days {
        0.0
    }

    fn bounding_radius(&self) -> Kilometer {
        self.position.norm()
    }
}
