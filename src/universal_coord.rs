//! # Universal coordinates
//!
//! [`UniversalCoord`] is the common currency between reference frames: a position in
//! kilometers whose three components are [`Fixed64x64`] numbers.
//!
//! Arithmetic rules
//! -----------------
//! * `UniversalCoord - UniversalCoord` yields a `Vector3<f64>` displacement (km). The
//!   subtraction itself is exact; only the final, usually small, result is rounded.
//! * `UniversalCoord + Vector3<f64>` (and `-`) yields a new `UniversalCoord`.
//! * Two universal coordinates are never added together; a fixed-point displacement is
//!   applied with [`UniversalCoord::translate`].
//! * [`UniversalCoord::difference`] keeps a displacement in fixed point; it is what frame
//!   conversions use to express a position relative to a frame center before rotating it
//!   with [`UniversalCoord::rotate`].

use std::fmt;
use std::ops::{Add, Sub};

use nalgebra::{UnitQuaternion, Vector3};

use crate::{constants::Kilometer, fixed_point::Fixed64x64};

/// Position at galactic scale, in kilometers, with 64.64 fixed-point components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UniversalCoord {
    pub x: Fixed64x64,
    pub y: Fixed64x64,
    pub z: Fixed64x64,
}

impl UniversalCoord {
    pub fn new(x: Fixed64x64, y: Fixed64x64, z: Fixed64x64) -> Self {
        UniversalCoord { x, y, z }
    }

    pub fn zero() -> Self {
        UniversalCoord::default()
    }

    /// Build a coordinate from a floating-point position in kilometers.
    pub fn from_km(position: Vector3<Kilometer>) -> Self {
        UniversalCoord {
            x: position.x.into(),
            y: position.y.into(),
            z: position.z.into(),
        }
    }

    /// Nearest floating-point position in kilometers.
    ///
    /// Precision is lost for large coordinates; prefer [`Self::offset_from_km`] when the
    /// quantity of interest is relative to another coordinate.
    pub fn to_km(&self) -> Vector3<Kilometer> {
        Vector3::new(self.x.to_f64(), self.y.to_f64(), self.z.to_f64())
    }

    /// Displacement from `origin` to `self`, in kilometers.
    pub fn offset_from_km(&self, origin: &UniversalCoord) -> Vector3<Kilometer> {
        Vector3::new(
            (self.x - origin.x).to_f64(),
            (self.y - origin.y).to_f64(),
            (self.z - origin.z).to_f64(),
        )
    }

    /// Displacement from `origin` to `self`, kept in fixed point.
    pub fn difference(&self, origin: &UniversalCoord) -> UniversalCoord {
        UniversalCoord {
            x: self.x - origin.x,
            y: self.y - origin.y,
            z: self.z - origin.z,
        }
    }

    /// Translate this coordinate by a displacement given in kilometers.
    pub fn offset_km(&self, offset: &Vector3<Kilometer>) -> UniversalCoord {
        UniversalCoord {
            x: self.x + Fixed64x64::from_f64(offset.x),
            y: self.y + Fixed64x64::from_f64(offset.y),
            z: self.z + Fixed64x64::from_f64(offset.z),
        }
    }

    /// Apply a displacement that is already in fixed point.
    pub fn translate(&self, displacement: &UniversalCoord) -> UniversalCoord {
        UniversalCoord {
            x: self.x + displacement.x,
            y: self.y + displacement.y,
            z: self.z + displacement.z,
        }
    }

    /// Rotate this coordinate (seen as a vector from the origin) by `q`.
    ///
    /// Each matrix coefficient multiplies a fixed-point component and the three products of a
    /// row are summed in fixed point, so the rotation of a large coordinate does not round the
    /// coordinate to `f64` first.
    pub fn rotate(&self, q: &UnitQuaternion<f64>) -> UniversalCoord {
        let m = q.to_rotation_matrix();
        let m = m.matrix();

        let row = |i: usize| -> Fixed64x64 {
            self.x.mul_f64(m[(i, 0)]) + self.y.mul_f64(m[(i, 1)]) + self.z.mul_f64(m[(i, 2)])
        };

        UniversalCoord {
            x: row(0),
            y: row(1),
            z: row(2),
        }
    }

    /// Multiply every component by a floating-point factor.
    pub fn scale(&self, factor: f64) -> UniversalCoord {
        UniversalCoord {
            x: self.x.mul_f64(factor),
            y: self.y.mul_f64(factor),
            z: self.z.mul_f64(factor),
        }
    }

    /// Distance between two coordinates in kilometers.
    pub fn distance_from_km(&self, other: &UniversalCoord) -> Kilometer {
        self.offset_from_km(other).norm()
    }
}

impl From<Vector3<Kilometer>> for UniversalCoord {
    fn from(position: Vector3<Kilometer>) -> Self {
        UniversalCoord::from_km(position)
    }
}

impl Sub for UniversalCoord {
    type Output = Vector3<Kilometer>;

    /// Displacement between two coordinates, in kilometers.
    fn sub(self, rhs: Self) -> Self::Output {
        self.offset_from_km(&rhs)
    }
}

impl Sub for &UniversalCoord {
    type Output = Vector3<Kilometer>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.offset_from_km(rhs)
    }
}

impl Add<Vector3<Kilometer>> for UniversalCoord {
    type Output = UniversalCoord;

    fn add(self, rhs: Vector3<Kilometer>) -> Self::Output {
        self.offset_km(&rhs)
    }
}

impl Add<&Vector3<Kilometer>> for &UniversalCoord {
    type Output = UniversalCoord;

    fn add(self, rhs: &Vector3<Kilometer>) -> Self::Output {
        self.offset_km(rhs)
    }
}

impl Sub<Vector3<Kilometer>> for UniversalCoord {
    type Output = UniversalCoord;

    fn sub(self, rhs: Vector3<Kilometer>) -> Self::Output {
        self.offset_km(&-rhs)
    }
}

impl fmt::Display for UniversalCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} km, {} km, {} km)", self.x, self.y, self.z)
    }
}
