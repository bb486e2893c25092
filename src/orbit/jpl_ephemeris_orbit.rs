//! Orbit read from a loaded JPL DE / INPOP ephemeris.

use std::sync::Arc;

use nalgebra::{Rotation3, Vector3};
use once_cell::sync::Lazy;

use crate::{
    constants::{ecliptic_to_internal, j2000_obliquity, Days, JulianDay, Kilometer},
    jpl_ephem::{EphemerisItem, JplEphemeris},
};

use super::OrbitSource;

/// Equatorial J2000 to ecliptic J2000, both with `z` towards their pole.
static EQUATORIAL_TO_ECLIPTIC: Lazy<Rotation3<f64>> =
    Lazy::new(|| Rotation3::from_axis_angle(&Vector3::x_axis(), -j2000_obliquity()));

/// Position of `target` relative to `center`, as given by an ephemeris file.
///
/// The file stores equatorial J2000 coordinates; they are rotated to the ecliptic and mapped
/// to the internal convention so the orbit can be placed in any ecliptic-based frame.
#[derive(Debug, Clone)]
pub struct JplEphemerisOrbit {
    ephemeris: Arc<JplEphemeris>,
    target: EphemerisItem,
    center: EphemerisItem,
    period: Days,
    bounding_radius: Kilometer,
}

impl JplEphemerisOrbit {
    pub fn new(
        ephemeris: Arc<JplEphemeris>,
        target: EphemerisItem,
        center: EphemerisItem,
        period: Days,
        bounding_radius: Kilometer,
    ) -> Self {
        JplEphemerisOrbit {
            ephemeris,
            target,
            center,
            period,
            bounding_radius,
        }
    }

    pub fn target(&self) -> EphemerisItem {
        self.target
    }

    pub fn center(&self) -> EphemerisItem {
        self.center
    }

    fn to_internal(v: Vector3<f64>) -> Vector3<f64> {
        ecliptic_to_internal(*EQUATORIAL_TO_ECLIPTIC * v)
    }

    /// `query` for `item` relative to the solar system barycenter.
    ///
    /// The file stores the Moon relative to the Earth; every other item is barycentric.
    fn barycentric(
        &self,
        item: EphemerisItem,
        t: JulianDay,
        query: fn(&JplEphemeris, EphemerisItem, JulianDay) -> Vector3<f64>,
    ) -> Vector3<f64> {
        let v = query(&self.ephemeris, item, t);
        match item {
            EphemerisItem::Moon => query(&self.ephemeris, EphemerisItem::Earth, t) + v,
            _ => v,
        }
    }
}

impl OrbitSource for JplEphemerisOrbit {
    fn compute_position(&self, t: JulianDay) -> Vector3<Kilometer> {
        let target = self.barycentric(self.target, t, JplEphemeris::planet_position);
        let center = self.barycentric(self.center, t, JplEphemeris::planet_position);
        Self::to_internal(target - center)
    }

    fn compute_velocity(&self, t: JulianDay) -> Vector3<f64> {
        let target = self.barycentric(self.target, t, JplEphemeris::planet_velocity);
        let center = self.barycentric(self.center, t, JplEphemeris::planet_velocity);
        Self::to_internal(target - center)
    }

    fn period(&self) -> Days {
        self.period
    }

    fn bounding_radius(&self) -> Kilometer {
        self.bounding_radius
    }

    fn is_periodic(&self) -> bool {
        self.period > 0.0
    }

    fn valid_range(&self) -> Option<(JulianDay, JulianDay)> {
        Some((self.ephemeris.start_date(), self.ephemeris.end_date()))
    }
}

#[cfg(test)]
mod test_jpl_ephemeris_orbit {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equatorial_pole_maps_to_tilted_internal_axis() {
        // the celestial pole lies at ecliptic (0, sin ε, cos ε)
        let eps = j2000_obliquity();
        let v = JplEphemerisOrbit::to_internal(Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(v, Vector3::new(0.0, eps.cos(), -eps.sin()), epsilon = 1e-15);
    }

    #[test]
    fn test_equinox_is_unchanged() {
        let v = JplEphemerisOrbit::to_internal(Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-15);
    }
}
