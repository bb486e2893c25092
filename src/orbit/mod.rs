//! # Orbits
//!
//! An orbit gives the position of a body relative to the center of its orbit frame, in
//! kilometers, in the frame's local (internal, `y`-up) coordinates.
//!
//! [`Orbit`] is the closed set of orbit kinds a body can carry. Each kind is built on an
//! [`OrbitSource`], the trait that computes positions; [`CachingOrbit`] wraps a source whose
//! evaluation is expensive and memoizes its last position.

pub mod caching_orbit;
pub mod elliptical_orbit;
pub mod fixed_orbit;
pub mod jpl_ephemeris_orbit;

use nalgebra::Vector3;

use crate::constants::{Days, JulianDay, Kilometer, DIFF_DELTA_DAYS};

pub use caching_orbit::CachingOrbit;
pub use elliptical_orbit::{EllipticalOrbit, KeplerianElements};
pub use fixed_orbit::FixedOrbit;
pub use jpl_ephemeris_orbit::JplEphemerisOrbit;

/// Computes the position of a body at a given time.
pub trait OrbitSource {
    /// Position in km, in the orbit frame.
    fn compute_position(&self, t: JulianDay) -> Vector3<Kilometer>;

    /// Velocity in km/day; forward difference over one minute unless overridden.
    fn compute_velocity(&self, t: JulianDay) -> Vector3<f64> {
        let p0 = self.compute_position(t);
        let p1 = self.compute_position(t + DIFF_DELTA_DAYS);
        (p1 - p0) / DIFF_DELTA_DAYS
    }

    fn period(&self) -> Days;

    fn bounding_radius(&self) -> Kilometer;

    fn is_periodic(&self) -> bool {
        false
    }

    /// Time span over which the source holds data, if limited.
    fn valid_range(&self) -> Option<(JulianDay, JulianDay)> {
        None
    }
}

#[derive(Debug, Clone)]
pub enum Orbit {
    Elliptical(EllipticalOrbit),
    Fixed(FixedOrbit),
    JplEphemeris(CachingOrbit<JplEphemerisOrbit>),
}

impl Orbit {
    /// Wrap an ephemeris-backed orbit in its position cache.
    pub fn jpl(orbit: JplEphemerisOrbit) -> Self {
        Orbit::JplEphemeris(CachingOrbit::new(orbit))
    }

    pub fn position_at_time(&self, t: JulianDay) -> Vector3<Kilometer> {
        match self {
            Orbit::Elliptical(o) => o.compute_position(t),
            Orbit::Fixed(o) => o.compute_position(t),
            Orbit::JplEphemeris(o) => o.position_at_time(t),
        }
    }

    /// Velocity in km/day, in the orbit frame.
    pub fn velocity_at_time(&self, t: JulianDay) -> Vector3<f64> {
        match self {
            Orbit::Elliptical(o) => o.compute_velocity(t),
            Orbit::Fixed(o) => o.compute_velocity(t),
            Orbit::JplEphemeris(o) => o.velocity_at_time(t),
        }
    }

    pub fn period(&self) -> Days {
        match self {
            Orbit::Elliptical(o) => o.period(),
            Orbit::Fixed(o) => o.period(),
            Orbit::JplEphemeris(o) => o.period(),
        }
    }

    pub fn bounding_radius(&self) -> Kilometer {
        match self {
            Orbit::Elliptical(o) => o.bounding_radius(),
            Orbit::Fixed(o) => o.bounding_radius(),
            Orbit::JplEphemeris(o) => o.bounding_radius(),
        }
    }

    pub fn is_periodic(&self) -> bool {
        match self {
            Orbit::Elliptical(o) => o.is_periodic(),
            Orbit::Fixed(o) => o.is_periodic(),
            Orbit::JplEphemeris(o) => o.is_periodic(),
        }
    }

    pub fn valid_range(&self) -> Option<(JulianDay, JulianDay)> {
        match self {
            Orbit::Elliptical(o) => o.valid_range(),
            Orbit::Fixed(o) => o.valid_range(),
            Orbit::JplEphemeris(o) => o.valid_range(),
        }
    }

    /// Feed `count` positions, evenly spaced over `[start, start + duration)`, to `sink`.
    ///
    /// Arguments
    /// ---------
    /// * `start`: first sample time (TDB Julian date)
    /// * `duration`: length of the sampled span in days
    /// * `count`: number of samples; zero samples nothing
    /// * `sink`: receives each sample time and position
    pub fn sample<F>(&self, start: JulianDay, duration: Days, count: usize, mut sink: F)
    where
        F: FnMut(JulianDay, &Vector3<Kilometer>),
    {
        if count == 0 {
            return;
        }
        let step = duration / count as f64;
        for i in 0..count {
            let t = start + step * i as f64;
            sink(t, &self.position_at_time(t));
        }
    }
}

impl From<EllipticalOrbit> for Orbit {
    fn from(orbit: EllipticalOrbit) -> Self {
        Orbit::Elliptical(orbit)
    }
}

impl From<FixedOrbit> for Orbit {
    fn from(orbit: FixedOrbit) -> Self {
        Orbit::Fixed(orbit)
    }
}

impl From<JplEphemerisOrbit> for Orbit {
    fn from(orbit: JplEphemerisOrbit) -> Self {
        Orbit::jpl(orbit)
    }
}
