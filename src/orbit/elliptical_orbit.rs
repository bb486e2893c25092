//! Two-body elliptical orbit from classical Keplerian elements.
//!
//! The orbit is described in the astronomical ecliptic of its reference frame, then mapped to
//! the internal convention (`y` towards the pole) on output.

use nalgebra::{Rotation3, Vector3};
use roots::{find_root_brent, find_root_newton_raphson, SimpleConvergency};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{ecliptic_to_internal, Days, JulianDay, Kilometer, Radian, DPI},
    starframe_errors::StarframeError,
};

use super::OrbitSource;

/// Keplerian elements of a bound orbit.
///
/// Units:
/// * `semi_major_axis`: km
/// * `eccentricity`: unitless, in `[0, 1)`
/// * `inclination`, `ascending_node`, `argument_of_periapsis`, `mean_anomaly_at_epoch`:
///   radians
/// * `period`: days
/// * `epoch`: TDB Julian date of `mean_anomaly_at_epoch`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerianElements {
    pub semi_major_axis: Kilometer,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node: Radian,
    pub argument_of_periapsis: Radian,
    pub mean_anomaly_at_epoch: Radian,
    pub period: Days,
    pub epoch: JulianDay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalOrbit {
    elements: KeplerianElements,
    /// Orbital plane to ecliptic: Rz(Ω)·Rx(i)·Rz(ω)
    orientation: Rotation3<f64>,
}

/// Solve Kepler's equation `E − e·sin E = M` for the eccentric anomaly.
///
/// Newton-Raphson starting from `M + e·sin M`; if it does not converge, Brent's method on
/// `[M − e, M + e]`, which always brackets the root.
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, StarframeError> {
    let m = mean_anomaly;
    let e = eccentricity;
    if e == 0.0 {
        return Ok(m);
    }

    let f = |ea: f64| ea - e * ea.sin() - m;
    let df = |ea: f64| 1.0 - e * ea.cos();

    let mut convergency = SimpleConvergency {
        eps: f64::EPSILON * 1e2,
        max_iter: 30,
    };

    let x0 = if e < 0.8 { m + e * m.sin() } else { std::f64::consts::PI };
    match find_root_newton_raphson(x0, &f, &df, &mut convergency) {
        Ok(ea) => Ok(ea),
        Err(_) => {
            let mut convergency = SimpleConvergency {
                eps: f64::EPSILON * 1e2,
                max_iter: 100,
            };
            Ok(find_root_brent(m - e, m + e, &f, &mut convergency)?)
        }
    }
}

impl EllipticalOrbit {
    /// Build an orbit, rejecting unbound or degenerate element sets.
    pub fn new(elements: KeplerianElements) -> Result<Self, StarframeError> {
        if !(0.0..1.0).contains(&elements.eccentricity) {
            return Err(StarframeError::InvalidOrbitElements(format!(
                "eccentricity {} is not in [0, 1)",
                elements.eccentricity
            )));
        }
        if elements.period <= 0.0 || elements.semi_major_axis <= 0.0 {
            return Err(StarframeError::InvalidOrbitElements(format!(
                "period ({} d) and semi-major axis ({} km) must be positive",
                elements.period, elements.semi_major_axis
            )));
        }

        let orientation = Rotation3::from_axis_angle(&Vector3::z_axis(), elements.ascending_node)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), elements.inclination)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), elements.argument_of_periapsis);

        Ok(EllipticalOrbit {
            elements,
            orientation,
        })
    }

    pub fn elements(&self) -> &KeplerianElements {
        &self.elements
    }

    fn mean_motion(&self) -> f64 {
        DPI / self.elements.period
    }

    fn eccentric_anomaly(&self, t: JulianDay) -> Radian {
        let m = (self.elements.mean_anomaly_at_epoch
            + self.mean_motion() * (t - self.elements.epoch))
            .rem_euclid(DPI);

        // Brent cannot fail on a bracketing interval; M is the last resort for pathological
        // input such as a NaN time
        solve_kepler(m, self.elements.eccentricity).unwrap_or_else(|err| {
            log::warn!("Kepler solver failed at t = {t}: {err}");
            m
        })
    }

    /// Position and velocity (km, km/day) in the astronomical ecliptic convention.
    pub fn state_at_time(&self, t: JulianDay) -> (Vector3<Kilometer>, Vector3<f64>) {
        let a = self.elements.semi_major_axis;
        let e = self.elements.eccentricity;
        let b = a * (1.0 - e * e).sqrt();

        let ea = self.eccentric_anomaly(t);
        let (sin_e, cos_e) = ea.sin_cos();
        let ea_dot = self.mean_motion() / (1.0 - e * cos_e);

        let position = Vector3::new(a * (cos_e - e), b * sin_e, 0.0);
        let velocity = Vector3::new(-a * sin_e * ea_dot, b * cos_e * ea_dot, 0.0);

        (self.orientation * position, self.orientation * velocity)
    }
}

impl OrbitSource for EllipticalOrbit {
    fn compute_position(&self, t: JulianDay) -> Vector3<Kilometer> {
        ecliptic_to_internal(self.state_at_time(t).0)
    }

    fn compute_velocity(&self, t: JulianDay) -> Vector3<f64> {
        ecliptic_to_internal(self.state_at_time(t).1)
    }

    fn period(&self) -> Days {
        self.elements.period
    }

    fn bounding_radius(&self) -> Kilometer {
        self.elements.semi_major_axis * (1.0 + self.elements.eccentricity)
    }

    fn is_periodic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test_elliptical_orbit {
    use super::*;
    use approx::assert_relative_eq;

    fn elements(e: f64) -> KeplerianElements {
        KeplerianElements {
            semi_major_axis: 1.0e8,
            eccentricity: e,
            inclination: 0.0,
            ascending_node: 0.0,
            argument_of_periapsis: 0.0,
            mean_anomaly_at_epoch: 0.0,
            period: 100.0,
            epoch: 2_451_545.0,
        }
    }

    #[test]
    fn test_solve_kepler_residual() {
        for &e in &[0.0, 0.1, 0.5, 0.9, 0.99] {
            for &m in &[0.0, 0.3, 1.0, 3.0, 5.5] {
                let ea = solve_kepler(m, e).unwrap();
                assert_relative_eq!(ea - e * ea.sin(), m, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_periapsis_and_apoapsis() {
        let orbit = EllipticalOrbit::new(elements(0.5)).unwrap();

        let peri = orbit.compute_position(2_451_545.0);
        assert_relative_eq!(peri, Vector3::new(0.5e8, 0.0, 0.0), epsilon = 1e-3);

        let apo = orbit.compute_position(2_451_545.0 + 50.0);
        assert_relative_eq!(apo.x, -1.5e8, max_relative = 1e-12);
        assert_relative_eq!(orbit.bounding_radius(), 1.5e8);
    }

    #[test]
    fn test_orbit_plane_maps_to_internal_convention() {
        // a quarter period later on a circular orbit: ecliptic +Y, internal -Z
        let orbit = EllipticalOrbit::new(elements(0.0)).unwrap();
        let p = orbit.compute_position(2_451_545.0 + 25.0);
        assert_relative_eq!(p, Vector3::new(0.0, 0.0, -1.0e8), epsilon = 1e-4);
    }

    #[test]
    fn test_inclined_orbit_leaves_ecliptic() {
        let mut el = elements(0.0);
        el.inclination = std::f64::consts::FRAC_PI_2;
        let orbit = EllipticalOrbit::new(el).unwrap();
        let p = orbit.compute_position(2_451_545.0 + 25.0);
        // polar orbit: ecliptic +Z is the internal +Y
        assert_relative_eq!(p, Vector3::new(0.0, 1.0e8, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let mut el = elements(0.3);
        el.inclination = 0.4;
        el.ascending_node = 1.2;
        el.argument_of_periapsis = -0.7;
        let orbit = EllipticalOrbit::new(el).unwrap();

        // at t ~ 2.45e6 a Julian date only resolves ~5e-10 day
        let t = 2_451_560.25;
        let h = 1.0 / 64.0;
        let numeric =
            (orbit.compute_position(t + h) - orbit.compute_position(t - h)) / (2.0 * h);
        let velocity = orbit.compute_velocity(t);
        assert_relative_eq!(velocity, numeric, epsilon = 1e-5 * velocity.norm());
    }

    #[test]
    fn test_invalid_elements() {
        assert!(matches!(
            EllipticalOrbit::new(elements(1.0)),
            Err(StarframeError::InvalidOrbitElements(_))
        ));
        let mut el = elements(0.1);
        el.period = 0.0;
        assert!(EllipticalOrbit::new(el).is_err());
    }
}
