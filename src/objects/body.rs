//! # Bodies
//!
//! A [`Body`] moves along an [`Orbit`] expressed in its *orbit frame* and turns according to a
//! [`RotationModel`] expressed in its *body frame*. Both frames can be replaced after
//! construction, which is how a frame that refers back to the body itself (a body-fixed frame
//! for its moons, a mean-equator frame for its own orbit) is wired in.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::warn;
use nalgebra::{UnitQuaternion, Vector3};

use crate::{
    constants::{JulianDay, Kilometer},
    frames::{eval_guard::EvalGuard, ReferenceFrame},
    orbit::Orbit,
    rotation::RotationModel,
    selection::Selection,
    starframe_errors::StarframeError,
    universal_coord::UniversalCoord,
};

use super::Star;

pub struct Body {
    name: String,
    orbit: Orbit,
    rotation_model: RotationModel,
    orbit_frame: RwLock<Arc<ReferenceFrame>>,
    body_frame: RwLock<Arc<ReferenceFrame>>,
}

impl Body {
    /// New body whose orbit is expressed in `orbit_frame`.
    ///
    /// The body frame starts out as the orbit frame.
    pub fn new(
        name: impl Into<String>,
        orbit: Orbit,
        rotation_model: RotationModel,
        orbit_frame: Arc<ReferenceFrame>,
    ) -> Arc<Self> {
        Arc::new(Body {
            name: name.into(),
            orbit,
            rotation_model,
            body_frame: RwLock::new(orbit_frame.clone()),
            orbit_frame: RwLock::new(orbit_frame),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn rotation_model(&self) -> &RotationModel {
        &self.rotation_model
    }

    pub fn orbit_frame(&self) -> Arc<ReferenceFrame> {
        self.orbit_frame
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn body_frame(&self) -> Arc<ReferenceFrame> {
        self.body_frame
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_orbit_frame(&self, frame: Arc<ReferenceFrame>) {
        *self
            .orbit_frame
            .write()
            .unwrap_or_else(PoisonError::into_inner) = frame;
    }

    pub fn set_body_frame(&self, frame: Arc<ReferenceFrame>) {
        *self
            .body_frame
            .write()
            .unwrap_or_else(PoisonError::into_inner) = frame;
    }

    /// Universal position at `t`: the orbit position carried out of the orbit frame.
    pub fn try_position(&self, t: JulianDay) -> Result<UniversalCoord, StarframeError> {
        let _guard = EvalGuard::enter()?;
        let local = UniversalCoord::from_km(self.orbit.position_at_time(t));
        self.orbit_frame().try_convert_to_universal(&local, t)
    }

    /// Velocity at `t` in km/day, universal axes.
    ///
    /// Adds the velocity of the orbit frame's center and, for a rotating orbit frame, the
    /// velocity the frame rotation gives to the body's position.
    pub fn try_velocity(&self, t: JulianDay) -> Result<Vector3<f64>, StarframeError> {
        let _guard = EvalGuard::enter()?;
        let frame = self.orbit_frame();
        let to_universal = frame.try_orientation(t)?.inverse();

        let mut velocity =
            to_universal * self.orbit.velocity_at_time(t) + frame.center().try_velocity(t)?;

        if !frame.is_inertial() {
            let r = to_universal * self.orbit.position_at_time(t);
            velocity += frame.try_angular_velocity(t)?.cross(&r);
        }

        Ok(velocity)
    }

    /// Star of the system this body belongs to, found by following orbit frame centers.
    pub fn try_system_star(&self) -> Result<Option<Arc<Star>>, StarframeError> {
        let _guard = EvalGuard::enter()?;
        match self.orbit_frame().center() {
            Selection::Star(star) => Ok(Some(star.clone())),
            Selection::Body(body) => body.try_system_star(),
            Selection::Location(location) => location.parent().try_system_star(),
            Selection::DeepSky(_) | Selection::None => Ok(None),
        }
    }

    /// Position at `t` relative to the system star, in km, universal axes.
    ///
    /// A body with no system star is measured from the universal origin.
    pub fn try_astrocentric_position(
        &self,
        t: JulianDay,
    ) -> Result<Vector3<Kilometer>, StarframeError> {
        let origin = match self.try_system_star()? {
            Some(star) => star.position(),
            None => UniversalCoord::zero(),
        };
        Ok(self.try_position(t)? - origin)
    }

    /// Rotation from universal (ecliptic) axes to the body's equator at `t`.
    pub fn try_ecliptic_to_equatorial(
        &self,
        t: JulianDay,
    ) -> Result<UnitQuaternion<f64>, StarframeError> {
        let _guard = EvalGuard::enter()?;
        Ok(self.rotation_model.equator_orientation(t) * self.body_frame().try_orientation(t)?)
    }

    /// Rotation from universal (ecliptic) axes to the body-fixed axes at `t`.
    pub fn try_ecliptic_to_body_fixed(
        &self,
        t: JulianDay,
    ) -> Result<UnitQuaternion<f64>, StarframeError> {
        let _guard = EvalGuard::enter()?;
        Ok(self.rotation_model.orientation_at_time(t) * self.body_frame().try_orientation(t)?)
    }

    pub fn position(&self, t: JulianDay) -> UniversalCoord {
        self.try_position(t).unwrap_or_else(|err| {
            warn!("Position of '{}' unavailable at t = {t}: {err}", self.name);
            self.orbit_frame()
                .center()
                .try_position(t)
                .unwrap_or_default()
        })
    }

    pub fn velocity(&self, t: JulianDay) -> Vector3<f64> {
        self.try_velocity(t).unwrap_or_else(|err| {
            warn!("Velocity of '{}' unavailable at t = {t}: {err}", self.name);
            Vector3::zeros()
        })
    }

    pub fn orientation(&self, t: JulianDay) -> UnitQuaternion<f64> {
        self.try_ecliptic_to_body_fixed(t).unwrap_or_else(|err| {
            warn!("Orientation of '{}' unavailable at t = {t}: {err}", self.name);
            UnitQuaternion::identity()
        })
    }
}

// Frames refer back to bodies: printing them here would never end.
impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("name", &self.name)
            .field("orbit", &self.orbit)
            .field("rotation_model", &self.rotation_model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod body_test {
    use super::*;
    use crate::{
        constants::DPI,
        orbit::FixedOrbit,
        rotation::UniformRotation,
    };
    use approx::assert_relative_eq;

    fn sun() -> Arc<Star> {
        Star::new(
            "Sun",
            UniversalCoord::from_km(Vector3::new(1.0e15, 2.0e14, -3.0e13)),
            RotationModel::default(),
        )
    }

    #[test]
    fn test_position_is_offset_from_center() {
        let sun = sun();
        let frame = ReferenceFrame::j2000_ecliptic(Selection::Star(sun.clone()));
        let planet = Body::new(
            "Planet",
            FixedOrbit::new(Vector3::new(1.5e8, 0.0, 2.0)).into(),
            RotationModel::default(),
            frame,
        );

        let offset = planet.position(0.0) - sun.position();
        assert_relative_eq!(offset, Vector3::new(1.5e8, 0.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(
            planet.try_astrocentric_position(0.0).unwrap(),
            Vector3::new(1.5e8, 0.0, 2.0),
            epsilon = 1e-6
        );
        assert_eq!(planet.try_system_star().unwrap().unwrap().name(), "Sun");
    }

    #[test]
    fn test_velocity_in_rotating_frame() {
        let sun = sun();
        let period = 2.0;
        let planet = Body::new(
            "Planet",
            FixedOrbit::new(Vector3::zeros()).into(),
            UniformRotation::new(period, 0.0, 0.0).into(),
            ReferenceFrame::j2000_ecliptic(Selection::Star(sun)),
        );

        // a satellite at rest in the planet's body-fixed frame is carried by the spin
        let fixed = ReferenceFrame::body_fixed(
            Selection::Body(planet.clone()),
            Selection::Body(planet.clone()),
        );
        let satellite = Body::new(
            "Satellite",
            FixedOrbit::new(Vector3::new(1000.0, 0.0, 0.0)).into(),
            RotationModel::default(),
            fixed,
        );

        let v = satellite.velocity(10.0);
        assert_relative_eq!(v.norm(), 1000.0 * DPI / period, max_relative = 1e-4);

        let r = satellite.position(10.0) - planet.position(10.0);
        assert_relative_eq!(v.dot(&r) / (v.norm() * r.norm()), 0.0, epsilon = 1e-4);
    }
}
