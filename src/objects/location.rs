use std::sync::Arc;

use nalgebra::Vector3;

use crate::{
    constants::{JulianDay, Kilometer, DIFF_DELTA_DAYS},
    frames::eval_guard::EvalGuard,
    starframe_errors::StarframeError,
    universal_coord::UniversalCoord,
};

use super::Body;

/// A named point fixed on the surface of a body.
#[derive(Debug)]
pub struct Location {
    name: String,
    parent: Arc<Body>,
    /// Offset from the body center in body-fixed axes, km
    position: Vector3<Kilometer>,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        parent: Arc<Body>,
        position: Vector3<Kilometer>,
    ) -> Arc<Self> {
        Arc::new(Location {
            name: name.into(),
            parent,
            position,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> &Arc<Body> {
        &self.parent
    }

    /// Body-fixed offset from the parent's center, km.
    pub fn offset(&self) -> Vector3<Kilometer> {
        self.position
    }

    pub fn try_position(&self, t: JulianDay) -> Result<UniversalCoord, StarframeError> {
        let _guard = EvalGuard::enter()?;
        let to_universal = self.parent.try_ecliptic_to_body_fixed(t)?.inverse();
        Ok(self.parent.try_position(t)? + to_universal * self.position)
    }

    /// Velocity in km/day, by differencing the position over one minute.
    pub fn try_velocity(&self, t: JulianDay) -> Result<Vector3<f64>, StarframeError> {
        let p0 = self.try_position(t)?;
        let p1 = self.try_position(t + DIFF_DELTA_DAYS)?;
        Ok((p1 - p0) / DIFF_DELTA_DAYS)
    }
}
