//! # Selection
//!
//! A [`Selection`] names an object of the catalog: the center of a frame, the observer or
//! target of a [`crate::frames::FrameVector`]. It is a cheap handle: cloning clones an `Arc`.

use std::sync::Arc;

use log::warn;
use nalgebra::Vector3;

use crate::{
    constants::JulianDay,
    objects::{Body, DeepSkyObject, Location, Star},
    starframe_errors::StarframeError,
    universal_coord::UniversalCoord,
};

#[derive(Debug, Clone, Default)]
pub enum Selection {
    /// The universal origin
    #[default]
    None,
    Star(Arc<Star>),
    Body(Arc<Body>),
    DeepSky(Arc<DeepSkyObject>),
    Location(Arc<Location>),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Display name of the selected object; empty for [`Selection::None`].
    pub fn name(&self) -> &str {
        match self {
            Selection::None => "",
            Selection::Star(star) => star.name(),
            Selection::Body(body) => body.name(),
            Selection::DeepSky(dso) => dso.name(),
            Selection::Location(location) => location.name(),
        }
    }

    /// Universal position at `t`.
    pub fn try_position(&self, t: JulianDay) -> Result<UniversalCoord, StarframeError> {
        match self {
            Selection::None => Ok(UniversalCoord::zero()),
            Selection::Star(star) => Ok(star.position()),
            Selection::Body(body) => body.try_position(t),
            Selection::DeepSky(dso) => Ok(dso.position()),
            Selection::Location(location) => location.try_position(t),
        }
    }

    /// Velocity at `t`, in km/day, universal axes.
    pub fn try_velocity(&self, t: JulianDay) -> Result<Vector3<f64>, StarframeError> {
        match self {
            Selection::None | Selection::Star(_) | Selection::DeepSky(_) => Ok(Vector3::zeros()),
            Selection::Body(body) => body.try_velocity(t),
            Selection::Location(location) => location.try_velocity(t),
        }
    }

    /// Same as [`Self::try_position`], origin if the evaluation fails.
    pub fn position(&self, t: JulianDay) -> UniversalCoord {
        self.try_position(t).unwrap_or_else(|err| {
            warn!("Position of '{}' unavailable at t = {t}: {err}", self.name());
            UniversalCoord::zero()
        })
    }

    pub fn velocity(&self, t: JulianDay) -> Vector3<f64> {
        self.try_velocity(t).unwrap_or_else(|err| {
            warn!("Velocity of '{}' unavailable at t = {t}: {err}", self.name());
            Vector3::zeros()
        })
    }
}

impl From<Arc<Star>> for Selection {
    fn from(star: Arc<Star>) -> Self {
        Selection::Star(star)
    }
}

impl From<Arc<Body>> for Selection {
    fn from(body: Arc<Body>) -> Self {
        Selection::Body(body)
    }
}

impl From<Arc<DeepSkyObject>> for Selection {
    fn from(dso: Arc<DeepSkyObject>) -> Self {
        Selection::DeepSky(dso)
    }
}

impl From<Arc<Location>> for Selection {
    fn from(location: Arc<Location>) -> Self {
        Selection::Location(location)
    }
}
