//! # Reference frames
//!
//! A [`ReferenceFrame`] relates a local coordinate system to universal coordinates: its
//! origin is a [`Selection`] (the center) and its axes are given by a time-dependent
//! orientation quaternion.
//!
//! Conventions
//! -----------
//! * `q = frame.orientation(t)` maps universal (ecliptic J2000, `y`-up) axes to the frame's
//!   local axes: `local = q * (position − center)`.
//! * The inverse goes back: `position = center + q⁻¹ * local`.
//!
//! Frames form a graph: a body-fixed frame asks its body for an orientation, which asks the
//! body's own frame, and so on. The graph may contain cycles. Every recursive step enters an
//! [`eval_guard::EvalGuard`], so a cycle ends in [`StarframeError::FrameRecursionLimit`]
//! rather than a stack overflow. The `try_*` methods report that error; the infallible
//! methods log it and fall back to the identity orientation.
//!
//! Kinds
//! -----
//! | Kind               | Orientation                                           | Inertial |
//! |--------------------|-------------------------------------------------------|----------|
//! | `J2000Ecliptic`    | identity                                              | yes      |
//! | `J2000Equator`     | rotation about `x` by the J2000 obliquity             | yes      |
//! | `BodyFixed`        | 180° about `y` × target's ecliptic to body-fixed      | no       |
//! | `BodyMeanEquator`  | target's ecliptic to equatorial, live or frozen       | frozen, or as the target's body frame |
//! | `TwoVector`        | basis built from two [`FrameVector`]s                 | yes      |

pub mod eval_guard;
pub mod frame_cache;
pub mod frame_vector;
pub mod nesting;
pub mod two_vector;

use std::sync::Arc;

use log::warn;
use nalgebra::{UnitQuaternion, Vector3};
use once_cell::sync::Lazy;

use crate::{
    constants::{j2000_obliquity, JulianDay, DIFF_DELTA_DAYS},
    rotation::angular_velocity_between,
    selection::Selection,
    starframe_errors::StarframeError,
    universal_coord::UniversalCoord,
};

use eval_guard::EvalGuard;
use frame_cache::FrameCache;

pub use frame_vector::FrameVector;
pub use two_vector::{Axis, TwoVectorFrame};

/// Ecliptic J2000 to equatorial J2000.
static J2000_EQUATOR_ORIENTATION: Lazy<UnitQuaternion<f64>> =
    Lazy::new(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), j2000_obliquity()));

/// Half turn about `y`: aligns body-fixed longitude zero with the `x` axis.
static Y_ROTATION_180: Lazy<UnitQuaternion<f64>> =
    Lazy::new(|| UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f64::consts::PI));

/// Which frames of a body a nesting walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Orbit frames: where a body is
    Position,
    /// Body frames: how a body is oriented
    Orientation,
}

#[derive(Debug, Clone)]
pub enum FrameKind {
    J2000Ecliptic,
    J2000Equator,
    /// Rotates with `target`
    BodyFixed { target: Selection },
    /// Follows the equator of `target`; frozen at `freeze_epoch` if one is given
    BodyMeanEquator {
        target: Selection,
        freeze_epoch: Option<JulianDay>,
    },
    TwoVector(TwoVectorFrame),
}

#[derive(Debug)]
pub struct ReferenceFrame {
    center: Selection,
    kind: FrameKind,
    cache: FrameCache,
}

impl ReferenceFrame {
    pub fn new(center: Selection, kind: FrameKind) -> Self {
        ReferenceFrame {
            center,
            kind,
            cache: FrameCache::new(),
        }
    }

    pub fn j2000_ecliptic(center: Selection) -> Arc<Self> {
        Arc::new(ReferenceFrame::new(center, FrameKind::J2000Ecliptic))
    }

    pub fn j2000_equator(center: Selection) -> Arc<Self> {
        Arc::new(ReferenceFrame::new(center, FrameKind::J2000Equator))
    }

    pub fn body_fixed(center: Selection, target: Selection) -> Arc<Self> {
        Arc::new(ReferenceFrame::new(center, FrameKind::BodyFixed { target }))
    }

    pub fn body_mean_equator(
        center: Selection,
        target: Selection,
        freeze_epoch: Option<JulianDay>,
    ) -> Arc<Self> {
        Arc::new(ReferenceFrame::new(
            center,
            FrameKind::BodyMeanEquator {
                target,
                freeze_epoch,
            },
        ))
    }

    pub fn two_vector(center: Selection, frame: TwoVectorFrame) -> Arc<Self> {
        Arc::new(ReferenceFrame::new(center, FrameKind::TwoVector(frame)))
    }

    pub fn center(&self) -> &Selection {
        &self.center
    }

    pub fn kind(&self) -> &FrameKind {
        &self.kind
    }

    fn is_cached(&self) -> bool {
        !matches!(
            self.kind,
            FrameKind::J2000Ecliptic | FrameKind::J2000Equator
        )
    }

    /// Orientation at `t`, bypassing the cache.
    fn compute_orientation(&self, t: JulianDay) -> Result<UnitQuaternion<f64>, StarframeError> {
        match &self.kind {
            FrameKind::J2000Ecliptic => Ok(UnitQuaternion::identity()),
            FrameKind::J2000Equator => Ok(*J2000_EQUATOR_ORIENTATION),
            FrameKind::BodyFixed { target } => {
                let fixed = match target {
                    Selection::Body(body) => body.try_ecliptic_to_body_fixed(t)?,
                    Selection::Location(location) => {
                        location.parent().try_ecliptic_to_body_fixed(t)?
                    }
                    Selection::Star(star) => star.rotation_model().orientation_at_time(t),
                    Selection::DeepSky(_) | Selection::None => UnitQuaternion::identity(),
                };
                Ok(*Y_ROTATION_180 * fixed)
            }
            FrameKind::BodyMeanEquator {
                target,
                freeze_epoch,
            } => {
                let t = freeze_epoch.unwrap_or(t);
                match target {
                    Selection::Body(body) => body.try_ecliptic_to_equatorial(t),
                    Selection::Location(location) => {
                        location.parent().try_ecliptic_to_equatorial(t)
                    }
                    Selection::Star(star) => Ok(star.rotation_model().equator_orientation(t)),
                    Selection::DeepSky(_) | Selection::None => Ok(UnitQuaternion::identity()),
                }
            }
            FrameKind::TwoVector(two_vector) => two_vector.try_orientation(t),
        }
    }

    /// Orientation at `t`: maps universal axes to the frame's axes.
    pub fn try_orientation(&self, t: JulianDay) -> Result<UnitQuaternion<f64>, StarframeError> {
        let _guard = EvalGuard::enter()?;
        if self.is_cached() {
            self.cache
                .orientation
                .try_get_or_compute(t, || self.compute_orientation(t))
        } else {
            self.compute_orientation(t)
        }
    }

    /// Same as [`Self::try_orientation`], identity if the evaluation fails.
    pub fn orientation(&self, t: JulianDay) -> UnitQuaternion<f64> {
        self.try_orientation(t).unwrap_or_else(|err| {
            warn!("Frame orientation unavailable at t = {t}: {err}; using identity");
            UnitQuaternion::identity()
        })
    }

    /// Angular velocity of the frame's axes at `t`, in rad/day, in universal axes.
    ///
    /// J2000 frames do not rotate. Other frames differentiate their orientation over one
    /// minute.
    pub fn try_angular_velocity(&self, t: JulianDay) -> Result<Vector3<f64>, StarframeError> {
        if !self.is_cached() {
            return Ok(Vector3::zeros());
        }

        self.cache.angular_velocity.try_get_or_compute(t, || -> Result<_, StarframeError> {
            let q0 = self.try_orientation(t)?;
            let q1 = {
                let _guard = EvalGuard::enter()?;
                self.compute_orientation(t + DIFF_DELTA_DAYS)?
            };
            Ok(angular_velocity_between(&q0, &q1, DIFF_DELTA_DAYS))
        })
    }

    pub fn angular_velocity(&self, t: JulianDay) -> Vector3<f64> {
        self.try_angular_velocity(t).unwrap_or_else(|err| {
            warn!("Frame angular velocity unavailable at t = {t}: {err}; using zero");
            Vector3::zeros()
        })
    }

    /// Whether the frame's axes are fixed in universal space.
    ///
    /// Two-vector frames are reported inertial even though their vectors usually move.
    pub fn is_inertial(&self) -> bool {
        let Ok(_guard) = EvalGuard::enter() else {
            return false;
        };

        match &self.kind {
            FrameKind::J2000Ecliptic | FrameKind::J2000Equator => true,
            FrameKind::BodyFixed { .. } => false,
            FrameKind::BodyMeanEquator {
                freeze_epoch: Some(_),
                ..
            } => true,
            FrameKind::BodyMeanEquator { target, .. } => match target {
                Selection::Body(body) => body.body_frame().is_inertial(),
                Selection::Location(location) => location.parent().body_frame().is_inertial(),
                _ => true,
            },
            FrameKind::TwoVector(_) => true,
        }
    }

    /// Universal position to frame-local coordinates, in fixed point.
    pub fn try_convert_from_universal(
        &self,
        uc: &UniversalCoord,
        t: JulianDay,
    ) -> Result<UniversalCoord, StarframeError> {
        let center = self.center.try_position(t)?;
        let q = self.try_orientation(t)?;
        Ok(uc.difference(&center).rotate(&q))
    }

    /// Frame-local coordinates to a universal position, in fixed point.
    pub fn try_convert_to_universal(
        &self,
        local: &UniversalCoord,
        t: JulianDay,
    ) -> Result<UniversalCoord, StarframeError> {
        let center = self.center.try_position(t)?;
        let q = self.try_orientation(t)?;
        Ok(center.translate(&local.rotate(&q.inverse())))
    }

    pub fn convert_from_universal(&self, uc: &UniversalCoord, t: JulianDay) -> UniversalCoord {
        self.try_convert_from_universal(uc, t).unwrap_or_else(|err| {
            warn!("Frame conversion failed at t = {t}: {err}; using origin");
            UniversalCoord::zero()
        })
    }

    pub fn convert_to_universal(&self, local: &UniversalCoord, t: JulianDay) -> UniversalCoord {
        self.try_convert_to_universal(local, t).unwrap_or_else(|err| {
            warn!("Frame conversion failed at t = {t}: {err}; using frame center");
            self.center.try_position(t).unwrap_or_default()
        })
    }

    /// Astrocentric position (km from the system star, universal axes) to frame-local.
    ///
    /// Only defined for frames centered on a body or a star; other centers give zero.
    pub fn try_convert_from_astrocentric(
        &self,
        p: &Vector3<f64>,
        t: JulianDay,
    ) -> Result<Vector3<f64>, StarframeError> {
        match &self.center {
            Selection::Body(body) => {
                let center = body.try_astrocentric_position(t)?;
                Ok(self.try_orientation(t)? * (p - center))
            }
            Selection::Star(_) => Ok(self.try_orientation(t)? * p),
            _ => Ok(Vector3::zeros()),
        }
    }

    /// Frame-local position to astrocentric coordinates; inverse of
    /// [`Self::try_convert_from_astrocentric`].
    pub fn try_convert_to_astrocentric(
        &self,
        p: &Vector3<f64>,
        t: JulianDay,
    ) -> Result<Vector3<f64>, StarframeError> {
        match &self.center {
            Selection::Body(body) => {
                let center = body.try_astrocentric_position(t)?;
                Ok(center + self.try_orientation(t)?.inverse() * p)
            }
            Selection::Star(_) => Ok(self.try_orientation(t)?.inverse() * p),
            _ => Ok(Vector3::zeros()),
        }
    }

    pub fn convert_from_astrocentric(&self, p: &Vector3<f64>, t: JulianDay) -> Vector3<f64> {
        self.try_convert_from_astrocentric(p, t).unwrap_or_else(|err| {
            warn!("Astrocentric conversion failed at t = {t}: {err}; using zero");
            Vector3::zeros()
        })
    }

    pub fn convert_to_astrocentric(&self, p: &Vector3<f64>, t: JulianDay) -> Vector3<f64> {
        self.try_convert_to_astrocentric(p, t).unwrap_or_else(|err| {
            warn!("Astrocentric conversion failed at t = {t}: {err}; using zero");
            Vector3::zeros()
        })
    }
}
