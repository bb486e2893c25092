//! Frames whose axes follow two directions.
//!
//! The primary direction fixes one axis exactly. The secondary direction only picks the
//! plane of the second axis: it is made orthogonal to the primary. The third axis completes
//! a right-handed basis.

use log::trace;
use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{JulianDay, TWO_VECTOR_TOLERANCE},
    starframe_errors::StarframeError,
};

use super::frame_vector::FrameVector;

/// A signed coordinate axis of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    PosX,
    PosY,
    PosZ,
    NegX,
    NegY,
    NegZ,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::PosX | Axis::NegX => 0,
            Axis::PosY | Axis::NegY => 1,
            Axis::PosZ | Axis::NegZ => 2,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Axis::NegX | Axis::NegY | Axis::NegZ)
    }
}

#[derive(Debug, Clone)]
pub struct TwoVectorFrame {
    pub primary: FrameVector,
    pub primary_axis: Axis,
    pub secondary: FrameVector,
    pub secondary_axis: Axis,
}

/// Orientation whose rows are the frame axes expressed in universal coordinates.
///
/// Return
/// ------
/// * `None` when the two directions are too close to collinear to define a plane
pub fn basis_from_directions(
    primary: Vector3<f64>,
    primary_axis: Axis,
    secondary: Vector3<f64>,
    secondary_axis: Axis,
) -> Option<UnitQuaternion<f64>> {
    let mut v0 = primary;
    let mut v1 = secondary;
    if primary_axis.is_negative() {
        v0 = -v0;
    }
    if secondary_axis.is_negative() {
        v1 = -v1;
    }

    let v0 = v0.try_normalize(0.0)?;
    let v1 = v1.try_normalize(0.0)?;

    let v2 = v0.cross(&v1);
    if v2.norm() < TWO_VECTOR_TOLERANCE {
        return None;
    }
    let mut v2 = v2.normalize();
    let v1 = v2.cross(&v0);

    let primary_index = primary_axis.index();
    let secondary_index = secondary_axis.index();
    let tertiary_index = 3 - primary_index - secondary_index;

    // (primary, secondary, tertiary) must be a cyclic permutation of (x, y, z)
    if (tertiary_index + 1) % 3 != primary_index {
        v2 = -v2;
    }

    let mut axes = [Vector3::zeros(); 3];
    axes[primary_index] = v0;
    axes[secondary_index] = v1;
    axes[tertiary_index] = v2;

    let m = Matrix3::from_rows(&[axes[0].transpose(), axes[1].transpose(), axes[2].transpose()]);
    Some(UnitQuaternion::from_rotation_matrix(
        &Rotation3::from_matrix_unchecked(m),
    ))
}

impl TwoVectorFrame {
    /// Return
    /// ----------
    /// * [`StarframeError::InvalidFrameAxes`] if both vectors are assigned to the same axis
    pub fn new(
        primary: FrameVector,
        primary_axis: Axis,
        secondary: FrameVector,
        secondary_axis: Axis,
    ) -> Result<Self, StarframeError> {
        if primary_axis.index() == secondary_axis.index() {
            return Err(StarframeError::InvalidFrameAxes(format!(
                "primary {primary_axis:?} and secondary {secondary_axis:?} share an axis"
            )));
        }
        Ok(TwoVectorFrame {
            primary,
            primary_axis,
            secondary,
            secondary_axis,
        })
    }

    /// Orientation at `t`; identity when the two directions are collinear.
    pub fn try_orientation(&self, t: JulianDay) -> Result<UnitQuaternion<f64>, StarframeError> {
        let v0 = self.primary.try_direction(t)?;
        let v1 = self.secondary.try_direction(t)?;

        Ok(
            basis_from_directions(v0, self.primary_axis, v1, self.secondary_axis)
                .unwrap_or_else(|| {
                    trace!("degenerate two-vector frame at t = {t}, using identity");
                    UnitQuaternion::identity()
                }),
        )
    }
}
