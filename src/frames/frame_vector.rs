//! Time-dependent directions used to build two-vector frames.

use std::sync::Arc;

use nalgebra::Vector3;

use crate::{constants::JulianDay, selection::Selection, starframe_errors::StarframeError};

use super::{nesting::selection_frame_depth, FrameType, ReferenceFrame};

/// A direction evaluated at a given time, in universal (ecliptic) axes.
///
/// The frame of a `ConstantVector` is shared: cloning a `FrameVector` clones the `Arc`, and
/// the frame is dropped with its last handle.
#[derive(Debug, Clone)]
pub enum FrameVector {
    /// From `observer` to `target`
    RelativePosition {
        observer: Selection,
        target: Selection,
    },
    /// Velocity of `target` relative to `observer`
    RelativeVelocity {
        observer: Selection,
        target: Selection,
    },
    /// A fixed vector, expressed in `frame` when one is given, in universal axes otherwise
    ConstantVector {
        vector: Vector3<f64>,
        frame: Option<Arc<ReferenceFrame>>,
    },
}

impl FrameVector {
    pub fn relative_position(observer: Selection, target: Selection) -> Self {
        FrameVector::RelativePosition { observer, target }
    }

    pub fn relative_velocity(observer: Selection, target: Selection) -> Self {
        FrameVector::RelativeVelocity { observer, target }
    }

    pub fn constant(vector: Vector3<f64>, frame: Option<Arc<ReferenceFrame>>) -> Self {
        FrameVector::ConstantVector { vector, frame }
    }

    /// Direction at `t` (not normalized).
    pub fn try_direction(&self, t: JulianDay) -> Result<Vector3<f64>, StarframeError> {
        match self {
            FrameVector::RelativePosition { observer, target } => {
                Ok(target.try_position(t)? - observer.try_position(t)?)
            }
            FrameVector::RelativeVelocity { observer, target } => {
                Ok(target.try_velocity(t)? - observer.try_velocity(t)?)
            }
            FrameVector::ConstantVector { vector, frame: None } => Ok(*vector),
            FrameVector::ConstantVector {
                vector,
                frame: Some(frame),
            } => Ok(frame.try_orientation(t)?.inverse() * vector),
        }
    }

    /// Depth of the frames this vector depends on, see [`ReferenceFrame::nesting_depth`].
    pub fn nesting_depth(&self, depth: usize, max_depth: usize) -> usize {
        match self {
            FrameVector::RelativePosition { observer, target }
            | FrameVector::RelativeVelocity { observer, target } => {
                let n = selection_frame_depth(observer, depth, max_depth, FrameType::Position);
                if n > max_depth {
                    return n;
                }
                n.max(selection_frame_depth(target, depth, max_depth, FrameType::Position))
            }
            FrameVector::ConstantVector { frame: None, .. } => depth,
            FrameVector::ConstantVector {
                frame: Some(frame), ..
            } => frame.nesting_depth_from(depth + 1, max_depth, FrameType::Orientation),
        }
    }
}
