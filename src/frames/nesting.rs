//! Advisory depth of a frame graph.
//!
//! The walk follows, for each frame, the frames its center and target objects are placed in
//! and oriented by, counting one level per frame. It stops as soon as the depth exceeds the
//! caller's bound, so it terminates on cyclic graphs and reports a depth above the bound for
//! them.

use crate::selection::Selection;

use super::{FrameKind, FrameType, ReferenceFrame};

/// Depth reached by following the frames of `selection`.
///
/// Bodies contribute their orbit frame for [`FrameType::Position`] and their body frame for
/// [`FrameType::Orientation`]; a location contributes the frames of its parent body; stars
/// and deep sky objects end the walk.
pub fn selection_frame_depth(
    selection: &Selection,
    depth: usize,
    max_depth: usize,
    frame_type: FrameType,
) -> usize {
    if depth > max_depth {
        return depth;
    }

    let body = match selection {
        Selection::Body(body) => body.clone(),
        Selection::Location(location) => location.parent().clone(),
        _ => return depth,
    };

    match frame_type {
        FrameType::Position => {
            body.orbit_frame()
                .nesting_depth_from(depth + 1, max_depth, FrameType::Position)
        }
        FrameType::Orientation => {
            body.body_frame()
                .nesting_depth_from(depth + 1, max_depth, FrameType::Orientation)
        }
    }
}

impl ReferenceFrame {
    /// Depth of the frame graph below this frame, up to `max_depth`.
    ///
    /// The check is advisory: evaluation itself is bounded by
    /// [`crate::frames::eval_guard::EvalGuard`]. A result greater than `max_depth` means the
    /// walk was cut short, either because the graph is that deep or because it is cyclic.
    pub fn nesting_depth(&self, max_depth: usize, frame_type: FrameType) -> usize {
        self.nesting_depth_from(0, max_depth, frame_type)
    }

    pub(crate) fn nesting_depth_from(
        &self,
        depth: usize,
        max_depth: usize,
        frame_type: FrameType,
    ) -> usize {
        match &self.kind {
            FrameKind::J2000Ecliptic | FrameKind::J2000Equator => {
                selection_frame_depth(&self.center, depth, max_depth, frame_type)
            }
            FrameKind::BodyFixed { target } | FrameKind::BodyMeanEquator { target, .. } => {
                let n = selection_frame_depth(&self.center, depth, max_depth, FrameType::Position);
                if n > max_depth {
                    return n;
                }
                n.max(selection_frame_depth(
                    target,
                    depth,
                    max_depth,
                    FrameType::Orientation,
                ))
            }
            FrameKind::TwoVector(two_vector) => {
                let n = selection_frame_depth(&self.center, depth, max_depth, FrameType::Position);
                if n > max_depth {
                    return n;
                }
                let m = two_vector.primary.nesting_depth(depth, max_depth);
                if m > max_depth {
                    return m;
                }
                n.max(m)
                    .max(two_vector.secondary.nesting_depth(depth, max_depth))
            }
        }
    }
}
