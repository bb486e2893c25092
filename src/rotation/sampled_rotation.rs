//! Orientation interpolated from a track of time-stamped keyframes.

use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::{constants::JulianDay, starframe_errors::StarframeError};

/// One keyframe of a sampled rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSample {
    /// TDB Julian date
    pub t: JulianDay,
    pub orientation: UnitQuaternion<f64>,
}

/// Keyframe-sampled orientation.
///
/// Lookups remember the last bracketing index: a simulation clock moving forward usually
/// falls in the same or the next interval, which is checked before falling back to a
/// binary search. Between keyframes the orientation is slerped; outside the track the
/// nearest keyframe is returned.
#[derive(Debug)]
pub struct SampledRotation {
    samples: Vec<RotationSample>,
    last_index: AtomicUsize,
}

impl Clone for SampledRotation {
    fn clone(&self) -> Self {
        SampledRotation {
            samples: self.samples.clone(),
            last_index: AtomicUsize::new(self.last_index.load(Ordering::Relaxed)),
        }
    }
}

impl SampledRotation {
    /// Build a track from keyframes sorted by time.
    ///
    /// Return
    /// ----------
    /// * [`StarframeError::InvalidSample`] for an empty track, non-finite times or times that
    ///   do not increase
    pub fn new(samples: Vec<RotationSample>) -> Result<Self, StarframeError> {
        if samples.is_empty() {
            return Err(StarframeError::InvalidSample(
                "a sampled rotation needs at least one keyframe".into(),
            ));
        }
        if let Some(bad) = samples.iter().find(|s| !s.t.is_finite()) {
            return Err(StarframeError::InvalidSample(format!(
                "keyframe time {} is not finite",
                bad.t
            )));
        }
        if let Some(pair) = samples.windows(2).find(|w| w[1].t <= w[0].t) {
            return Err(StarframeError::InvalidSample(format!(
                "keyframe at {} does not follow {}",
                pair[1].t, pair[0].t
            )));
        }

        Ok(SampledRotation {
            samples,
            last_index: AtomicUsize::new(0),
        })
    }

    pub fn samples(&self) -> &[RotationSample] {
        &self.samples
    }

    pub fn valid_range(&self) -> (JulianDay, JulianDay) {
        // non-empty by construction
        let first = self.samples.first().map_or(0.0, |s| s.t);
        let last = self.samples.last().map_or(0.0, |s| s.t);
        (first, last)
    }

    /// Index `i` such that `samples[i].t <= t < samples[i + 1].t`, with `t` strictly inside
    /// the track.
    fn bracket(&self, t: JulianDay) -> usize {
        let s = &self.samples;
        let brackets = |i: usize| i + 1 < s.len() && s[i].t <= t && t < s[i + 1].t;

        let last = self.last_index.load(Ordering::Relaxed);
        let index = if brackets(last) {
            last
        } else if brackets(last + 1) {
            last + 1
        } else {
            s.partition_point(|sample| sample.t <= t).saturating_sub(1)
        };

        self.last_index.store(index, Ordering::Relaxed);
        index
    }

    pub fn orientation_at_time(&self, t: JulianDay) -> UnitQuaternion<f64> {
        let s = &self.samples;
        let (Some(first), Some(last)) = (s.first(), s.last()) else {
            return UnitQuaternion::identity();
        };

        if t <= first.t || s.len() == 1 {
            return first.orientation;
        }
        if t >= last.t {
            return last.orientation;
        }

        let i = self.bracket(t);
        let (q0, q1) = (&s[i], &s[i + 1]);
        let a = (t - q0.t) / (q1.t - q0.t);

        q0.orientation
            .try_slerp(&q1.orientation, a, 1.0e-12)
            .unwrap_or(q0.orientation)
    }
}
