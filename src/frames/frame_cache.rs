use nalgebra::{UnitQuaternion, Vector3};

use crate::time_cache::TimeCache;

/// Per-frame memo of the last orientation and the last angular velocity.
///
/// The two slots are independent: each is keyed on its own last query time, and filling one
/// never fills or invalidates the other.
#[derive(Debug, Clone, Default)]
pub struct FrameCache {
    pub orientation: TimeCache<UnitQuaternion<f64>>,
    pub angular_velocity: TimeCache<Vector3<f64>>,
}

impl FrameCache {
    pub fn new() -> Self {
        FrameCache {
            orientation: TimeCache::new(),
            angular_velocity: TimeCache::new(),
        }
    }

    pub fn invalidate(&self) {
        self.orientation.invalidate();
        self.angular_velocity.invalidate();
    }
}

#[cfg(test)]
mod test_frame_cache {
    use super::*;

    #[test]
    fn test_slots_are_independent() {
        let cache = FrameCache::new();
        cache.orientation.store(5.0, UnitQuaternion::identity());

        assert!(cache.orientation.get(5.0).is_some());
        assert!(cache.angular_velocity.get(5.0).is_none());

        cache.angular_velocity.store(6.0, Vector3::x());
        assert!(cache.orientation.get(5.0).is_some());
        assert!(cache.orientation.get(6.0).is_none());

        cache.invalidate();
        assert!(cache.angular_velocity.get(6.0).is_none());
    }
}
