use nalgebra::Vector3;

use crate::{
    constants::{Days, JulianDay, Kilometer},
    time_cache::TimeCache,
};

use super::OrbitSource;

/// Memoizes the most recent position of an expensive [`OrbitSource`].
///
/// Within one rendered frame the same body position is typically requested many times at the
/// same instant; only the first request reaches the source. The cache holds a single
/// `(t, position)` pair and hits on bit-exact time equality only.
#[derive(Debug, Clone)]
pub struct CachingOrbit<S> {
    source: S,
    last_position: TimeCache<Vector3<Kilometer>>,
}

impl<S: OrbitSource> CachingOrbit<S> {
    pub fn new(source: S) -> Self {
        CachingOrbit {
            source,
            last_position: TimeCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn position_at_time(&self, t: JulianDay) -> Vector3<Kilometer> {
        self.last_position
            .get_or_compute(t, || self.source.compute_position(t))
    }

    /// Velocity in km/day. Not cached.
    pub fn velocity_at_time(&self, t: JulianDay) -> Vector3<f64> {
        self.source.compute_velocity(t)
    }

    pub fn period(&self) -> Days {
        self.source.period()
    }

    pub fn bounding_radius(&self) -> Kilometer {
        self.source.bounding_radius()
    }

    pub fn is_periodic(&self) -> bool {
        self.source.is_periodic()
    }

    pub fn valid_range(&self) -> Option<(JulianDay, JulianDay)> {
        self.source.valid_range()
    }
}

#[cfg(test)]
mod test_caching_orbit {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl OrbitSource for CountingSource {
        fn compute_position(&self, t: JulianDay) -> Vector3<Kilometer> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Vector3::new(t.sin(), t.cos(), t)
        }

        fn period(&self) -> Days {
            0.0
        }

        fn bounding_radius(&self) -> Kilometer {
            1.0
        }
    }

    #[test]
    fn test_same_time_hits_cache() {
        let orbit = CachingOrbit::new(CountingSource {
            calls: AtomicUsize::new(0),
        });

        let p1 = orbit.position_at_time(2_451_545.25);
        let p2 = orbit.position_at_time(2_451_545.25);

        assert_eq!(p1, p2);
        assert_eq!(orbit.source().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_other_time_recomputes() {
        let orbit = CachingOrbit::new(CountingSource {
            calls: AtomicUsize::new(0),
        });

        orbit.position_at_time(1.0);
        orbit.position_at_time(1.0 + f64::EPSILON);
        orbit.position_at_time(1.0);

        assert_eq!(orbit.source().calls.load(Ordering::SeqCst), 3);
    }
}
