//! One-slot memo keyed on an exact query time.
//!
//! A [`TimeCache`] remembers the last `(t, value)` pair stored in it. A lookup hits only when
//! the requested time has the same bit pattern as the stored one: there is no tolerance
//! window, so any other time, however close, misses.
//!
//! The slot is guarded by a [`Mutex`] so cached objects can be shared between threads. The
//! lock is only held to read or write the slot, never while the value is computed: a
//! computation that recursively queries the same cache (a cyclic frame graph) cannot
//! deadlock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::constants::JulianDay;

#[derive(Debug)]
pub struct TimeCache<T: Copy> {
    slot: Mutex<Option<(u64, T)>>,
}

impl<T: Copy> TimeCache<T> {
    pub fn new() -> Self {
        TimeCache {
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<(u64, T)>> {
        // the slot holds plain data, a panic elsewhere cannot leave it half written
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value for exactly `t`, if any.
    pub fn get(&self, t: JulianDay) -> Option<T> {
        match *self.lock() {
            Some((bits, value)) if bits == t.to_bits() => Some(value),
            _ => None,
        }
    }

    /// Replace the cached pair.
    pub fn store(&self, t: JulianDay, value: T) {
        *self.lock() = Some((t.to_bits(), value));
    }

    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Return the cached value for `t`, or compute, store and return it.
    pub fn get_or_compute<F>(&self, t: JulianDay, compute: F) -> T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(t) {
            return value;
        }
        let value = compute();
        self.store(t, value);
        value
    }

    /// Fallible form of [`Self::get_or_compute`]; errors are not cached.
    pub fn try_get_or_compute<F, E>(&self, t: JulianDay, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get(t) {
            return Ok(value);
        }
        let value = compute()?;
        self.store(t, value);
        Ok(value)
    }
}

impl<T: Copy> Default for TimeCache<T> {
    fn default() -> Self {
        TimeCache::new()
    }
}

impl<T: Copy> Clone for TimeCache<T> {
    fn clone(&self) -> Self {
        TimeCache {
            slot: Mutex::new(*self.lock()),
        }
    }
}
