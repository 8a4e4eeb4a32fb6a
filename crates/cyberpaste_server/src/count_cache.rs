//! Cached active-paste count fed by the core's stale signal.

use cyberpaste_core::StaleNotifier;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Upper bound on how long a cached count is served. Pastes expire by time
/// alone, without any mutation firing the stale signal, so the event-driven
/// dirty flag cannot be the only freshness source.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(5);

struct CachedCount {
    value: u64,
    refreshed_at: Instant,
}

/// Active-count cache invalidated by [`StaleNotifier`] events and bounded
/// by a max age. A stale signal lost while a refresh is in flight only
/// pins the old value until the max age lapses.
pub struct CountCache {
    dirty: AtomicBool,
    cached: Mutex<Option<CachedCount>>,
    max_age: Duration,
}

impl Default for CountCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}

impl CountCache {
    /// Create an empty cache serving values for at most `max_age`.
    pub fn new(max_age: Duration) -> Self {
        Self {
            dirty: AtomicBool::new(false),
            cached: Mutex::new(None),
            max_age,
        }
    }

    /// Currently served value, if the cache is neither dirty nor aged out.
    pub fn fresh_value(&self) -> Option<u64> {
        if self.dirty.load(Ordering::Acquire) {
            return None;
        }
        let cached = self.cached.lock().ok()?;
        cached
            .as_ref()
            .filter(|entry| entry.refreshed_at.elapsed() < self.max_age)
            .map(|entry| entry.value)
    }

    /// Record a freshly computed count.
    pub fn store(&self, value: u64) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(CachedCount {
                value,
                refreshed_at: Instant::now(),
            });
        }
        self.dirty.store(false, Ordering::Release);
    }
}

impl StaleNotifier for CountCache {
    fn notify_stale(&self) {
        self.dirty.store(true, Ordering::Release);
    }
}
