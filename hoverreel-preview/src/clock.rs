//! Time sources.
//!
//! Controllers never read a clock themselves; every entry point takes the
//! frame timestamp as `now`. Drivers pick the provider: the system clock in
//! production, [`VirtualTimeProvider`] in tests and scenario replays.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub trait TimeProvider: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same timeline.
#[derive(Debug, Clone)]
pub struct VirtualTimeProvider {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl Default for VirtualTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }

    pub fn advance(&self, by: Duration) -> Instant {
        let mut elapsed = self.elapsed.lock();
        *elapsed += by;
        self.origin + *elapsed
    }

    /// Move forward to `instant`. Never moves backwards.
    pub fn advance_to(&self, instant: Instant) -> Instant {
        let target = instant.saturating_duration_since(self.origin);
        let mut elapsed = self.elapsed.lock();
        if target > *elapsed {
            *elapsed = target;
        }
        self.origin + *elapsed
    }
}

impl TimeProvider for VirtualTimeProvider {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}
