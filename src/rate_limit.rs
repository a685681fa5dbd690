//! Minimum-interval limiter for calls to external APIs.
//!
//! Each caller books the next free slot; slots are `min_interval` apart.
//! There is no retry or backoff here.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, Arc::new(SystemClock))
    }

    pub fn with_clock(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
            clock,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Book the next slot and return how long the caller must wait for it.
    pub fn reserve(&self) -> Duration {
        let now = self.clock.now();
        let mut next_slot = self.next_slot.lock();
        let start = match *next_slot {
            Some(slot) if slot > now => slot,
            _ => now,
        };
        *next_slot = Some(start + self.min_interval);
        start.saturating_duration_since(now)
    }

    /// Block the current thread until a slot is free.
    pub fn throttle(&self) {
        let wait = self.reserve();
        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "rate limited");
            std::thread::sleep(wait);
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
