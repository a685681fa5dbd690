use std::sync::Arc;
use std::time::Duration;

use sky_globe::clock::ManualClock;
use sky_globe::rate_limit::{RateLimiter, DEFAULT_MIN_INTERVAL};

fn limiter() -> (RateLimiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (RateLimiter::with_clock(DEFAULT_MIN_INTERVAL, clock.clone()), clock)
}

#[test]
fn test_first_request_goes_straight_through() {
    let (rl, _) = limiter();
    assert_eq!(rl.reserve(), Duration::ZERO);
}

#[test]
fn test_back_to_back_requests_queue_up() {
    let (rl, _) = limiter();
    assert_eq!(rl.reserve(), Duration::ZERO);
    assert_eq!(rl.reserve(), Duration::from_secs(1));
    assert_eq!(rl.reserve(), Duration::from_secs(2));
}

#[test]
fn test_partial_wait() {
    let (rl, clock) = limiter();
    rl.reserve();
    clock.advance(Duration::from_millis(400));
    assert_eq!(rl.reserve(), Duration::from_millis(600));
}

#[test]
fn test_idle_period_resets() {
    let (rl, clock) = limiter();
    rl.reserve();
    rl.reserve();
    clock.advance(Duration::from_secs(5));
    assert_eq!(rl.reserve(), Duration::ZERO);
}

#[test]
fn test_zero_interval_never_blocks() {
    let rl = RateLimiter::new(Duration::ZERO);
    for _ in 0..10 {
        rl.throttle();
    }
    assert_eq!(rl.min_interval(), Duration::ZERO);
}
