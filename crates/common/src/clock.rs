//! Clock abstraction for wall-clock dwell timing.
//!
//! Blink holds, face-loss timeouts and calibration windows are all measured
//! in wall-clock time. The controller reads time through [`Clock`] so that:
//! - live use runs on a monotonic [`SystemClock`]
//! - tests and trace replays run on a [`ManualClock`] advanced explicitly

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of monotonic time in nanoseconds since an arbitrary epoch.
pub trait Clock: Send + Sync {
    /// Nanoseconds elapsed since the clock's epoch.
    fn now_ns(&self) -> u64;

    /// Block the caller for `duration` (a manual clock just advances).
    fn sleep(&self, duration: Duration);

    /// Seconds elapsed since the clock's epoch.
    fn now_secs(&self) -> f64 {
        ns_to_secs(self.now_ns())
    }
}

/// A monotonic clock anchored to the moment it was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SystemClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at clock start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

impl Clock for SystemClock {
    fn now_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ns: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at a given time.
    pub fn at_ns(start_ns: u64) -> Self {
        Self {
            now_ns: AtomicU64::new(start_ns),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, duration: Duration) {
        self.now_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Move the clock forward by fractional seconds.
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    /// Jump to `ns` if it is later than the current time; never goes back.
    pub fn advance_to_ns(&self, ns: u64) {
        self.now_ns.fetch_max(ns, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Convert a nanosecond value to seconds.
pub fn ns_to_secs(ns: u64) -> f64 {
    ns as f64 / 1_000_000_000.0
}

/// Convert seconds to nanoseconds.
pub fn secs_to_ns(secs: f64) -> u64 {
    (secs * 1_000_000_000.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_elapsed() {
        let clock = SystemClock::start();
        // Should be very small but non-negative
        assert!(clock.now_ns() < 1_000_000_000);
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
        assert_eq!(secs_to_ns(2.0), 2_000_000_000);
    }

    #[test]
    fn test_manual_clock_sleep_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ns(), 0);
        clock.sleep(Duration::from_millis(100));
        assert_eq!(clock.now_ns(), 100_000_000);
        clock.advance_secs(0.25);
        assert!((clock.now_secs() - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::at_ns(5_000);
        clock.advance_to_ns(1_000);
        assert_eq!(clock.now_ns(), 5_000);
        clock.advance_to_ns(9_000);
        assert_eq!(clock.now_ns(), 9_000);
    }
}
