//! Monotonic time source used to anchor play cycles.
//!
//! Timestamps are plain milliseconds on a monotonic timeline. "Not yet
//! anchored" is always expressed as `Option<Timestamp>`, so a timestamp of
//! zero is a legitimate reading and never a sentinel.

use std::cell::Cell;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// A reading from a monotonic clock, in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(u64);

impl Timestamp {
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`; zero if the clock reads earlier than `earlier`.
    #[inline]
    pub fn saturating_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn add_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

/// Source of monotonic timestamps.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock backed monotonic clock measuring uptime since its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.start.elapsed().as_millis() as u64)
    }
}

/// Clock driven by hand. Hosts that receive frame timestamps from their
/// compositor (and tests) advance it explicitly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn starting_at(millis: u64) -> Self {
        Self {
            now: Cell::new(Timestamp(millis)),
        }
    }

    pub fn set(&self, millis: u64) {
        self.now.set(Timestamp(millis));
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().add_millis(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_since_never_underflows() {
        let later = Timestamp::from_millis(10);
        let earlier = Timestamp::from_millis(4);
        assert_eq!(later.saturating_since(earlier), 6);
        assert_eq!(earlier.saturating_since(later), 0);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::starting_at(100);
        assert_eq!(clock.now(), Timestamp::from_millis(100));
        clock.advance(250);
        assert_eq!(clock.now().as_millis(), 350);
        clock.set(0);
        assert_eq!(clock.now(), Timestamp::from_millis(0));
    }

    #[test]
    fn manual_clock_saturates_at_the_end_of_time() {
        let clock = ManualClock::starting_at(u64::MAX - 5);
        clock.advance(10);
        assert_eq!(clock.now().as_millis(), u64::MAX);
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
