// SPDX-License-Identifier: MIT
//
// Repaint throttle.

use std::time::{Duration, Instant};

/// Elapsed-time gate on the monotonic clock.
///
/// `fire` returns `true` when more than `interval` has passed since the
/// last time it returned `true` (or since construction), and restarts the
/// interval when it does.
///
/// ```
/// use std::time::{Duration, Instant};
/// use pk_ui::timer::RefreshTimer;
///
/// let start = Instant::now();
/// let mut timer = RefreshTimer::starting_at(Duration::from_millis(100), start);
/// assert!(!timer.fire_at(start + Duration::from_millis(50)));
/// assert!(timer.fire_at(start + Duration::from_millis(150)));
/// assert!(!timer.fire_at(start + Duration::from_millis(200)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RefreshTimer {
    interval: Duration,
    last_fire: Instant,
}

impl RefreshTimer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    /// A timer whose first interval starts at `start`.
    #[must_use]
    pub const fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_fire: start,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Check against the current time.
    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    /// Check against `now`. An instant earlier than the last fire counts as
    /// zero elapsed time.
    pub fn fire_at(&mut self, now: Instant) -> bool {
        let due = now.saturating_duration_since(self.last_fire) > self.interval;
        if due {
            self.last_fire = now;
        }
        due
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn quiet_within_interval() {
        let start = Instant::now();
        let mut timer = RefreshTimer::starting_at(MS * 100, start);
        assert!(!timer.fire_at(start));
        assert!(!timer.fire_at(start + MS * 99));
    }

    #[test]
    fn exactly_the_interval_does_not_fire() {
        let start = Instant::now();
        let mut timer = RefreshTimer::starting_at(MS * 100, start);
        assert!(!timer.fire_at(start + MS * 100));
        assert!(timer.fire_at(start + MS * 101));
    }

    #[test]
    fn fires_once_then_restarts() {
        let start = Instant::now();
        let mut timer = RefreshTimer::starting_at(MS * 100, start);
        assert!(timer.fire_at(start + MS * 120));
        assert!(!timer.fire_at(start + MS * 121));
        assert!(!timer.fire_at(start + MS * 220));
        assert!(timer.fire_at(start + MS * 221));
    }

    #[test]
    fn zero_interval_fires_on_any_progress() {
        let start = Instant::now();
        let mut timer = RefreshTimer::starting_at(Duration::ZERO, start);
        assert!(!timer.fire_at(start));
        assert!(timer.fire_at(start + MS));
    }

    #[test]
    fn earlier_instant_does_not_fire() {
        let start = Instant::now() + MS * 10;
        let mut timer = RefreshTimer::starting_at(MS, start);
        assert!(!timer.fire_at(start - MS * 5));
    }
}
