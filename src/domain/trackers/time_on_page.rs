//! Dwell-time measurement for one page load.

use std::time::{Duration, Instant};

/// Default period between interval flushes.
pub const DEFAULT_FLUSH_PERIOD: Duration = Duration::from_secs(120);

/// Why a time measurement is being taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushReason {
    Hidden,
    Unload,
    Interval,
    Teardown,
}

/// Tracks seconds since the page opened.
///
/// A measurement is only emitted when it is strictly greater than the last
/// emitted one, so repeated hide/show cycles inside the same second or an
/// interval tick right after an unload produce nothing.
///
/// Interval flushes follow the page's own schedule: they are due at
/// `started + k * period` for `k >= 1`, whatever the sweeper's cadence.
#[derive(Debug)]
pub struct TimeOnPageTracker {
    started: Instant,
    period: Duration,
    next_due: Instant,
    last_reported: u64,
}

impl TimeOnPageTracker {
    pub fn start_at(started: Instant) -> Self {
        Self::with_period(started, DEFAULT_FLUSH_PERIOD)
    }

    /// A zero `period` is raised to one second.
    pub fn with_period(started: Instant, period: Duration) -> Self {
        let period = period.max(Duration::from_secs(1));
        Self {
            started,
            period,
            next_due: started + period,
            last_reported: 0,
        }
    }

    /// Whether an interval flush is due at `now`.
    pub fn interval_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    pub fn last_reported(&self) -> u64 {
        self.last_reported
    }

    /// Whole seconds elapsed at `now`, rounded to the nearest second.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        let millis = now.saturating_duration_since(self.started).as_millis();
        ((millis + 500) / 1000) as u64
    }

    /// Takes a measurement, returning the seconds to report if it advanced.
    ///
    /// [`FlushReason::Interval`] only measures once the page's next interval
    /// is due, and then moves the schedule past `now`.
    pub fn flush(&mut self, reason: FlushReason, now: Instant) -> Option<u64> {
        if reason == FlushReason::Interval {
            if !self.interval_due(now) {
                return None;
            }
            while self.next_due <= now {
                self.next_due += self.period;
            }
        }

        let seconds = self.elapsed_secs(now);
        if seconds > self.last_reported {
            self.last_reported = seconds;
            Some(seconds)
        } else {
            None
        }
    }
}
