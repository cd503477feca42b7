//! Move clocks and the search deadline.
//!
//! An agent is handed a [`Clock`] for the current turn. Searches wrap it in a
//! [`Deadline`] and call [`Deadline::check`] on entry to every recursive
//! function; once the remaining time drops below the threshold the check
//! fails and the whole search unwinds.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Source of "milliseconds left in this turn".
pub trait Clock {
    fn remaining_ms(&self) -> f64;
}

impl<F> Clock for F
where
    F: Fn() -> f64,
{
    fn remaining_ms(&self) -> f64 {
        self()
    }
}

/// Raised by [`Deadline::check`] when the turn is about to expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search deadline reached")]
pub struct SearchTimeout;

/// A clock plus the safety margin at which searching must stop.
#[derive(Clone, Copy)]
pub struct Deadline<'a> {
    clock: &'a dyn Clock,
    threshold_ms: f64,
}

impl<'a> Deadline<'a> {
    pub fn new(clock: &'a dyn Clock, threshold_ms: f64) -> Self {
        Self {
            clock,
            threshold_ms,
        }
    }

    /// Fails once fewer than `threshold_ms` milliseconds remain.
    #[inline]
    pub fn check(&self) -> Result<(), SearchTimeout> {
        if self.clock.remaining_ms() < self.threshold_ms {
            Err(SearchTimeout)
        } else {
            Ok(())
        }
    }
}

/// Wall-clock turn timer.
///
/// Cheap to clone; clones share the stop flag, so another thread can end the
/// turn early with [`TimeControl::stop`].
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Instant,
    /// None = infinite
    time_limit: Option<Duration>,
}

impl TimeControl {
    /// Creates a timer that starts running immediately.
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Instant::now(),
            time_limit,
        }
    }

    pub fn with_millis(millis: u64) -> Self {
        Self::new(Some(Duration::from_millis(millis)))
    }

    /// Restart the clock for a new turn.
    pub fn restart(&mut self) {
        self.start_time = Instant::now();
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force the clock to report no time left.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Clock for TimeControl {
    /// Negative once the limit has passed, so overruns stay visible.
    fn remaining_ms(&self) -> f64 {
        if self.is_stopped() {
            return 0.0;
        }
        match self.time_limit {
            Some(limit) => (limit.as_secs_f64() - self.elapsed().as_secs_f64()) * 1000.0,
            None => f64::INFINITY,
        }
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
