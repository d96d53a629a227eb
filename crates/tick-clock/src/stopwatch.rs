//! Elapsed-time measurement on top of a [`MonotonicClock`].

use std::time::Duration;

use thiserror::Error;

use crate::clock::{system_clock, MonotonicClock, SystemClock};
use crate::tick::Tick;

/// Error from starting or stopping a [`Stopwatch`] in the wrong state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchError {
    /// `start` was called while already running.
    #[error("stopwatch is already running")]
    AlreadyRunning,
    /// `stop` was called while not running.
    #[error("stopwatch is not running")]
    NotRunning,
}

/// Measures elapsed time across one or more start/stop intervals.
///
/// The stopwatch reads ticks from the clock it was built with, so tests
/// can drive it deterministically through a
/// [`ManualClock`](crate::manual::ManualClock) while production code uses
/// [`Stopwatch::system`]. Interval arithmetic uses wrapped tick
/// differences, so measurements stay correct across the tick rollover
/// boundary.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tick_clock::{ManualClock, Stopwatch, Tick};
///
/// let clock = ManualClock::new(Tick::from_nanos(0));
/// let mut watch = Stopwatch::started(clock.clone());
/// clock.advance(Duration::from_millis(3));
/// watch.stop().unwrap();
/// assert_eq!(watch.elapsed(), Duration::from_millis(3));
/// ```
#[derive(Debug)]
pub struct Stopwatch<C: MonotonicClock> {
    clock: C,
    accumulated_nanos: i64,
    started_at: Option<Tick>,
}

impl Stopwatch<&'static SystemClock> {
    /// Creates a stopped stopwatch on the process-wide [`SystemClock`].
    #[must_use]
    pub fn system() -> Self {
        Self::new(system_clock())
    }
}

impl<C: MonotonicClock> Stopwatch<C> {
    /// Creates a stopped stopwatch with zero elapsed time.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            accumulated_nanos: 0,
            started_at: None,
        }
    }

    /// Creates a stopwatch that is already running.
    #[must_use]
    pub fn started(clock: C) -> Self {
        let mut watch = Self::new(clock);
        watch.started_at = Some(watch.clock.read());
        watch
    }

    /// Begins a new interval.
    ///
    /// # Errors
    ///
    /// Returns [`StopwatchError::AlreadyRunning`] if an interval is open.
    pub fn start(&mut self) -> Result<(), StopwatchError> {
        if self.started_at.is_some() {
            return Err(StopwatchError::AlreadyRunning);
        }
        self.started_at = Some(self.clock.read());
        Ok(())
    }

    /// Ends the open interval, adding it to the accumulated total.
    ///
    /// # Errors
    ///
    /// Returns [`StopwatchError::NotRunning`] if no interval is open.
    pub fn stop(&mut self) -> Result<(), StopwatchError> {
        let started = self.started_at.take().ok_or(StopwatchError::NotRunning)?;
        let span = self.clock.read().nanos_since(started).max(0);
        self.accumulated_nanos = self.accumulated_nanos.saturating_add(span);
        Ok(())
    }

    /// Stops the stopwatch (if running) and zeroes the accumulated time.
    pub fn reset(&mut self) {
        self.accumulated_nanos = 0;
        self.started_at = None;
    }

    /// Returns true while an interval is open.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns the accumulated time plus any open interval, in nanoseconds.
    ///
    /// An open interval during which the clock moved backwards counts as
    /// zero rather than going negative.
    #[must_use]
    pub fn elapsed_nanos(&self) -> i64 {
        let in_flight = match self.started_at {
            Some(started) => self.clock.read().nanos_since(started).max(0),
            None => 0,
        };
        self.accumulated_nanos.saturating_add(in_flight)
    }

    /// Returns [`elapsed_nanos`](Self::elapsed_nanos) as a [`Duration`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos() as u64)
    }
}
