//! A hand-driven clock for deterministic tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::clock::MonotonicClock;
use crate::tick::Tick;

/// A [`MonotonicClock`] whose time only moves when told to.
///
/// Clones share one timeline, so a test can hand a clone to the code under
/// test and keep another to drive time forward. All operations are atomic;
/// no locks are taken on any path.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tick_clock::{ManualClock, MonotonicClock, Tick};
///
/// let clock = ManualClock::new(Tick::from_nanos(0));
/// let start = clock.read();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.read().nanos_since(start), 250_000_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    now: AtomicI64,
    auto_step: AtomicI64,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub fn new(start: Tick) -> Self {
        Self {
            inner: Arc::new(Inner {
                now: AtomicI64::new(start.as_nanos()),
                auto_step: AtomicI64::new(0),
            }),
        }
    }

    /// Sets the clock to an absolute tick.
    pub fn set(&self, now: Tick) {
        self.inner.now.store(now.as_nanos(), Ordering::Release);
    }

    /// Moves the clock forward by `by`.
    ///
    /// # Panics
    ///
    /// Panics if `by` exceeds `i64::MAX` nanoseconds.
    pub fn advance(&self, by: Duration) {
        let nanos = i64::try_from(by.as_nanos()).expect("advance exceeds i64 nanoseconds");
        self.advance_nanos(nanos);
    }

    /// Moves the clock by a signed nanosecond offset, wrapping at the
    /// tick rollover boundary. Negative offsets move time backwards.
    pub fn advance_nanos(&self, nanos: i64) {
        let previous = self.inner.now.fetch_add(nanos, Ordering::AcqRel);
        trace!(nanos, previous, "manual clock advanced");
    }

    /// Makes every [`read`](MonotonicClock::read) step the clock by `step`
    /// after returning the pre-step tick. A zero step turns auto-advance
    /// off again.
    ///
    /// # Panics
    ///
    /// Panics if `step` exceeds `i64::MAX` nanoseconds.
    pub fn set_auto_advance(&self, step: Duration) {
        let nanos =
            i64::try_from(step.as_nanos()).expect("auto-advance step exceeds i64 nanoseconds");
        self.inner.auto_step.store(nanos, Ordering::Release);
    }
}

impl MonotonicClock for ManualClock {
    fn read(&self) -> Tick {
        let step = self.inner.auto_step.load(Ordering::Acquire);
        if step == 0 {
            Tick::from_nanos(self.inner.now.load(Ordering::Acquire))
        } else {
            Tick::from_nanos(self.inner.now.fetch_add(step, Ordering::AcqRel))
        }
    }
}
