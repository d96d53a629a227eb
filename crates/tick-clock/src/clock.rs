//! Monotonic clock sources.
//!
//! [`MonotonicClock`] is the seam between code that measures elapsed time
//! and the source of that time. Production code reads the process-wide
//! [`system_clock`]; tests inject a
//! [`ManualClock`](crate::manual::ManualClock) through the same trait.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Instant;

use tracing::debug;
#[cfg(target_os = "linux")]
use tracing::warn;

#[cfg(target_os = "linux")]
use nix::time::{clock_gettime, ClockId};

use crate::tick::Tick;

/// A source of monotonic [`Tick`]s.
///
/// Successive reads from one clock instance never move backwards, and the
/// tick epoch is instance-defined: ticks are only comparable against other
/// ticks from the same instance. Reading never fails and never blocks;
/// implementations mask platform failures internally instead of surfacing
/// them.
pub trait MonotonicClock: Send + Sync {
    /// Returns the current tick.
    fn read(&self) -> Tick;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn read(&self) -> Tick {
        (**self).read()
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for Arc<C> {
    fn read(&self) -> Tick {
        (**self).read()
    }
}

/// The operating system's monotonic clock.
///
/// On Linux this reads `CLOCK_MONOTONIC_RAW`, which is immune to NTP rate
/// adjustment. The raw clock is probed once at construction; if it is
/// unavailable the instance permanently falls back to nanoseconds elapsed
/// since construction, so every read stays on a single timebase. On other
/// platforms the construction-origin timebase is used directly.
///
/// Most callers want the shared [`system_clock`] rather than a fresh
/// instance, since ticks from different instances are not comparable.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    #[cfg(target_os = "linux")]
    raw_available: bool,
}

impl SystemClock {
    /// Creates a clock with its own epoch.
    #[must_use]
    pub fn new() -> Self {
        let origin = Instant::now();
        #[cfg(target_os = "linux")]
        {
            let raw_available = match clock_gettime(ClockId::CLOCK_MONOTONIC_RAW) {
                Ok(_) => {
                    debug!(source = "CLOCK_MONOTONIC_RAW", "monotonic clock ready");
                    true
                }
                Err(errno) => {
                    warn!(
                        %errno,
                        "CLOCK_MONOTONIC_RAW unavailable, using process-origin ticks"
                    );
                    false
                }
            };
            Self {
                origin,
                raw_available,
            }
        }
        #[cfg(not(target_os = "linux"))]
        {
            debug!(source = "std::time::Instant", "monotonic clock ready");
            Self { origin }
        }
    }

    fn origin_tick(&self) -> Tick {
        // ~292 years of nanoseconds fit in i64.
        Tick::from_nanos(self.origin.elapsed().as_nanos() as i64)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    #[cfg(target_os = "linux")]
    fn read(&self) -> Tick {
        if self.raw_available {
            if let Ok(ts) = clock_gettime(ClockId::CLOCK_MONOTONIC_RAW) {
                let nanos = (ts.tv_sec() as i64)
                    .wrapping_mul(1_000_000_000)
                    .wrapping_add(ts.tv_nsec() as i64);
                return Tick::from_nanos(nanos);
            }
        }
        self.origin_tick()
    }

    #[cfg(not(target_os = "linux"))]
    fn read(&self) -> Tick {
        self.origin_tick()
    }
}

static SYSTEM: OnceLock<SystemClock> = OnceLock::new();

/// Returns the process-wide [`SystemClock`].
///
/// The clock is created on first use and every later call returns the same
/// instance, so ticks taken anywhere in the process share one timeline.
#[must_use]
pub fn system_clock() -> &'static SystemClock {
    SYSTEM.get_or_init(SystemClock::new)
}
