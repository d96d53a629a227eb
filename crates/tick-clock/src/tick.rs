//! Opaque monotonic tick values and rollover-safe ordering.
//!
//! A [`Tick`] is a signed 64-bit nanosecond count read from a monotonic
//! source. The epoch is arbitrary and instance-defined, so a tick is only
//! meaningful relative to other ticks from the same clock. A signed
//! 64-bit nanosecond counter rolls over after roughly 292 years, which is
//! why ordering goes through [`Tick::at_or_before`] instead of numeric
//! comparison.

use std::time::Duration;

/// A point on a monotonic timeline, in nanoseconds since an arbitrary epoch.
///
/// Ticks are produced by a [`MonotonicClock`](crate::clock::MonotonicClock) and
/// carry no meaning of their own: they are not wall-clock times, they are
/// not comparable across clock instances or process restarts, and they are
/// never serialized. The type intentionally does not implement
/// `PartialOrd`/`Ord`: numeric order is wrong at the rollover boundary,
/// so temporal order is expressed through [`Tick::at_or_before`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tick(i64);

impl Tick {
    /// The tick at the lowest representable nanosecond count.
    ///
    /// Under rollover, `MIN` is the immediate successor of [`Tick::MAX`].
    pub const MIN: Tick = Tick(i64::MIN);

    /// The tick at the highest representable nanosecond count.
    pub const MAX: Tick = Tick(i64::MAX);

    /// Creates a tick from a raw nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Returns the raw nanosecond count.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Returns true if `self` occurred no later than `other`.
    ///
    /// The wrapped difference `other - self` (wrapping 64-bit subtraction)
    /// is non-negative exactly when `self` is at or before `other`, for any
    /// two ticks less than ~292 years apart. This holds even when the raw
    /// counts have rolled over, where a plain `<=` would invert the answer.
    ///
    /// Total over all pairs of ticks; ticks from unrelated clocks give a
    /// meaningless (but defined) result.
    ///
    /// # Example
    ///
    /// ```
    /// use tick_clock::Tick;
    ///
    /// let a = Tick::from_nanos(100);
    /// let b = Tick::from_nanos(200);
    /// assert!(a.at_or_before(b));
    /// assert!(!b.at_or_before(a));
    ///
    /// // MIN is one nanosecond after MAX once the counter rolls over.
    /// assert!(Tick::MAX.at_or_before(Tick::MIN));
    /// assert!(!Tick::MIN.at_or_before(Tick::MAX));
    /// ```
    #[must_use]
    pub const fn at_or_before(self, other: Tick) -> bool {
        other.0.wrapping_sub(self.0) >= 0
    }

    /// Returns the wrapped signed difference `self - earlier` in nanoseconds.
    ///
    /// Positive when `self` is after `earlier`, negative when before, zero
    /// when equal, provided the two ticks are less than ~292 years apart.
    /// The subtraction wraps rather than overflowing, so the result is
    /// defined for every pair.
    #[must_use]
    pub const fn nanos_since(self, earlier: Tick) -> i64 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns the span from `earlier` to `self`, clamped at zero.
    ///
    /// Equivalent to [`Tick::nanos_since`] with negative spans (i.e.
    /// `earlier` actually being the later tick) collapsed to
    /// `Duration::ZERO`.
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Tick) -> Duration {
        let nanos = self.nanos_since(earlier);
        if nanos <= 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(nanos as u64)
        }
    }

    /// Advances the tick by a signed nanosecond offset, wrapping at the
    /// rollover boundary.
    #[must_use]
    pub const fn wrapping_add_nanos(self, nanos: i64) -> Self {
        Self(self.0.wrapping_add(nanos))
    }
}
