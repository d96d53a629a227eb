//! Common utilities for integration tests.
//!
//! Provides helpers for:
//! - Installing a tracing subscriber for test output
//! - Generating reproducible tick values for ordering sweeps
//! - Timing a closure through the stopwatch API

use std::time::Duration;

use tick_clock::{MonotonicClock, Stopwatch};

/// Installs the tracing subscriber for a test binary.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Deterministic splitmix64 generator so sweeps reproduce from a fixed seed.
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Any point on the tick timeline.
    pub fn next_i64(&mut self) -> i64 {
        self.next_u64() as i64
    }

    /// A non-negative span strictly below half the tick range.
    pub fn next_delta(&mut self) -> i64 {
        (self.next_u64() >> 1) as i64
    }
}

/// Runs `work` under a stopwatch driven by `clock` and returns the
/// measured span.
pub fn measure_with<C, F>(clock: C, work: F) -> Duration
where
    C: MonotonicClock,
    F: FnOnce(),
{
    let mut watch = Stopwatch::started(clock);
    work();
    watch.stop().expect("stopwatch was started above");
    watch.elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tick_clock::{ManualClock, Tick};

    #[test]
    fn test_splitmix_is_deterministic() {
        let mut a = SplitMix64::new(42);
        let mut b = SplitMix64::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_splitmix_delta_stays_in_half_range() {
        let mut rng = SplitMix64::new(7);
        for _ in 0..10_000 {
            assert!(rng.next_delta() >= 0);
        }
    }

    #[test]
    fn test_measure_with_manual_clock() {
        let clock = ManualClock::new(Tick::from_nanos(0));
        let driver = clock.clone();
        let span = measure_with(clock, || driver.advance(Duration::from_micros(3)));
        assert_eq!(span, Duration::from_micros(3));
    }
}
