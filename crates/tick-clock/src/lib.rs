#![doc = "Monotonic tick clocks with rollover-safe ordering."]

pub mod clock;
pub mod manual;
pub mod stopwatch;
pub mod tick;

pub use clock::*;
pub use manual::*;
pub use stopwatch::*;
pub use tick::*;
