use std::time::{Instant, SystemTime};

use crate::time::{TimeSource, system_time_to_nanos};

/// A monotonic time source anchored to the wall clock once, at construction.
///
/// This avoids wall-clock adjustments (e.g., NTP steps or a manual clock
/// change) while still reporting time relative to the Unix epoch.
///
/// Internally, the clock captures `SystemTime::now()` and `Instant::now()`
/// together and reports the wall-clock anchor plus the monotonic time elapsed
/// since. The reported time never goes backward, but it may drift from the
/// system clock over long runs; clones share the same anchor.
///
/// # Example
///
/// ```
/// use snowmint::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.unix_nanos();
/// let b = clock.unix_nanos();
/// assert!(b >= a);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    anchor_nanos: i128,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock to the current wall-clock time.
    pub fn new() -> Self {
        // Read both clocks back to back so the anchor matches the instant.
        let start = Instant::now();
        let anchor_nanos = system_time_to_nanos(SystemTime::now());
        Self {
            start,
            anchor_nanos,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn unix_nanos(&self) -> i64 {
        let nanos = self.anchor_nanos + self.start.elapsed().as_nanos() as i128;
        nanos.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}
