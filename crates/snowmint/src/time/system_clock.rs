use std::time::SystemTime;

use crate::time::{TimeSource, system_time_to_nanos};

/// The operating system's wall clock.
///
/// Every read is a `SystemTime::now()` call, so the reported time follows
/// any adjustment made to the system clock (NTP slews and steps included).
/// Use [`MonotonicClock`] if the clock must never step backwards.
///
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn unix_nanos(&self) -> i64 {
        let nanos = system_time_to_nanos(SystemTime::now());
        nanos.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}
