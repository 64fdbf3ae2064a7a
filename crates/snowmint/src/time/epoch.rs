use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Monday, April 1, 2019 00:00:00 UTC
///
/// Used when a generator is built without an explicit epoch. With 42
/// timestamp bits at millisecond resolution it lasts until roughly 2158.
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_554_076_800_000);

/// Nanoseconds in one tick. The tick is fixed at one millisecond.
pub const NANOS_PER_TICK: i64 = 1_000_000;

/// Returns [`DEFAULT_EPOCH`] as a [`SystemTime`].
pub fn default_epoch() -> SystemTime {
    UNIX_EPOCH + DEFAULT_EPOCH
}

/// Converts a [`SystemTime`] to signed nanoseconds since the Unix epoch.
///
/// Times before 1970 yield negative values, which lets an epoch sit further
/// in the past than the Unix epoch itself.
pub fn system_time_to_nanos(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_nanos() as i128,
        Err(before) => -(before.duration().as_nanos() as i128),
    }
}

/// Converts a [`SystemTime`] to whole milliseconds since the Unix epoch,
/// rounding towards negative infinity.
pub fn system_time_to_millis(time: SystemTime) -> i64 {
    let millis = system_time_to_nanos(time).div_euclid(i128::from(NANOS_PER_TICK));
    millis.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Converts milliseconds since the Unix epoch back into a [`SystemTime`].
///
/// Returns `None` if the result is not representable on this platform.
pub fn millis_to_system_time(millis: i64) -> Option<SystemTime> {
    let offset = Duration::from_millis(millis.unsigned_abs());
    if millis >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}

/// Whole ticks elapsed between `epoch_millis` and `now_nanos`.
///
/// Negative when the clock reads earlier than the epoch.
pub(crate) fn elapsed_ticks(now_nanos: i64, epoch_millis: i64) -> i64 {
    now_nanos
        .div_euclid(NANOS_PER_TICK)
        .saturating_sub(epoch_millis)
}

/// Time remaining until the clock reaches the start of `tick`, or zero if it
/// already has.
pub(crate) fn until_tick(tick: i64, epoch_millis: i64, now_nanos: i64) -> Duration {
    let target = (i128::from(epoch_millis) + i128::from(tick)) * i128::from(NANOS_PER_TICK);
    let remaining = target - i128::from(now_nanos);
    if remaining <= 0 {
        Duration::ZERO
    } else {
        Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_epoch_is_april_2019() {
        assert_eq!(system_time_to_millis(default_epoch()), 1_554_076_800_000);
    }

    #[test]
    fn millis_round_trip_before_and_after_unix_epoch() {
        for millis in [0, 1, 1_554_076_800_000, -1, -4_398_046_511_104] {
            let time = millis_to_system_time(millis).unwrap();
            assert_eq!(system_time_to_millis(time), millis);
        }
    }

    #[test]
    fn millis_floor_towards_negative_infinity() {
        let just_before = UNIX_EPOCH - Duration::from_nanos(1);
        assert_eq!(system_time_to_nanos(just_before), -1);
        assert_eq!(system_time_to_millis(just_before), -1);

        let just_after = UNIX_EPOCH + Duration::from_nanos(999_999);
        assert_eq!(system_time_to_millis(just_after), 0);
    }

    #[test]
    fn elapsed_ticks_counts_whole_milliseconds() {
        assert_eq!(elapsed_ticks(10 * NANOS_PER_TICK, 10), 0);
        assert_eq!(elapsed_ticks(10 * NANOS_PER_TICK + 999_999, 10), 0);
        assert_eq!(elapsed_ticks(11 * NANOS_PER_TICK, 10), 1);
        assert_eq!(elapsed_ticks(9 * NANOS_PER_TICK, 10), -1);
    }

    #[test]
    fn until_tick_targets_the_tick_boundary() {
        // epoch at 100ms, now at 142.25ms: tick 43 starts at 143ms
        let now = 142 * NANOS_PER_TICK + 250_000;
        assert_eq!(until_tick(43, 100, now), Duration::from_micros(750));
        assert_eq!(until_tick(42, 100, now), Duration::ZERO);
        assert_eq!(until_tick(45, 100, now), Duration::from_micros(2_750));
    }
}
