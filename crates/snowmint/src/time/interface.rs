/// A trait for clocks that report the current wall-clock time.
///
/// This abstraction allows you to plug in the system clock, a monotonic
/// clock, or a mocked time source in tests. Generators read it once per call
/// and convert the result into ticks relative to their own epoch, so the
/// time source itself knows nothing about epochs.
///
/// The unit is **nanoseconds since the Unix epoch**. Sub-millisecond
/// precision is what lets a generator sleep exactly until the next tick
/// boundary when a tick's sequence space is exhausted.
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn unix_nanos(&self) -> i64 {
///         1_234_000_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.unix_nanos(), 1_234_000_000);
/// ```
pub trait TimeSource {
    /// Returns the current time in nanoseconds since 1970-01-01 UTC.
    fn unix_nanos(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn unix_nanos(&self) -> i64 {
        (**self).unix_nanos()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn unix_nanos(&self) -> i64 {
        (**self).unix_nanos()
    }
}
