use core::time::Duration;

use crate::id::SnowflakeId;

/// Represents the result of polling a generator for a new Snowflake ID.
///
/// This type models the outcome of [`SnowflakeGenerator::try_poll_id`]:
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the current tick's sequence space is
///   exhausted and no ID can be produced until the clock reaches the next
///   tick.
///
/// This allows non-blocking generation loops and clean backoff strategies,
/// which is what the async layer builds on.
///
/// # Example
///
/// ```
/// use snowmint::{IdGenStatus, LockSnowflakeGenerator};
///
/// let generator = LockSnowflakeGenerator::with_default_epoch(1)?;
/// let id = loop {
///     match generator.try_poll_id()? {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { yield_for } => std::thread::sleep(yield_for),
///     }
/// };
/// assert_eq!(id.machine_id(), 1);
/// # Ok::<(), snowmint::Error>(())
/// ```
///
/// [`SnowflakeGenerator::try_poll_id`]: crate::SnowflakeGenerator::try_poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated Snowflake ID.
        id: SnowflakeId,
    },
    /// No ID could be generated because the sequence has been exhausted for
    /// the current tick.
    Pending {
        /// How long to wait before polling again.
        yield_for: Duration,
    },
}
