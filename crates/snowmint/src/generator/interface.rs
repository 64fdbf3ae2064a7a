use crate::{error::Result, generator::IdGenStatus, id::SnowflakeId};

/// A minimal interface for generating Snowflake IDs.
///
/// The blocking and the polling entry points share one state machine, so a
/// generator may be driven through both at once without ever repeating an
/// ID.
pub trait SnowflakeGenerator {
    /// The machine ID encoded into every generated ID.
    fn machine_id(&self) -> u64;

    /// Generates the next ID, sleeping through a sequence rollover if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpochExhausted`] once the timestamp field overflows,
    /// and [`Error::LockPoisoned`] if the lock was poisoned.
    ///
    /// [`Error::EpochExhausted`]: crate::Error::EpochExhausted
    /// [`Error::LockPoisoned`]: crate::Error
    fn try_next_id(&self) -> Result<SnowflakeId>;

    /// Attempts to generate the next ID without blocking on the clock.
    ///
    /// The returned [`IdGenStatus`] contains either:
    /// - the newly generated ID, or
    /// - a duration to yield/sleep if the current tick is exhausted.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::try_next_id`].
    fn try_poll_id(&self) -> Result<IdGenStatus>;
}
