//! Error types for Snowflake ID generation.
//!
//! [`Error`] covers everything a generator can report:
//! - `Configuration`: the generator could not be built (see [`ConfigError`]).
//! - `EpochExhausted`: the 42-bit timestamp field can no longer represent the
//!   time elapsed since the configured epoch.
//! - `SequenceOverflow`: the sequence counter escaped its bit width. This is an
//!   internal invariant violation and only fails the offending call.
//! - `LockPoisoned`: a thread panicked while holding the generator lock (std
//!   mutex only).

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowmint` can produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The generator configuration was rejected at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The elapsed time since the epoch no longer fits in the timestamp field.
    ///
    /// Once observed, every subsequent call on the same generator fails the
    /// same way. A generator with a later epoch is required.
    #[error("epoch exhausted: tick {tick} does not fit in the 42-bit timestamp field")]
    EpochExhausted {
        /// The tick (milliseconds since the epoch) that could not be encoded.
        tick: i64,
    },

    /// The sequence counter exceeded its maximum value.
    #[error("sequence {sequence} exceeds the maximum sequence value")]
    SequenceOverflow {
        /// The offending sequence value.
        sequence: u64,
    },

    /// The generator lock was poisoned by a panicking thread.
    ///
    /// `parking_lot` mutexes do not poison, so this variant is absent with the
    /// `parking-lot` feature.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` if this error was raised while building a generator.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Reasons a generator configuration can be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The epoch lies after the current time.
    #[error("epoch {epoch_millis}ms is later than the current time {now_millis}ms")]
    EpochInFuture {
        /// Requested epoch, in milliseconds since the Unix epoch.
        epoch_millis: i64,
        /// Current time, in milliseconds since the Unix epoch.
        now_millis: i64,
    },

    /// The machine id does not fit in the 10-bit machine id field.
    #[error("machine id {machine_id} is out of range (max {max})")]
    MachineIdOutOfRange {
        /// The rejected machine id.
        machine_id: u64,
        /// The largest accepted machine id.
        max: u64,
    },

    /// Command-line arguments or environment variables were rejected.
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    #[cfg(feature = "env")]
    #[error("{0}")]
    Arguments(String),
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
// Collapse every poisoned guard into a single variant
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
