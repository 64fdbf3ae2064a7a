use std::time::SystemTime;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{ConfigError, Error, Result},
    generator::{IdGenStatus, Mutex, MutexGuard, SnowflakeGenerator},
    id::SnowflakeId,
    time::{
        NANOS_PER_TICK, SystemClock, TimeSource, default_epoch, elapsed_ticks,
        millis_to_system_time, system_time_to_millis, system_time_to_nanos, until_tick,
    },
};

/// The mutable half of a generator. Both fields change together under one
/// critical section.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct State {
    pub(super) last_tick: i64,
    pub(super) sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The tick/sequence pair lives behind a single [`Mutex`], so any number of
/// threads can share one generator (typically through an `Arc`) and every
/// call returns an ID strictly greater than the one before it.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Per-instance epoch, fixed at construction
/// - ✅ Blocking ([`try_next_id`]) and non-blocking ([`try_poll_id`]) minting
///
/// When 4096 IDs have been issued within one millisecond, [`try_next_id`]
/// advances the tick early and sleeps until the clock catches up, holding the
/// lock for at most about a millisecond. Cooperative schedulers should use
/// [`try_poll_id`] (or the async extension traits) instead.
///
/// [`try_next_id`]: Self::try_next_id
/// [`try_poll_id`]: Self::try_poll_id
#[derive(Debug)]
pub struct LockSnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    epoch_millis: i64,
    machine_id: u64,
    time: T,
}

impl LockSnowflakeGenerator<SystemClock> {
    /// Creates a new [`LockSnowflakeGenerator`] reading the system clock.
    ///
    /// # Parameters
    ///
    /// - `machine_id`: A unique identifier for the node or instance
    ///   generating IDs, in `0..=1023`. It is encoded into every generated ID.
    /// - `epoch`: The origin of the timestamp field. `None` selects
    ///   [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the epoch is later than the current
    /// time or the machine ID does not fit in 10 bits.
    ///
    /// # Example
    /// ```
    /// use snowmint::LockSnowflakeGenerator;
    ///
    /// let generator = LockSnowflakeGenerator::new(7, None)?;
    /// let id = generator.try_next_id()?;
    /// assert_eq!(id.machine_id(), 7);
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    ///
    /// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
    pub fn new(machine_id: u64, epoch: Option<SystemTime>) -> Result<Self> {
        Self::with_clock(machine_id, epoch, SystemClock)
    }

    /// Shorthand for [`Self::new`] with the default epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the machine ID is out of range.
    pub fn with_default_epoch(machine_id: u64) -> Result<Self> {
        Self::new(machine_id, None)
    }
}

impl<T> LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time` instead of the system
    /// clock.
    ///
    /// # Errors
    ///
    /// See [`LockSnowflakeGenerator::new`].
    pub fn with_clock(machine_id: u64, epoch: Option<SystemTime>, time: T) -> Result<Self> {
        let epoch = epoch.unwrap_or_else(default_epoch);
        let now_nanos = time.unix_nanos();
        if system_time_to_nanos(epoch) > i128::from(now_nanos) {
            return Err(ConfigError::EpochInFuture {
                epoch_millis: system_time_to_millis(epoch),
                now_millis: now_nanos.div_euclid(NANOS_PER_TICK),
            }
            .into());
        }
        Self::with_epoch_millis(machine_id, system_time_to_millis(epoch), time)
    }

    /// Creates a generator from an epoch expressed in milliseconds since the
    /// Unix epoch. Negative values are epochs before 1970.
    ///
    /// # Errors
    ///
    /// See [`LockSnowflakeGenerator::new`].
    pub fn with_epoch_millis(machine_id: u64, epoch_millis: i64, time: T) -> Result<Self> {
        if machine_id > SnowflakeId::max_machine_id() {
            return Err(ConfigError::MachineIdOutOfRange {
                machine_id,
                max: SnowflakeId::max_machine_id(),
            }
            .into());
        }

        let now_millis = time.unix_nanos().div_euclid(NANOS_PER_TICK);
        if epoch_millis > now_millis {
            return Err(ConfigError::EpochInFuture {
                epoch_millis,
                now_millis,
            }
            .into());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(machine_id, epoch_millis, "snowflake generator created");

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(State::default())),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(State::default()),
            epoch_millis,
            machine_id,
            time,
        })
    }

    /// The machine ID encoded into every ID from this generator.
    pub const fn machine_id(&self) -> u64 {
        self.machine_id
    }

    /// The epoch, in milliseconds since the Unix epoch.
    pub const fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// The epoch as wall-clock time.
    pub fn epoch(&self) -> Option<SystemTime> {
        millis_to_system_time(self.epoch_millis)
    }

    /// Maps the timestamp field of `id` back to wall-clock time, assuming it
    /// was minted against this generator's epoch.
    ///
    /// Returns `None` if the result is not representable as a
    /// [`SystemTime`].
    pub fn system_time_of(&self, id: SnowflakeId) -> Option<SystemTime> {
        let offset = i64::try_from(id.timestamp()).ok()?;
        millis_to_system_time(self.epoch_millis.checked_add(offset)?)
    }

    /// Generates the next ID, blocking while the current tick is exhausted.
    ///
    /// If the clock has moved past the last issued tick, the sequence
    /// restarts at zero. Otherwise the sequence is incremented; when it wraps,
    /// the tick is advanced by one and the calling thread sleeps (holding the
    /// lock) until the clock reaches that tick.
    ///
    /// # Errors
    /// - [`Error::EpochExhausted`] once the tick no longer fits in 42 bits.
    ///   The generator never recovers from this.
    /// - [`Error::SequenceOverflow`] if the sequence escapes its bit width.
    /// - [`Error::LockPoisoned`] if the lock has been poisoned.
    ///
    /// [`Error::LockPoisoned`]: crate::Error
    ///
    /// # Example
    /// ```
    /// use snowmint::LockSnowflakeGenerator;
    ///
    /// let generator = LockSnowflakeGenerator::with_default_epoch(0)?;
    /// let a = generator.try_next_id()?;
    /// let b = generator.try_next_id()?;
    /// assert!(a < b);
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.lock()?;
        let now = self.time.unix_nanos();
        let current_tick = elapsed_ticks(now, self.epoch_millis);

        if state.last_tick < current_tick {
            state.last_tick = current_tick;
            state.sequence = 0;
        } else {
            state.sequence = (state.sequence + 1) & SnowflakeId::SEQUENCE_MASK;
            if state.sequence == 0 {
                state.last_tick = state.last_tick.saturating_add(1);
                let wait = until_tick(state.last_tick, self.epoch_millis, now);

                #[cfg(feature = "tracing")]
                tracing::trace!(
                    tick = state.last_tick,
                    ?wait,
                    "sequence exhausted, waiting for next tick"
                );

                std::thread::sleep(wait);
            }
        }

        self.pack(&state)
    }

    /// Attempts to generate the next ID without sleeping.
    ///
    /// Returns [`IdGenStatus::Pending`] with the time left until the next tick
    /// when the current tick's sequence is exhausted; the state is left
    /// untouched so the caller can wait and poll again.
    ///
    /// # Errors
    /// Same as [`Self::try_next_id`].
    ///
    /// # Example
    /// ```
    /// use snowmint::{IdGenStatus, LockSnowflakeGenerator};
    ///
    /// let generator = LockSnowflakeGenerator::with_default_epoch(0)?;
    /// match generator.try_poll_id()? {
    ///     IdGenStatus::Ready { id } => assert_eq!(id.machine_id(), 0),
    ///     IdGenStatus::Pending { yield_for } => std::thread::sleep(yield_for),
    /// }
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus> {
        let mut state = self.lock()?;
        let now = self.time.unix_nanos();
        let current_tick = elapsed_ticks(now, self.epoch_millis);

        if state.last_tick < current_tick {
            state.last_tick = current_tick;
            state.sequence = 0;
        } else if state.sequence < SnowflakeId::max_sequence() {
            state.sequence += 1;
        } else {
            return Ok(Self::cold_pending(
                state.last_tick,
                self.epoch_millis,
                now,
            ));
        }

        self.pack(&state).map(|id| IdGenStatus::Ready { id })
    }

    #[cold]
    #[inline(never)]
    fn cold_pending(last_tick: i64, epoch_millis: i64, now: i64) -> IdGenStatus {
        let yield_for = until_tick(last_tick.saturating_add(1), epoch_millis, now);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            tick = last_tick,
            ?yield_for,
            "sequence exhausted, pending"
        );

        IdGenStatus::Pending { yield_for }
    }

    pub(super) fn pack(&self, state: &State) -> Result<SnowflakeId> {
        if state.sequence > SnowflakeId::max_sequence() {
            return Err(Error::SequenceOverflow {
                sequence: state.sequence,
            });
        }

        let Some(timestamp) = u64::try_from(state.last_tick)
            .ok()
            .filter(|tick| *tick <= SnowflakeId::max_timestamp())
        else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                tick = state.last_tick,
                machine_id = self.machine_id,
                "epoch exhausted"
            );

            return Err(Error::EpochExhausted {
                tick: state.last_tick,
            });
        };

        Ok(SnowflakeId::from_components(
            timestamp,
            self.machine_id,
            state.sequence,
        ))
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

impl<T> SnowflakeGenerator for LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn machine_id(&self) -> u64 {
        self.machine_id()
    }

    fn try_next_id(&self) -> Result<SnowflakeId> {
        self.try_next_id()
    }

    fn try_poll_id(&self) -> Result<IdGenStatus> {
        self.try_poll_id()
    }
}
