use core::future::Future;

use super::SleepProvider;
use crate::{
    error::Result,
    generator::{IdGenStatus, SnowflakeGenerator},
    id::SnowflakeId,
};

/// Extension trait for asynchronously generating Snowflake IDs.
///
/// This trait enables [`SnowflakeGenerator`] types to yield IDs in a
/// `Future`-based context. It drives the generator through
/// [`SnowflakeGenerator::try_poll_id`] and awaits the given [`SleepProvider`]
/// whenever the current tick is exhausted, so the executor thread is never
/// blocked by a rollover.
pub trait SnowflakeGeneratorAsyncExt {
    /// Returns a future that resolves to the next available Snowflake ID.
    ///
    /// If the generator is not ready to issue a new ID immediately, the future
    /// will sleep for the amount of time indicated by the generator and retry.
    /// Dropping the future before it resolves never consumes an ID.
    ///
    /// # Errors
    ///
    /// This future returns an error if the generator reports one, such as
    /// [`Error::EpochExhausted`].
    ///
    /// [`Error::EpochExhausted`]: crate::Error::EpochExhausted
    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<SnowflakeId>> + Send
    where
        S: SleepProvider;
}

impl<G> SnowflakeGeneratorAsyncExt for G
where
    G: SnowflakeGenerator + Sync,
{
    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<SnowflakeId>> + Send
    where
        S: SleepProvider,
    {
        async {
            loop {
                let dur = match self.try_poll_id()? {
                    IdGenStatus::Ready { id } => return Ok(id),
                    IdGenStatus::Pending { yield_for } => yield_for,
                };
                S::sleep_for(dur).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use std::{
        cell::Cell,
        collections::HashSet,
        future::Future,
        pin::pin,
        sync::atomic::{AtomicI64, Ordering},
        task::{Context, Poll, Waker},
    };

    use super::*;
    use crate::{LockSnowflakeGenerator, NANOS_PER_TICK, TimeSource};

    thread_local! {
        static SLEPT: Cell<u32> = const { Cell::new(0) };
    }

    /// Completes immediately and counts how often it was asked to wait.
    struct CountingSleep;
    impl SleepProvider for CountingSleep {
        fn sleep_for(_dur: Duration) -> impl Future<Output = ()> + Send {
            SLEPT.with(|slept| slept.set(slept.get() + 1));
            core::future::ready(())
        }
    }

    /// Advances one tick every 5000 reads, so the sequence runs out first.
    #[derive(Default)]
    struct SlowTime {
        reads: AtomicI64,
    }

    impl TimeSource for SlowTime {
        fn unix_nanos(&self) -> i64 {
            let reads = self.reads.fetch_add(1, Ordering::Relaxed);
            (reads / 5000) * NANOS_PER_TICK
        }
    }

    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    #[test]
    fn waits_through_rollover_without_blocking() {
        // Epoch one tick before the clock starts, so the first ID lands on tick 1.
        let generator =
            LockSnowflakeGenerator::with_epoch_millis(9, -1, SlowTime::default()).unwrap();
        let mut seen = HashSet::new();

        for _ in 0..=SnowflakeId::max_sequence() + 1 {
            let id = block_on(generator.try_next_id_async::<CountingSleep>()).unwrap();
            assert!(seen.insert(id));
        }

        assert!(SLEPT.with(Cell::get) > 0);
        let last = seen.iter().max().unwrap();
        assert_eq!(last.decompose(), (2, 9, 0));
        assert_eq!(seen.iter().filter(|id| id.timestamp() == 1).count(), 4096);
    }
}
