use core::{future::Future, time::Duration};

use crate::{
    error::Result,
    futures::{SleepProvider, SnowflakeGeneratorAsyncExt},
    generator::SnowflakeGenerator,
    id::SnowflakeId,
};

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(dur)
    }
}

/// An implementation of [`SleepProvider`] using Tokio's yield.
///
/// This strategy avoids timer-based delays by yielding to the scheduler
/// immediately, which can improve responsiveness in low-concurrency scenarios.
///
/// However, it comes at the cost of more frequent rescheduling, which can
/// result in tighter polling loops and increased CPU usage under load. In
/// highly concurrent cases, a timer-based sleep (e.g., [`TokioSleep`]) is often
/// more efficient due to reduced scheduler churn.
pub struct TokioYield;
impl SleepProvider for TokioYield {
    fn sleep_for(_dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

/// Extension trait for asynchronously generating Snowflake IDs using the
/// [`tokio`](https://docs.rs/tokio) async runtime.
///
/// This trait provides a convenience method that uses [`TokioSleep`] as the
/// sleep provider, so callers don't have to name the sleep strategy.
pub trait SnowflakeGeneratorAsyncTokioExt {
    /// Returns a future that resolves to the next available Snowflake ID
    /// using [`TokioSleep`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying generator fails.
    fn try_next_id_async(&self) -> impl Future<Output = Result<SnowflakeId>> + Send;
}

impl<G> SnowflakeGeneratorAsyncTokioExt for G
where
    G: SnowflakeGenerator + Sync,
{
    fn try_next_id_async(&self) -> impl Future<Output = Result<SnowflakeId>> + Send {
        <Self as SnowflakeGeneratorAsyncExt>::try_next_id_async::<TokioSleep>(self)
    }
}
