use core::{future::Future, time::Duration};

use smol::Timer;

use crate::{
    error::Result,
    futures::{SleepProvider, SnowflakeGeneratorAsyncExt},
    generator::SnowflakeGenerator,
    id::SnowflakeId,
};

/// An implementation of [`SleepProvider`] using Smol's timer.
///
/// This is the default provider for use in async applications built on Smol.
pub struct SmolSleep;
impl SleepProvider for SmolSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send {
        async move {
            Timer::after(dur).await;
        }
    }
}

/// An implementation of [`SleepProvider`] using Smol's yield.
///
/// This strategy avoids timer-based delays by yielding to the scheduler
/// immediately. Under load, a timer-based sleep (e.g., [`SmolSleep`]) usually
/// burns less CPU.
pub struct SmolYield;
impl SleepProvider for SmolYield {
    fn sleep_for(_dur: Duration) -> impl Future<Output = ()> + Send {
        smol::future::yield_now()
    }
}

/// Extension trait for asynchronously generating Snowflake IDs using the
/// [`smol`](https://docs.rs/smol) async runtime.
///
/// This trait provides a convenience method that uses [`SmolSleep`] as the
/// sleep provider.
pub trait SnowflakeGeneratorAsyncSmolExt {
    /// Returns a future that resolves to the next available Snowflake ID
    /// using [`SmolSleep`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying generator fails.
    fn try_next_id_async(&self) -> impl Future<Output = Result<SnowflakeId>> + Send;
}

impl<G> SnowflakeGeneratorAsyncSmolExt for G
where
    G: SnowflakeGenerator + Sync,
{
    fn try_next_id_async(&self) -> impl Future<Output = Result<SnowflakeId>> + Send {
        <Self as SnowflakeGeneratorAsyncExt>::try_next_id_async::<SmolSleep>(self)
    }
}
