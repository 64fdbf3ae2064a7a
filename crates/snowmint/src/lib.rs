//! Time-sortable 64-bit Snowflake IDs.
//!
//! Every ID packs three fields into a `u64`:
//!
//! ```text
//! timestamp (42 bits, ms since epoch) | machine ID (10 bits) | sequence (12 bits)
//! ```
//!
//! A [`LockSnowflakeGenerator`] owns its epoch and machine ID and hands out
//! strictly increasing IDs to any number of threads: up to 4096 per
//! millisecond per machine, for about 139 years past the epoch.
//!
//! ```
//! use snowmint::{LockSnowflakeGenerator, decompose_parts};
//!
//! let generator = LockSnowflakeGenerator::with_default_epoch(34)?;
//! let id = generator.try_next_id()?;
//!
//! let (_timestamp, machine_id, sequence) = decompose_parts(id.to_raw());
//! assert_eq!(machine_id, 34);
//! assert!(sequence <= 4095);
//! # Ok::<(), snowmint::Error>(())
//! ```
//!
//! ## Features
//! - `parking-lot`: use `parking_lot::Mutex` (no lock poisoning)
//! - `cache-padded`: pad the generator state to a cache line
//! - `tracing`: emit `tracing` spans and events
//! - `serde`: (de)serialize [`SnowflakeId`] and [`GeneratorConfig`]
//! - `env`: parse [`GeneratorConfig`] from flags and `SNOWMINT_*` variables
//! - `async-tokio` / `async-smol`: non-blocking generation on those runtimes
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
#[cfg(feature = "futures")]
mod futures;
mod generator;
mod id;
mod time;

pub use crate::config::*;
pub use crate::error::*;
#[cfg_attr(docsrs, doc(cfg(feature = "futures")))]
#[cfg(feature = "futures")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
