//! Declarative generator configuration.
//!
//! A [`GeneratorConfig`] holds everything needed to build a generator: the
//! machine ID and, optionally, a custom epoch. It can be deserialized (with the
//! `serde` feature) or, with the `env` feature, parsed from command-line
//! arguments and the environment:
//!
//! - `--machine-id` / `SNOWMINT_MACHINE_ID` (required): machine ID in
//!   `0..=1023`
//! - `--epoch-millis` / `SNOWMINT_EPOCH_MILLIS` (optional): epoch in
//!   milliseconds since the Unix epoch; the default epoch is used when unset

use crate::{
    error::Result,
    generator::LockSnowflakeGenerator,
    time::{SystemClock, TimeSource, default_epoch, system_time_to_millis},
};

/// Environment variable holding the machine ID.
pub const MACHINE_ID_ENV: &str = "SNOWMINT_MACHINE_ID";

/// Environment variable holding the epoch in milliseconds since 1970.
pub const EPOCH_MILLIS_ENV: &str = "SNOWMINT_EPOCH_MILLIS";

/// Settings for a [`LockSnowflakeGenerator`].
///
/// Validation happens when the generator is built, so a config can be
/// assembled or deserialized freely.
///
/// # Example
///
/// ```
/// use snowmint::{GeneratorConfig, LockSnowflakeGenerator};
///
/// let config = GeneratorConfig::new(12).with_epoch_millis(1_288_834_974_657);
/// let generator: LockSnowflakeGenerator = config.try_into()?;
/// assert_eq!(generator.machine_id(), 12);
/// # Ok::<(), snowmint::Error>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "env", derive(clap::Args))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Unique identifier of this node, in `0..=1023`.
    ///
    /// Environment variable: `SNOWMINT_MACHINE_ID`
    #[cfg_attr(feature = "env", arg(long, env = "SNOWMINT_MACHINE_ID"))]
    pub machine_id: u64,

    /// Epoch in milliseconds since the Unix epoch. `None` selects
    /// [`DEFAULT_EPOCH`](crate::DEFAULT_EPOCH).
    ///
    /// Environment variable: `SNOWMINT_EPOCH_MILLIS`
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    #[cfg_attr(
        feature = "env",
        arg(long, env = "SNOWMINT_EPOCH_MILLIS", allow_negative_numbers = true)
    )]
    pub epoch_millis: Option<i64>,
}

impl GeneratorConfig {
    /// A config for `machine_id` using the default epoch.
    pub const fn new(machine_id: u64) -> Self {
        Self {
            machine_id,
            epoch_millis: None,
        }
    }

    /// Sets a custom epoch.
    #[must_use]
    pub const fn with_epoch_millis(mut self, epoch_millis: i64) -> Self {
        self.epoch_millis = Some(epoch_millis);
        self
    }

    /// Reads the config from the environment, loading a `.env` file first if
    /// one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Arguments`] if `SNOWMINT_MACHINE_ID` is unset or
    /// either variable fails to parse.
    ///
    /// [`ConfigError::Arguments`]: crate::ConfigError::Arguments
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_args(["snowmint"])
    }

    /// Parses the config from command-line style arguments, falling back to
    /// the environment for flags that are absent. The first item is the
    /// binary name.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::from_env`].
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    #[cfg(feature = "env")]
    pub fn from_args<I, A>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<std::ffi::OsString> + Clone,
    {
        use clap::{Args, FromArgMatches};

        let command = Self::augment_args(clap::Command::new("snowmint"));
        command
            .try_get_matches_from(args)
            .and_then(|matches| Self::from_arg_matches(&matches))
            .map_err(|err| crate::ConfigError::Arguments(err.to_string()).into())
    }

    /// Builds a generator reading time from `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// machine ID is out of range or the epoch is in the future.
    pub fn build_with_clock<T: TimeSource>(self, time: T) -> Result<LockSnowflakeGenerator<T>> {
        let epoch_millis = self
            .epoch_millis
            .unwrap_or_else(|| system_time_to_millis(default_epoch()));
        LockSnowflakeGenerator::with_epoch_millis(self.machine_id, epoch_millis, time)
    }

    /// Builds a generator reading the system clock.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::build_with_clock`].
    pub fn build(self) -> Result<LockSnowflakeGenerator<SystemClock>> {
        self.build_with_clock(SystemClock)
    }
}

impl TryFrom<GeneratorConfig> for LockSnowflakeGenerator<SystemClock> {
    type Error = crate::Error;

    fn try_from(config: GeneratorConfig) -> Result<Self> {
        config.build()
    }
}
