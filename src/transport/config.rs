//! HTTP settings for the gateway transport.

use std::{ops::RangeInclusive, time::Duration};

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// Accepted round-trip timeouts, in seconds.
pub const TIMEOUT_RANGE_SECS: RangeInclusive<u64> = 1..=300;
/// Accepted connect timeouts, in seconds.
pub const CONNECT_TIMEOUT_RANGE_SECS: RangeInclusive<u64> = 1..=60;

/// Connection and timeout settings, read from the `[http]` table.
///
/// Missing keys take their defaults:
///
/// ```toml
/// [http]
/// pool_max_idle_per_host = 10
/// timeout_secs = 30
/// connect_timeout_secs = 10
/// user_agent = "nvp-gateway/0.1.0"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Idle keep-alive connections kept per gateway host.
    #[serde(default = "HttpConfig::default_pool_size")]
    pub pool_max_idle_per_host: usize,

    /// Deadline for a whole exchange, including reading the body.
    #[serde(default = "HttpConfig::default_timeout_secs")]
    pub timeout_secs: u64,

    /// Deadline for establishing the TCP and TLS connection.
    #[serde(default = "HttpConfig::default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "HttpConfig::default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: Self::default_pool_size(),
            timeout_secs: Self::default_timeout_secs(),
            connect_timeout_secs: Self::default_connect_timeout_secs(),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Checks both timeouts against [`TIMEOUT_RANGE_SECS`] and
    /// [`CONNECT_TIMEOUT_RANGE_SECS`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] naming the first out-of-range value.
    pub fn validate(&self) -> Result<()> {
        check_range("timeout_secs", self.timeout_secs, &TIMEOUT_RANGE_SECS)?;
        check_range("connect_timeout_secs", self.connect_timeout_secs, &CONNECT_TIMEOUT_RANGE_SECS)
    }

    /// Round-trip deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect deadline.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn default_pool_size() -> usize {
        10
    }

    fn default_timeout_secs() -> u64 {
        30
    }

    fn default_connect_timeout_secs() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned()
    }
}

fn check_range(name: &str, value: u64, range: &RangeInclusive<u64>) -> Result<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(GatewayError::Config(format!(
        "{name} must be between {} and {}, got {value}",
        range.start(),
        range.end()
    )))
}
