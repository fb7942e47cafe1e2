//! Cache endpoint configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the cache-roundtrip probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(clap::Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CacheConfig {
    /// Memcached host.
    #[cfg_attr(
        feature = "config",
        arg(long = "cache-host", env = "CLOUDPROBE_CACHE_HOST", default_value = "localhost")
    )]
    pub host: String,

    /// Memcached port.
    #[cfg_attr(
        feature = "config",
        arg(long = "cache-port", env = "CLOUDPROBE_CACHE_PORT", default_value_t = 11211)
    )]
    pub port: u16,

    /// Connect/read timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "cache-timeout-secs", default_value_t = 10)
    )]
    pub timeout_secs: u32,

    /// Disable Nagle's algorithm on the connection.
    #[cfg_attr(feature = "config", arg(long = "cache-tcp-nodelay", default_value_t = true))]
    pub tcp_nodelay: bool,
}

impl CacheConfig {
    /// Creates a configuration for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout_secs: 10,
            tcp_nodelay: true,
        }
    }

    /// Sets the timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The connection URL for the memcached client.
    pub fn endpoint(&self) -> String {
        format!(
            "memcache://{}:{}?timeout={}&tcp_nodelay={}",
            self.host, self.port, self.timeout_secs, self.tcp_nodelay
        )
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new("localhost", 11211)
    }
}
