//! Configuration for the Modula bridge
//!
//! Centralized configuration with sensible defaults. Built once at startup
//! and passed by reference into the components that need it; nothing here
//! is read from ambient process state.

use std::fmt;
use std::time::Duration;

use crate::poll::RetryPolicy;

/// Network address of the storage controller
///
/// Immutable for the process lifetime once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpoint {
    /// Device hostname or IP address
    pub host: String,

    /// Device TCP port
    pub port: u16,
}

impl DeviceEndpoint {
    /// Create a new endpoint from host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The `host:port` form accepted by `ToSocketAddrs`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for DeviceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Main configuration for a bridge instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Address of the storage controller
    pub device: DeviceEndpoint,

    /// Connect timeout for device exchanges (milliseconds)
    pub connect_timeout_ms: u64,

    /// Read timeout for device exchanges (milliseconds)
    pub read_timeout_ms: u64,

    /// Write timeout for device exchanges (milliseconds)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // CALL Polling Configuration
    // -------------------------------------------------------------------------
    /// Retry policy for asynchronous CALL commands
    pub retry: RetryPolicy,

    // -------------------------------------------------------------------------
    // HTTP Server Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Max concurrent HTTP workers
    ///
    /// Each in-flight command holds one worker for the duration of its
    /// exchange; a CALL poll can hold one for up to five minutes, so this
    /// must stay well above the expected number of parallel commands.
    pub max_connections: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DeviceEndpoint::new("127.0.0.1", 11001),
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            retry: RetryPolicy::default(),
            listen_addr: "127.0.0.1:5000".to_string(),
            max_connections: 64,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device endpoint
    pub fn device(mut self, endpoint: DeviceEndpoint) -> Self {
        self.config.device = endpoint;
        self
    }

    /// Set the device endpoint from host and port
    pub fn device_addr(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.device = DeviceEndpoint::new(host, port);
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the interval between CALL poll attempts
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.retry.interval = interval;
        self
    }

    /// Set the CALL attempt budget
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent HTTP workers
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
