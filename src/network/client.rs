//! Device client
//!
//! Performs one synchronous TCP round trip per invocation. Every call
//! opens a fresh connection and tears it down before returning; there is
//! no pooling or reuse, by device contract.
//!
//! Nothing raises past this boundary: connect, write, read, and decode
//! failures are logged and converted into the one-field sentinel
//! response, so callers always receive parsed fields.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::{Config, DeviceEndpoint};
use crate::error::{BridgeError, Result};
use crate::poll::Exchange;
use crate::protocol;

/// TCP client for the storage controller
#[derive(Debug, Clone)]
pub struct DeviceClient {
    endpoint: DeviceEndpoint,
    connect_timeout: Duration,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl DeviceClient {
    /// Create a client for the configured device
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.device.clone(),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            read_timeout: Duration::from_millis(config.read_timeout_ms),
            write_timeout: Duration::from_millis(config.write_timeout_ms),
        }
    }

    /// Perform one request/response exchange with the device
    ///
    /// On any failure returns `["-99"]` instead of an error.
    pub fn exchange(&self, raw: &str) -> Vec<String> {
        tracing::debug!(command = raw, device = %self.endpoint, "sending command");

        match self.try_exchange(raw) {
            Ok(fields) => {
                tracing::debug!(command = raw, response = ?fields, "device answered");
                fields
            }
            Err(e) => {
                tracing::error!(command = raw, device = %self.endpoint, error = %e, "exchange failed");
                protocol::transport_failure()
            }
        }
    }

    /// The fallible inner exchange; errors become the sentinel one level up
    fn try_exchange(&self, raw: &str) -> Result<Vec<String>> {
        let addr = self
            .endpoint
            .addr()
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                BridgeError::Config(format!("cannot resolve device address {}", self.endpoint))
            })?;

        let mut stream = TcpStream::connect_timeout(&addr, self.connect_timeout)?;
        stream.set_read_timeout(Some(self.read_timeout))?;
        stream.set_write_timeout(Some(self.write_timeout))?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        stream.write_all(&protocol::encode(raw))?;

        // Single bounded read; the device answers within one buffer
        let mut buf = [0u8; protocol::RESPONSE_BUFFER_SIZE];
        let n = stream.read(&mut buf)?;

        let text = std::str::from_utf8(&buf[..n])
            .map_err(|e| BridgeError::Protocol(format!("response is not valid UTF-8: {}", e)))?;

        Ok(protocol::parse(text))
    }
}

impl Exchange for DeviceClient {
    fn exchange(&self, raw: &str) -> Vec<String> {
        DeviceClient::exchange(self, raw)
    }
}
