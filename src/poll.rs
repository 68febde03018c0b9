//! Poll loop for asynchronous CALL commands
//!
//! A CALL takes effect asynchronously on the device: the controller
//! acknowledges each exchange with a status code and only reports `0`
//! once the item has actually reached the retrieval point. The loop here
//! re-sends the command once per interval until a terminal status arrives
//! or the attempt budget runs out.
//!
//! The loop never holds any resource shared with other in-flight
//! commands; each cycle performs one self-contained exchange.

use std::thread;
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender};

use crate::protocol;

/// Anything that can perform one request/response exchange with the device
///
/// The production implementation is
/// [`DeviceClient`](crate::network::DeviceClient); tests substitute
/// scripted stubs.
pub trait Exchange {
    /// Perform one round trip; never fails, transport problems come back
    /// as the sentinel response
    fn exchange(&self, raw: &str) -> Vec<String>;
}

/// Retry policy for CALL polling
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Pause between attempts
    pub interval: Duration,

    /// Attempt budget before the command is declared timed out
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // One attempt per second for up to five minutes
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 300,
        }
    }
}

/// Terminal classification of a poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Device reported status 0
    Success,

    /// Device explicitly refused the command
    Rejected,

    /// Attempt budget exhausted, or the loop was cancelled externally
    TimedOut,

    /// Exchange failed or the response was too short to carry a status
    TransportError,
}

/// Outcome of a poll loop: classification, final response, attempts used
#[derive(Debug, Clone)]
pub struct PollResult {
    pub status: PollStatus,
    pub fields: Vec<String>,
    pub attempts: u32,
}

/// Fires a [`CancelToken`] to unblock an in-flight poll loop
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    /// Request cancellation; the loop reports `TimedOut` on its next cycle
    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }
}

/// Cancellation signal observed by the poll loop between attempts
///
/// The inter-attempt sleep doubles as the cancellation point, so a fired
/// token unblocks the loop within one interval.
pub struct CancelToken {
    rx: Receiver<()>,
    // Keeps a never() token's channel open so recv_timeout behaves as a
    // plain sleep instead of reporting disconnection
    _keep_open: Option<Sender<()>>,
}

impl CancelToken {
    /// Create a connected handle/token pair
    pub fn pair() -> (CancelHandle, CancelToken) {
        let (tx, rx) = unbounded();
        (
            CancelHandle { tx },
            CancelToken {
                rx,
                _keep_open: None,
            },
        )
    }

    /// A token that never fires
    pub fn never() -> CancelToken {
        let (tx, rx) = unbounded();
        CancelToken {
            rx,
            _keep_open: Some(tx),
        }
    }

    /// Sleep for `timeout` or until cancelled; returns true if cancelled
    fn wait(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                // Handle dropped without firing: treat as never-cancel,
                // but still honor the pacing interval
                thread::sleep(timeout);
                false
            }
        }
    }
}

/// Drive a CALL command to a terminal status
///
/// Each cycle sleeps one interval, then performs one exchange:
/// - fewer than 4 response fields: `TransportError`, stop immediately
/// - status `0`: `Success`
/// - status `-1`/`-2`/`-5`/`-6`: `Rejected`
/// - attempt budget reached: `TimedOut`, last response returned as-is
/// - any other status: retry
pub fn poll_call<E: Exchange>(
    exchanger: &E,
    command: &str,
    policy: &RetryPolicy,
    cancel: &CancelToken,
) -> PollResult {
    let mut attempts: u32 = 0;
    let mut last = protocol::transport_failure();

    loop {
        if cancel.wait(policy.interval) {
            tracing::info!(command, attempts, "CALL poll cancelled");
            return PollResult {
                status: PollStatus::TimedOut,
                fields: last,
                attempts,
            };
        }

        attempts += 1;
        let fields = exchanger.exchange(command);

        if fields.len() < protocol::MIN_RESPONSE_FIELDS {
            tracing::error!(command, ?fields, "CALL exchange failed");
            return PollResult {
                status: PollStatus::TransportError,
                fields,
                attempts,
            };
        }

        let code = fields[protocol::STATUS_FIELD_INDEX].as_str();
        match code {
            protocol::STATUS_OK => {
                tracing::info!(command, attempts, "CALL executed");
                return PollResult {
                    status: PollStatus::Success,
                    fields,
                    attempts,
                };
            }
            protocol::STATUS_INVALID_SLOT
            | protocol::STATUS_INVALID_BAY
            | protocol::STATUS_NO_SESSION
            | protocol::STATUS_NOT_AUTOMATIC => {
                tracing::info!(command, code, "CALL rejected by device");
                return PollResult {
                    status: PollStatus::Rejected,
                    fields,
                    attempts,
                };
            }
            _ if attempts >= policy.max_attempts => {
                tracing::warn!(
                    command,
                    attempts,
                    "attempt budget exhausted, dropping CALL"
                );
                return PollResult {
                    status: PollStatus::TimedOut,
                    fields,
                    attempts,
                };
            }
            _ => {
                tracing::debug!(command, code, attempts, "CALL pending, retrying");
                last = fields;
            }
        }
    }
}
