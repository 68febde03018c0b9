//! Bridge Module
//!
//! The orchestrator that ties the pieces together.
//!
//! ## Responsibilities
//! - Validate the command kind before any device contact
//! - Route CALL commands through the poll loop, everything else through a
//!   single exchange
//! - Emit notification events for received/unsupported/rejected/timed-out
//!   commands
//! - Translate the final device response into an outcome
//!
//! ## Concurrency Model
//!
//! `execute` is synchronous and may block for up to the full CALL attempt
//! budget (~5 minutes at defaults). A `Bridge` is shared behind an `Arc`
//! and holds no mutable state: every exchange owns its own socket, so any
//! number of commands may run in parallel, one per caller thread.

use crate::config::Config;
use crate::network::DeviceClient;
use crate::notify::{Event, EventSender};
use crate::poll::{poll_call, CancelToken, PollStatus, RetryPolicy};
use crate::protocol::{self, CommandKind};
use crate::translate::{translate, Outcome};

/// The command bridge
pub struct Bridge {
    /// TCP client for the storage controller
    client: DeviceClient,

    /// Retry policy applied to CALL commands
    retry: RetryPolicy,

    /// Notification side channel, if one is attached
    events: Option<EventSender>,
}

impl Bridge {
    /// Create a bridge for the configured device
    pub fn new(config: &Config) -> Self {
        Self {
            client: DeviceClient::new(config),
            retry: config.retry,
            events: None,
        }
    }

    /// Attach a notification event channel
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Execute a raw command and return its outcome
    ///
    /// Never fails: transport problems, rejections, and unsupported kinds
    /// all come back as structured outcomes.
    pub fn execute(&self, raw: &str) -> Outcome {
        self.execute_with_cancel(raw, &CancelToken::never())
    }

    /// Execute a raw command, honoring an external cancellation signal
    ///
    /// A fired token unblocks an in-flight CALL poll within one interval;
    /// the command then reports as timed out.
    pub fn execute_with_cancel(&self, raw: &str, cancel: &CancelToken) -> Outcome {
        let fields = protocol::parse(raw);

        let Some(kind) = CommandKind::from_fields(&fields) else {
            tracing::error!(command = raw, "unsupported command kind");
            self.emit(Event::UnsupportedCommand {
                command: raw.to_string(),
            });
            return Outcome::unsupported(format!("unsupported command: {}", raw));
        };

        self.emit(Event::CommandReceived {
            kind,
            command: raw.to_string(),
        });

        let result = if kind.is_polled() {
            let poll = poll_call(&self.client, raw, &self.retry, cancel);
            if poll.status == PollStatus::TimedOut {
                self.emit(Event::CommandTimedOut {
                    command: raw.to_string(),
                    attempts: poll.attempts,
                });
            }
            poll.fields
        } else {
            self.client.exchange(raw)
        };

        let outcome = translate(kind, &result);
        if let Outcome::Rejected { message } = &outcome {
            self.emit(Event::CommandRejected {
                command: raw.to_string(),
                reason: message.clone(),
            });
        }

        outcome
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}
