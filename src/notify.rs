//! Notification side channel
//!
//! The bridge emits structured events instead of calling into any
//! presentation layer; a notifier consumes them on its own thread and
//! renders them as log records. Desktop alerting, if ever needed, plugs
//! in by consuming the same channel.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::protocol::CommandKind;

/// User-visible events raised by the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A recognized command arrived on the HTTP side
    CommandReceived {
        kind: CommandKind,
        command: String,
    },

    /// A command with an unrecognized kind was dropped before device
    /// contact
    UnsupportedCommand { command: String },

    /// The device refused a command
    CommandRejected { command: String, reason: String },

    /// A CALL exhausted its attempt budget (or was cancelled)
    CommandTimedOut { command: String, attempts: u32 },
}

/// Sending half of the notification channel
///
/// Cloneable; emitting never blocks and never fails the caller, even with
/// no notifier running.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<Event>,
}

impl EventSender {
    pub fn emit(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::debug!("notifier gone, event dropped");
        }
    }
}

/// Consumes bridge events and renders them as log records
pub struct Notifier {
    rx: Receiver<Event>,
}

impl Notifier {
    /// Create a connected sender/notifier pair
    pub fn channel() -> (EventSender, Notifier) {
        let (tx, rx) = unbounded();
        (EventSender { tx }, Notifier { rx })
    }

    /// Receive the next queued event without blocking, if any
    ///
    /// Mostly useful for inspecting emissions in tests.
    pub fn try_recv(&self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    /// Consume events until every sender is dropped
    pub fn run(self) {
        for event in self.rx.iter() {
            match event {
                Event::CommandReceived { kind, command } => {
                    tracing::info!(%kind, %command, "command received");
                }
                Event::UnsupportedCommand { command } => {
                    tracing::warn!(%command, "unsupported command received");
                }
                Event::CommandRejected { command, reason } => {
                    tracing::warn!(%command, %reason, "command rejected by device");
                }
                Event::CommandTimedOut { command, attempts } => {
                    tracing::warn!(%command, attempts, "command dropped after timeout");
                }
            }
        }
        tracing::debug!("notifier channel closed");
    }

    /// Run the notifier on a dedicated thread
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }
}
