//! Response translation
//!
//! Maps a final device response plus the original command kind to an
//! application-level outcome. The mapping is a pure lookup keyed by
//! (kind, status code) with no hidden state; unlisted combinations fall
//! through to `Accepted`, so it is total over all code values.
//!
//! The transport-failure sentinel is unwrapped here: past this point
//! failures travel as tagged outcomes, never as fabricated status codes.

use std::fmt;

use crate::protocol::{self, CommandKind};

/// Application-level result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The device executed (or at least accepted) the command
    Accepted { message: String },

    /// The device explicitly refused the command
    Rejected { message: String },

    /// The exchange never completed: connect/write/read/decode failure,
    /// or a response too short to carry a status
    TransportError { message: String },

    /// Command kind not recognized; rejected before any device contact
    Unsupported { message: String },
}

impl Outcome {
    pub fn accepted(message: impl Into<String>) -> Self {
        Outcome::Accepted {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Outcome::Rejected {
            message: message.into(),
        }
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        Outcome::TransportError {
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Outcome::Unsupported {
            message: message.into(),
        }
    }

    /// Human-readable text of the outcome
    pub fn message(&self) -> &str {
        match self {
            Outcome::Accepted { message }
            | Outcome::Rejected { message }
            | Outcome::TransportError { message }
            | Outcome::Unsupported { message } => message,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Accepted { .. } => "accepted",
            Outcome::Rejected { .. } => "rejected",
            Outcome::TransportError { .. } => "transport error",
            Outcome::Unsupported { .. } => "unsupported",
        };
        write!(f, "{}: {}", label, self.message())
    }
}

/// Translate a final device response into an application outcome
pub fn translate(kind: CommandKind, fields: &[String]) -> Outcome {
    if protocol::is_transport_failure(fields) {
        return Outcome::transport_error("failed to send command");
    }

    // Shorter responses never carry a status; grouped with transport
    // failures rather than misread as one
    let code = match protocol::status_code(fields) {
        Some(code) => code,
        None => return Outcome::transport_error("malformed device response"),
    };

    match (kind, code) {
        (CommandKind::Call, protocol::STATUS_INVALID_SLOT) => Outcome::rejected("slot invalid"),
        (CommandKind::Call, protocol::STATUS_INVALID_BAY) => Outcome::rejected("bay invalid"),
        (CommandKind::Call, protocol::STATUS_NO_SESSION) => {
            Outcome::rejected("session not established or bay inactive")
        }
        (CommandKind::Call, protocol::STATUS_NOT_AUTOMATIC) => {
            Outcome::rejected("automatic mode not engaged")
        }
        (CommandKind::Return, protocol::STATUS_INVALID_SLOT) => Outcome::rejected("bay empty"),
        (CommandKind::Return, protocol::STATUS_INVALID_BAY) => Outcome::rejected("bay invalid"),
        _ => Outcome::accepted("command executed"),
    }
}
