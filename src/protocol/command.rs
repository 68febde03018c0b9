//! Command kind definitions
//!
//! The command kind sits at field index 2 of a raw command. The code set
//! is open-ended on the device side; only the three kinds below are
//! routed, anything else is rejected before device contact.

use std::fmt;

/// Recognized command kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Move an item to the retrieval point; asynchronous on the device,
    /// so its completion is polled
    Call,

    /// Store an item back into a bay; synchronous
    Return,

    /// Query the device state; synchronous
    Status,
}

impl CommandKind {
    /// Zero-based index of the kind field in a parsed command
    pub const FIELD_INDEX: usize = 2;

    /// Extract the kind from parsed command fields
    ///
    /// Returns `None` for unrecognized kinds and for commands too short
    /// to carry one.
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        match fields.get(Self::FIELD_INDEX).map(String::as_str) {
            Some("CALL") => Some(CommandKind::Call),
            Some("RETURN") => Some(CommandKind::Return),
            Some("STATUS") => Some(CommandKind::Status),
            _ => None,
        }
    }

    /// Whether this kind takes the polled send path instead of a single
    /// round trip
    pub fn is_polled(&self) -> bool {
        matches!(self, CommandKind::Call)
    }

    /// Wire spelling of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Call => "CALL",
            CommandKind::Return => "RETURN",
            CommandKind::Status => "STATUS",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
