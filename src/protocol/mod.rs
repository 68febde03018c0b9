//! Protocol Module
//!
//! Defines the wire protocol spoken by Modula storage controllers.
//!
//! ## Wire Format
//!
//! Commands are plain text, pipe-delimited fields, UTF-8 encoded, with a
//! single carriage return as frame terminator:
//!
//! ```text
//! ┌──────┬───┬──────┬───┬──────┬───┬──────┬────┐
//! │ f0   │ | │ f1   │ | │ KIND │ | │ f3.. │ CR │
//! └──────┴───┴──────┴───┴──────┴───┴──────┴────┘
//! ```
//!
//! Field index 2 carries the command kind. Responses are pipe-delimited as
//! well, answered within a single 30-byte read; field index 3 carries the
//! device status code.
//!
//! ### Command Kinds
//! - `CALL`   - move an item to the retrieval point (asynchronous, polled)
//! - `RETURN` - store an item back into a bay (synchronous)
//! - `STATUS` - query the device state (synchronous)
//!
//! ### Status Codes (response field 3)
//! - `0`:  executed
//! - `-1`: invalid slot (CALL) / bay empty (RETURN)
//! - `-2`: invalid bay
//! - `-5`: no session or bay inactive (CALL)
//! - `-6`: device not in automatic mode (CALL)
//! - `-99`: reserved; never sent by the device, synthesized locally for
//!   transport failures

mod command;
mod response;
mod codec;

pub use command::CommandKind;
pub use response::{
    is_transport_failure, status_code, transport_failure, MIN_RESPONSE_FIELDS, RESPONSE_BUFFER_SIZE,
    STATUS_FIELD_INDEX, STATUS_INVALID_BAY, STATUS_INVALID_SLOT, STATUS_NOT_AUTOMATIC,
    STATUS_NO_SESSION, STATUS_OK, TRANSPORT_SENTINEL,
};
pub use codec::{encode, parse, FRAME_TERMINATOR};
