//! Device response conventions
//!
//! Field indices, status codes, and the transport-failure sentinel. A
//! response must carry at least [`MIN_RESPONSE_FIELDS`] fields before its
//! status code may be inspected; anything shorter is malformed, never a
//! status.

/// Zero-based index of the status code in a parsed response
pub const STATUS_FIELD_INDEX: usize = 3;

/// Minimum field count for a response to carry a status code
pub const MIN_RESPONSE_FIELDS: usize = 4;

/// Size of the single bounded read for a device response
///
/// The device always answers within one buffer's worth of bytes; there is
/// no read-until-delimiter framing on the response side.
pub const RESPONSE_BUFFER_SIZE: usize = 30;

/// Sentinel status synthesized locally for transport failures
///
/// Never sent by the device. It survives only at the wire-compatibility
/// boundary; inside the bridge, failures travel as tagged [`Outcome`]s.
///
/// [`Outcome`]: crate::translate::Outcome
pub const TRANSPORT_SENTINEL: &str = "-99";

// -----------------------------------------------------------------------------
// Status codes
//
// -1 and -2 are overloaded by kind: for CALL they refer to the requested
// slot/bay, for RETURN -1 means the bay is empty.
// -----------------------------------------------------------------------------

/// Command executed
pub const STATUS_OK: &str = "0";

/// Invalid target slot (CALL) / bay empty (RETURN)
pub const STATUS_INVALID_SLOT: &str = "-1";

/// Invalid target bay
pub const STATUS_INVALID_BAY: &str = "-2";

/// Session not established or target bay inactive
pub const STATUS_NO_SESSION: &str = "-5";

/// Device not in automatic mode
pub const STATUS_NOT_AUTOMATIC: &str = "-6";

/// Status code of a parsed response, when present
pub fn status_code(fields: &[String]) -> Option<&str> {
    if fields.len() < MIN_RESPONSE_FIELDS {
        return None;
    }
    fields.get(STATUS_FIELD_INDEX).map(String::as_str)
}

/// The one-field response representing a failed exchange
pub fn transport_failure() -> Vec<String> {
    vec![TRANSPORT_SENTINEL.to_string()]
}

/// Whether a response is the locally synthesized transport failure
pub fn is_transport_failure(fields: &[String]) -> bool {
    fields.first().map(String::as_str) == Some(TRANSPORT_SENTINEL)
}
