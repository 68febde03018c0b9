//! Wire codec
//!
//! Parsing and framing for the pipe-delimited command grammar. Both
//! functions are pure and total: any input string, including one with
//! empty fields, produces a result.

/// Frame terminator appended to every encoded command
pub const FRAME_TERMINATOR: u8 = b'\r';

/// Split a raw command or device response into trimmed fields
///
/// `"01 | 02 | CALL | 10"` parses to `["01", "02", "CALL", "10"]`. No
/// fixed field count is guaranteed; callers index defensively.
pub fn parse(raw: &str) -> Vec<String> {
    raw.split('|').map(|field| field.trim().to_string()).collect()
}

/// Encode a raw command for the wire
///
/// UTF-8 bytes of the command followed by a single carriage return.
pub fn encode(raw: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(raw.len() + 1);
    frame.extend_from_slice(raw.as_bytes());
    frame.push(FRAME_TERMINATOR);
    frame
}
