//! Codec Tests
//!
//! Tests for wire-grammar parsing, framing, and command-kind extraction.

use modula_bridge::protocol::{encode, parse, CommandKind, FRAME_TERMINATOR};

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_trims_every_field() {
    assert_eq!(parse("01 | 02 | CALL | 10"), vec!["01", "02", "CALL", "10"]);
}

#[test]
fn test_parse_plain_command() {
    assert_eq!(parse("01|02|CALL|10"), vec!["01", "02", "CALL", "10"]);
}

#[test]
fn test_parse_empty_string() {
    assert_eq!(parse(""), vec![""]);
}

#[test]
fn test_parse_keeps_empty_fields() {
    assert_eq!(parse("a||b"), vec!["a", "", "b"]);
    assert_eq!(parse("|"), vec!["", ""]);
}

#[test]
fn test_parse_no_delimiter() {
    assert_eq!(parse("-99"), vec!["-99"]);
}

#[test]
fn test_parse_is_total_over_whitespace() {
    assert_eq!(parse("  01\t|02 "), vec!["01", "02"]);
}

// =============================================================================
// Framing Tests
// =============================================================================

#[test]
fn test_encode_appends_single_cr() {
    let frame = encode("01|02|CALL|10");
    assert_eq!(&frame[..frame.len() - 1], b"01|02|CALL|10");
    assert_eq!(*frame.last().unwrap(), FRAME_TERMINATOR);
}

#[test]
fn test_encode_empty_command() {
    assert_eq!(encode(""), vec![b'\r']);
}

#[test]
fn test_encode_round_trips_utf8() {
    let raw = "01|02|CALL|10";
    let frame = encode(raw);
    let decoded = std::str::from_utf8(&frame[..frame.len() - 1]).unwrap();
    assert_eq!(decoded, raw);
}

// =============================================================================
// Command Kind Tests
// =============================================================================

#[test]
fn test_kind_from_fields() {
    assert_eq!(
        CommandKind::from_fields(&parse("01|02|CALL|10")),
        Some(CommandKind::Call)
    );
    assert_eq!(
        CommandKind::from_fields(&parse("05|09|RETURN|0")),
        Some(CommandKind::Return)
    );
    assert_eq!(
        CommandKind::from_fields(&parse("01|02|STATUS|1")),
        Some(CommandKind::Status)
    );
}

#[test]
fn test_kind_rejects_unknown() {
    assert_eq!(CommandKind::from_fields(&parse("01|02|MOVE|10")), None);
    assert_eq!(CommandKind::from_fields(&parse("01|02|call|10")), None);
}

#[test]
fn test_kind_rejects_short_command() {
    assert_eq!(CommandKind::from_fields(&parse("01|02")), None);
    assert_eq!(CommandKind::from_fields(&parse("")), None);
}

#[test]
fn test_only_call_is_polled() {
    assert!(CommandKind::Call.is_polled());
    assert!(!CommandKind::Return.is_polled());
    assert!(!CommandKind::Status.is_polled());
}

#[test]
fn test_kind_display_matches_wire_spelling() {
    assert_eq!(CommandKind::Call.to_string(), "CALL");
    assert_eq!(CommandKind::Return.to_string(), "RETURN");
    assert_eq!(CommandKind::Status.to_string(), "STATUS");
}
