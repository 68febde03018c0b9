//! Bridge Tests
//!
//! End-to-end scenarios through the bridge against in-process stub
//! devices, including event emission.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use modula_bridge::notify::{Event, Notifier};
use modula_bridge::{Bridge, CommandKind, Config, Outcome};

/// Stub device answering one scripted reply per accepted connection
struct StubDevice {
    port: u16,
    exchanges: Arc<AtomicUsize>,
}

impl StubDevice {
    fn spawn(replies: &[&'static str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let exchanges = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&exchanges);
        let replies: Vec<&'static str> = replies.to_vec();
        thread::spawn(move || {
            for reply in replies {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut frame = Vec::new();
                let mut buf = [0u8; 64];
                loop {
                    match stream.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            frame.extend_from_slice(&buf[..n]);
                            if frame.contains(&b'\r') {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }

                let _ = stream.write_all(reply.as_bytes());
            }
        });

        Self { port, exchanges }
    }

    fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }
}

fn bridge_for(device: &StubDevice) -> Bridge {
    let config = Config::builder()
        .device_addr("127.0.0.1", device.port)
        .poll_interval(Duration::from_millis(1))
        .connect_timeout_ms(1000)
        .read_timeout_ms(1000)
        .write_timeout_ms(1000)
        .build();
    Bridge::new(&config)
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_call_accepted_on_first_attempt() {
    let device = StubDevice::spawn(&["01|02|CALL|0"]);
    let bridge = bridge_for(&device);

    let outcome = bridge.execute("01|02|CALL|10");

    assert_eq!(outcome, Outcome::accepted("command executed"));
    assert_eq!(device.exchanges(), 1);
}

#[test]
fn test_call_polls_until_success() {
    let device = StubDevice::spawn(&["01|02|CALL|3", "01|02|CALL|3", "01|02|CALL|0"]);
    let bridge = bridge_for(&device);

    let outcome = bridge.execute("01|02|CALL|10");

    assert_eq!(outcome, Outcome::accepted("command executed"));
    assert_eq!(device.exchanges(), 3);
}

#[test]
fn test_return_rejection_is_not_polled() {
    let device = StubDevice::spawn(&["05|09|RETURN|-2", "05|09|RETURN|-2"]);
    let bridge = bridge_for(&device);

    let outcome = bridge.execute("05|09|RETURN|0");

    assert_eq!(outcome, Outcome::rejected("bay invalid"));
    assert_eq!(device.exchanges(), 1);
}

#[test]
fn test_status_single_round_trip() {
    let device = StubDevice::spawn(&["01|02|STATUS|1"]);
    let bridge = bridge_for(&device);

    let outcome = bridge.execute("01|02|STATUS|1");

    // 1 is not a listed rejection, so it falls through to accepted
    assert_eq!(outcome, Outcome::accepted("command executed"));
    assert_eq!(device.exchanges(), 1);
}

#[test]
fn test_call_rejected_by_device() {
    let device = StubDevice::spawn(&["01|02|CALL|-5"]);
    let bridge = bridge_for(&device);

    let outcome = bridge.execute("01|02|CALL|10");

    assert_eq!(
        outcome,
        Outcome::rejected("session not established or bay inactive")
    );
    assert_eq!(device.exchanges(), 1);
}

#[test]
fn test_unsupported_kind_never_contacts_device() {
    let device = StubDevice::spawn(&["01|02|MOVE|0"]);
    let bridge = bridge_for(&device);

    let outcome = bridge.execute("01|02|MOVE|10");

    assert_eq!(outcome, Outcome::unsupported("unsupported command: 01|02|MOVE|10"));
    assert_eq!(device.exchanges(), 0);
}

#[test]
fn test_unreachable_device_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = Config::builder()
        .device_addr("127.0.0.1", port)
        .connect_timeout_ms(500)
        .build();
    let bridge = Bridge::new(&config);

    let outcome = bridge.execute("05|09|RETURN|0");

    assert_eq!(outcome, Outcome::transport_error("failed to send command"));
}

// =============================================================================
// Event Emission Tests
// =============================================================================

#[test]
fn test_events_for_accepted_call() {
    let device = StubDevice::spawn(&["01|02|CALL|0"]);
    let (sender, notifier) = Notifier::channel();
    let bridge = bridge_for(&device).with_events(sender);

    bridge.execute("01|02|CALL|10");

    // Inspect the channel directly instead of running the notifier
    let events = rx_drain(notifier);
    assert_eq!(
        events,
        vec![Event::CommandReceived {
            kind: CommandKind::Call,
            command: "01|02|CALL|10".to_string(),
        }]
    );
}

#[test]
fn test_events_for_unsupported_command() {
    let device = StubDevice::spawn(&[]);
    let (sender, notifier) = Notifier::channel();
    let bridge = bridge_for(&device).with_events(sender);

    bridge.execute("01|02|MOVE|10");

    let events = rx_drain(notifier);
    assert_eq!(
        events,
        vec![Event::UnsupportedCommand {
            command: "01|02|MOVE|10".to_string(),
        }]
    );
}

#[test]
fn test_events_for_rejected_return() {
    let device = StubDevice::spawn(&["05|09|RETURN|-1"]);
    let (sender, notifier) = Notifier::channel();
    let bridge = bridge_for(&device).with_events(sender);

    bridge.execute("05|09|RETURN|0");

    let events = rx_drain(notifier);
    assert_eq!(
        events,
        vec![
            Event::CommandReceived {
                kind: CommandKind::Return,
                command: "05|09|RETURN|0".to_string(),
            },
            Event::CommandRejected {
                command: "05|09|RETURN|0".to_string(),
                reason: "bay empty".to_string(),
            },
        ]
    );
}

#[test]
fn test_timeout_event_carries_attempts() {
    let device = StubDevice::spawn(&["01|02|CALL|3", "01|02|CALL|3", "01|02|CALL|3"]);
    let config = Config::builder()
        .device_addr("127.0.0.1", device.port)
        .poll_interval(Duration::from_millis(1))
        .max_attempts(3)
        .connect_timeout_ms(1000)
        .read_timeout_ms(1000)
        .build();
    let (sender, notifier) = Notifier::channel();
    let bridge = Bridge::new(&config).with_events(sender);

    let outcome = bridge.execute("01|02|CALL|10");

    // Last response is still translated; status 3 falls through
    assert_eq!(outcome, Outcome::accepted("command executed"));
    assert_eq!(device.exchanges(), 3);

    let events = rx_drain(notifier);
    assert!(events.contains(&Event::CommandTimedOut {
        command: "01|02|CALL|10".to_string(),
        attempts: 3,
    }));
}

/// Collect the events currently queued on a notifier's channel
fn rx_drain(notifier: Notifier) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(event) = notifier.try_recv() {
        events.push(event);
    }
    events
}
