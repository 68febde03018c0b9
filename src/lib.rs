//! # Modula Bridge
//!
//! A bridge between HTTP clients and Modula automated-storage controllers
//! speaking a line-oriented, pipe-delimited TCP protocol:
//! - Pipe-delimited wire codec with CR framing
//! - One ephemeral TCP round trip per device exchange
//! - Bounded-retry polling for asynchronous CALL commands
//! - Status-code translation into application outcomes
//! - Thin JSON/HTTP front end (`POST /modula`)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  HTTP Server (POST /modula)                  │
//! │                  (one worker per request)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Bridge                                │
//! │        (kind routing, events, outcome translation)           │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │ CALL                         │ RETURN / STATUS
//!            ▼                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │    Poll Loop     │──────────▶│  DeviceClient    │
//!   │  (1s x 300 max)  │           │ (one TCP round   │
//!   └─────────────────┘            │  trip per call)  │
//!                                  └────────┬─────────┘
//!                                           ▼
//!                                   ┌──────────────┐
//!                                   │    Device     │
//!                                   │ (pipe-delim,  │
//!                                   │ CR-terminated)│
//!                                   └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod poll;
pub mod translate;
pub mod notify;
pub mod bridge;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BridgeError, Result};
pub use config::{Config, DeviceEndpoint};
pub use bridge::Bridge;
pub use translate::Outcome;
pub use protocol::CommandKind;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the bridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
