//! Network Module
//!
//! The two wire-facing halves of the bridge: the TCP client that talks to
//! the storage controller, and the HTTP server that receives commands.

mod client;
mod server;

pub use client::DeviceClient;
pub use server::{handle_request, CommandReply, Server};
